//! Imperial <-> metric length conversion.

pub const INCHES_PER_METER: f64 = 39.3701;
pub const FEET_PER_METER: f64 = 3.28084;

pub fn inches_to_meters(inches: f64) -> f64 {
    inches / INCHES_PER_METER
}

pub fn meters_to_inches(meters: f64) -> f64 {
    meters * INCHES_PER_METER
}

pub fn feet_to_meters(feet: f64) -> f64 {
    feet / FEET_PER_METER
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}
