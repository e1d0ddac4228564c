//! Scalar interpolation and angle helpers.

/// `start + percent * (end - start)`, optionally clamping `percent` to 0..=1.
pub fn interpolate_number(start: f64, end: f64, percent: f64, clamp: bool) -> f64 {
    let percent = if clamp { percent.clamp(0.0, 1.0) } else { percent };
    percent * (end - start) + start
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}
