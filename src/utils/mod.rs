//! Small numeric helpers: easing curves, interpolation, unit conversion
//! and the polled `LerpNumber` animator.

pub mod ease;
pub mod interpolate;
pub mod length;
pub mod lerp;

pub use ease::{EaseFn, ease_by_name};
pub use interpolate::{degrees_to_radians, interpolate_number};
pub use length::{feet_to_meters, inches_to_meters, meters_to_feet, meters_to_inches};
pub use lerp::{LerpNumber, LerpOutcome, LerpRequest};
