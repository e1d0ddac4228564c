//! Angle stored in degrees.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    pub const ZERO: Angle = Angle { degrees: 0.0 };

    /// Default tolerance for `close`, in degrees.
    pub const CLOSE_TOLERANCE: f64 = 0.001;

    pub const fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    pub fn from_radians(radians: f64) -> Self {
        Self {
            degrees: radians * 180.0 / PI,
        }
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn radians(&self) -> f64 {
        self.degrees * PI / 180.0
    }

    /// Strictly closer than `tolerance` degrees.
    pub fn close(a: Angle, b: Angle, tolerance: f64) -> bool {
        (a.degrees - b.degrees).abs() < tolerance
    }

    pub fn is_close(&self, other: Angle) -> bool {
        Self::close(*self, other, Self::CLOSE_TOLERANCE)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_degrees(self.degrees + rhs.degrees)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_degrees(self.degrees - rhs.degrees)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_degrees(-self.degrees)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let a = Angle::from_degrees(180.0);
        assert!((a.radians() - PI).abs() < 1e-12);

        let b = Angle::from_radians(PI / 2.0);
        assert!((b.degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_close_is_strict() {
        let a = Angle::from_degrees(10.0);
        assert!(Angle::close(a, Angle::from_degrees(10.0005), 0.001));
        assert!(!Angle::close(a, Angle::from_degrees(10.5), 0.001));
        assert!(!Angle::close(a, Angle::from_degrees(11.0), 1.0));
        assert!(a.is_close(Angle::from_degrees(9.9999)));
    }

    #[test]
    fn test_equality_by_degrees() {
        assert_eq!(Angle::from_degrees(45.0), Angle::from_degrees(45.0));
        assert_ne!(Angle::from_degrees(45.0), Angle::from_degrees(46.0));
    }

    #[test]
    fn test_arithmetic() {
        let sum = Angle::from_degrees(30.0) + Angle::from_degrees(15.0);
        assert_eq!(sum.degrees(), 45.0);
        assert_eq!((-sum).degrees(), -45.0);
        assert_eq!((sum - Angle::from_degrees(5.0)).degrees(), 40.0);
    }
}
