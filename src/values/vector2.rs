//! 2D vector value object.

use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Angle;

/// Immutable 2D vector. Serializes as `{ "x": .., "y": .. }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Default tolerance for `close`.
    pub const CLOSE_TOLERANCE: f64 = 0.01;

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0)
    }

    pub fn from_array(values: [f64; 2]) -> Self {
        Self::new(values[0], values[1])
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// True if the distance between `a` and `b` is below `tolerance`.
    pub fn close(a: Vector2, b: Vector2, tolerance: f64) -> bool {
        (a - b).magnitude() < tolerance
    }

    pub fn is_close(self, other: Vector2) -> bool {
        Self::close(self, other, Self::CLOSE_TOLERANCE)
    }

    /// Counter-clockwise rotation by `angle`.
    pub fn rotate(self, angle: Angle) -> Vector2 {
        DVec2::from_angle(angle.radians()).rotate(self.into()).into()
    }

    pub fn scale(self, factor: f64) -> Vector2 {
        Vector2::new(self.x * factor, self.y * factor)
    }

    /// Same direction, given length. Zero stays zero.
    pub fn with_length(self, length: f64) -> Vector2 {
        self.unit().scale(length)
    }

    pub fn dot(self, other: Vector2) -> f64 {
        DVec2::from(self).dot(other.into())
    }

    /// Z component of the 3D cross product.
    pub fn cross(self, other: Vector2) -> f64 {
        DVec2::from(self).perp_dot(other.into())
    }

    /// Signed angle from `a` to `b` (not normalised into ±180).
    pub fn angle_between(a: Vector2, b: Vector2) -> Angle {
        Angle::from_radians(b.y.atan2(b.x) - a.y.atan2(a.x))
    }

    pub fn magnitude(self) -> f64 {
        DVec2::from(self).length()
    }

    /// Unit vector, or zero for a zero-length vector.
    pub fn unit(self) -> Vector2 {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Vector2::zero();
        }
        Vector2::new(self.x / mag, self.y / mag)
    }

    /// Direction in degrees from the +x axis.
    pub fn theta(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

impl From<DVec2> for Vector2 {
    fn from(v: DVec2) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl From<Vector2> for DVec2 {
    fn from(v: Vector2) -> Self {
        DVec2::new(v.x, v.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        self.scale(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}
