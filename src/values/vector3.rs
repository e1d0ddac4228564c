//! 3D vector value object.

use std::ops::{Add, Mul, Neg, Sub};

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use super::Matrix;

/// Immutable 3D vector. Serializes as `{ "x": .., "y": .., "z": .. }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const CLOSE_TOLERANCE: f64 = 0.01;

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    // Direction constructors take the length along the axis.

    pub const fn right(length: f64) -> Self {
        Self::new(length, 0.0, 0.0)
    }

    pub const fn left(length: f64) -> Self {
        Self::new(-length, 0.0, 0.0)
    }

    pub const fn up(length: f64) -> Self {
        Self::new(0.0, length, 0.0)
    }

    pub const fn down(length: f64) -> Self {
        Self::new(0.0, -length, 0.0)
    }

    pub const fn forward(length: f64) -> Self {
        Self::new(0.0, 0.0, length)
    }

    pub const fn backward(length: f64) -> Self {
        Self::new(0.0, 0.0, -length)
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn close(a: Vector3, b: Vector3, tolerance: f64) -> bool {
        (a - b).magnitude() < tolerance
    }

    pub fn is_close(self, other: Vector3) -> bool {
        Self::close(self, other, Self::CLOSE_TOLERANCE)
    }

    pub fn cross(self, other: Vector3) -> Vector3 {
        DVec3::from(self).cross(other.into()).into()
    }

    pub fn dot(self, other: Vector3) -> f64 {
        DVec3::from(self).dot(other.into())
    }

    /// Same direction, given length. Zero stays zero.
    pub fn with_length(self, length: f64) -> Vector3 {
        self.unit() * length
    }

    /// Transform as a point by `matrix`, with perspective divide.
    pub fn transform(self, matrix: &Matrix) -> Vector3 {
        DMat4::from(*matrix).project_point3(self.into()).into()
    }

    pub fn lerp(initial: Vector3, target: Vector3, percent: f64) -> Vector3 {
        DVec3::from(initial).lerp(target.into(), percent).into()
    }

    pub fn magnitude(self) -> f64 {
        DVec3::from(self).length()
    }

    /// Unit vector, or zero for a zero-length vector.
    pub fn unit(self) -> Vector3 {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Vector3::zero();
        }
        Vector3::new(self.x / mag, self.y / mag, self.z / mag)
    }
}

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_constructors() {
        assert_eq!(Vector3::right(2.0), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(Vector3::left(1.0), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(Vector3::up(3.0), Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(Vector3::down(1.0), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(Vector3::forward(1.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(Vector3::backward(4.0), Vector3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn test_cross_dot() {
        let x = Vector3::right(1.0);
        let y = Vector3::up(1.0);
        assert_eq!(x.cross(y), Vector3::forward(1.0));
        assert_eq!(Vector3::new(1.0, 2.0, 3.0).dot(Vector3::new(4.0, 5.0, 6.0)), 32.0);
    }

    #[test]
    fn test_unit_and_length() {
        assert_eq!(Vector3::zero().unit(), Vector3::zero());
        let v = Vector3::new(0.0, 3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        assert!(v.with_length(10.0).is_close(Vector3::new(0.0, 6.0, 8.0)));
    }

    #[test]
    fn test_close() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        assert!(a.is_close(Vector3::new(1.005, 2.0, 3.0)));
        assert!(!a.is_close(Vector3::new(1.02, 2.0, 3.0)));
    }

    #[test]
    fn test_lerp() {
        let a = Vector3::zero();
        let b = Vector3::new(10.0, -10.0, 4.0);
        assert_eq!(Vector3::lerp(a, b, 0.5), Vector3::new(5.0, -5.0, 2.0));
        assert_eq!(Vector3::lerp(a, b, 0.0), a);
        assert_eq!(Vector3::lerp(a, b, 1.0), b);
    }

    #[test]
    fn test_transform_by_translation() {
        let m = Matrix::identity().with_translation(Vector3::new(1.0, 2.0, 3.0));
        let p = Vector3::new(1.0, 1.0, 1.0).transform(&m);
        assert!(p.is_close(Vector3::new(2.0, 3.0, 4.0)));
    }
}
