//! Infinite 3D line `origin + t * direction` with a unit direction.

use serde::{Deserialize, Serialize};

use super::Vector3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParametricLine {
    origin: Vector3,
    direction: Vector3,
}

impl ParametricLine {
    /// `direction` is normalised; a zero direction stays zero.
    pub fn from_point_direction(point: Vector3, direction: Vector3) -> Self {
        Self {
            origin: point,
            direction: direction.unit(),
        }
    }

    pub fn from_two_points(p1: Vector3, p2: Vector3) -> Self {
        Self::from_point_direction(p1, p2 - p1)
    }

    pub fn forward() -> Self {
        Self::from_point_direction(Vector3::zero(), Vector3::forward(1.0))
    }

    pub fn backward() -> Self {
        Self::from_point_direction(Vector3::zero(), Vector3::backward(1.0))
    }

    pub fn up() -> Self {
        Self::from_point_direction(Vector3::zero(), Vector3::up(1.0))
    }

    pub fn down() -> Self {
        Self::from_point_direction(Vector3::zero(), Vector3::down(1.0))
    }

    pub fn left() -> Self {
        Self::from_point_direction(Vector3::zero(), Vector3::left(1.0))
    }

    pub fn right() -> Self {
        Self::from_point_direction(Vector3::zero(), Vector3::right(1.0))
    }

    pub fn origin(&self) -> Vector3 {
        self.origin
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    pub fn point_at_distance(&self, distance: f64) -> Vector3 {
        self.origin + self.direction * distance
    }

    /// Distance from the line's origin to `point`.
    pub fn distance_to_point(&self, point: Vector3) -> f64 {
        (self.origin - point).magnitude()
    }
}
