//! Plane `a*x + b*y + c*z + d = 0` kept as a point and a normal.

use serde::{Deserialize, Serialize};

use super::{ParametricLine, Vector3};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParametricPlane {
    point: Vector3,
    normal: Vector3,
}

impl ParametricPlane {
    pub fn from_point_normal(point: Vector3, normal: Vector3) -> Self {
        Self { point, normal }
    }

    /// Normal is `(b - a) x (c - a)`, anchored at `a`.
    pub fn from_three_points(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self::from_point_normal(a, (b - a).cross(c - a))
    }

    pub fn xy() -> Self {
        Self::from_point_normal(Vector3::zero(), Vector3::forward(1.0))
    }

    pub fn zx() -> Self {
        Self::from_point_normal(Vector3::zero(), Vector3::up(1.0))
    }

    pub fn yz() -> Self {
        Self::from_point_normal(Vector3::zero(), Vector3::right(1.0))
    }

    pub fn point(&self) -> Vector3 {
        self.point
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn parameters(&self) -> PlaneParameters {
        let d = self.point.dot(self.normal);
        PlaneParameters {
            a: self.normal.x,
            b: self.normal.y,
            c: self.normal.z,
            // avoid -0.0
            d: if d == 0.0 { 0.0 } else { -d },
        }
    }

    /// Point where `line` crosses the plane. `None` when parallel.
    pub fn intersect_line(&self, line: &ParametricLine) -> Option<Vector3> {
        let PlaneParameters { a, b, c, d } = self.parameters();
        let origin = line.origin();
        let dir = line.direction();

        let denominator = a * dir.x + b * dir.y + c * dir.z;
        if denominator == 0.0 {
            return None;
        }
        let t = -(a * origin.x + b * origin.y + c * origin.z + d) / denominator;
        Some(line.point_at_distance(t))
    }
}
