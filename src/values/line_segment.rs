//! Finite 2D line segment.

use serde::{Deserialize, Serialize};

use super::Vector2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment2D {
    pub start: Vector2,
    pub end: Vector2,
}

impl LineSegment2D {
    pub const fn new(start: Vector2, end: Vector2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.start - self.end).magnitude()
    }

    /// Unit direction from start to end.
    pub fn direction(&self) -> Vector2 {
        (self.end - self.start).unit()
    }

    /// Point at `percent` of the way along the segment. Not clamped.
    pub fn position_at_percent(&self, percent: f64) -> Vector2 {
        self.start + self.direction().with_length(percent * self.length())
    }

    /// Intersection point of two segments.
    ///
    /// `tolerance` is a distance in world units that each segment may be
    /// extended by at either end. Parallel segments never intersect.
    pub fn intersect(a: &LineSegment2D, b: &LineSegment2D, tolerance: f64) -> Option<Vector2> {
        let Vector2 { x: x1, y: y1 } = a.start;
        let Vector2 { x: x2, y: y2 } = a.end;
        let Vector2 { x: x3, y: y3 } = b.start;
        let Vector2 { x: x4, y: y4 } = b.end;

        let denominator = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if denominator == 0.0 {
            return None;
        }

        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denominator;
        let t_tolerance = tolerance / a.length();
        if t < -t_tolerance || t > 1.0 + t_tolerance {
            return None;
        }

        let u = ((x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3)) / denominator;
        let u_tolerance = tolerance / b.length();
        if u < -u_tolerance || u > 1.0 + u_tolerance {
            return None;
        }

        Some(Vector2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    }

    /// Closest point to `point` that lies on the segment.
    pub fn closest_point_on_line(&self, point: Vector2) -> Vector2 {
        let direction = self.end - self.start;
        let t = direction.dot(point - self.start) / direction.dot(direction);

        if t < 0.0 {
            self.start
        } else if t > 1.0 {
            self.end
        } else {
            self.start + direction * t
        }
    }
}
