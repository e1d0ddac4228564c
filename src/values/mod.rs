//! Value objects - immutable geometry and color types.
//!
//! All are `Copy`, compare by value and serialize to plain field maps
//! (`{ "x": .., "y": .. }` and so on). Each type offers a tolerance-based
//! `close` next to exact `==`.

mod angle;
mod color;
mod line_segment;
mod matrix;
mod parametric_line;
mod parametric_plane;
mod quaternion;
mod rectangle;
mod vector2;
mod vector3;

pub use angle::Angle;
pub use color::Color;
pub use line_segment::LineSegment2D;
pub use matrix::Matrix;
pub use parametric_line::ParametricLine;
pub use parametric_plane::{ParametricPlane, PlaneParameters};
pub use quaternion::Quaternion;
pub use rectangle::Rectangle;
pub use vector2::Vector2;
pub use vector3::Vector3;
