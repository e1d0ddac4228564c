//! Rotation quaternion (x, y, z, w).
//!
//! Euler conventions: yaw turns about Y, pitch about X, roll about Z.
//! `from_euler(x, y, z)` is `from_yaw_pitch_roll(y, x, z)`.

use std::ops::Mul;

use glam::DQuat;
use serde::{Deserialize, Serialize};

use super::{Angle, Matrix, Vector3};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Default per-component threshold for `close`.
    pub const CLOSE_THRESHOLD: f64 = 0.001;

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Every component within `threshold` (inclusive).
    pub fn close(a: Quaternion, b: Quaternion, threshold: f64) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array())
            .all(|(l, r)| (l - r).abs() <= threshold)
    }

    pub fn is_close(self, other: Quaternion) -> bool {
        Self::close(self, other, Self::CLOSE_THRESHOLD)
    }

    pub fn multiply(a: Quaternion, b: Quaternion) -> Quaternion {
        (DQuat::from(a) * DQuat::from(b)).into()
    }

    /// Conjugate. Equals the inverse for unit quaternions.
    pub fn inverse(self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn from_angle_axis(axis: Vector3, angle: Angle) -> Quaternion {
        let half = angle.radians() / 2.0;
        let (sin, cos) = half.sin_cos();
        let unit = axis.unit();
        Quaternion::new(unit.x * sin, unit.y * sin, unit.z * sin, cos)
    }

    pub fn from_yaw_pitch_roll(yaw: Angle, pitch: Angle, roll: Angle) -> Quaternion {
        let (sr, cr) = (roll.radians() * 0.5).sin_cos();
        let (sp, cp) = (pitch.radians() * 0.5).sin_cos();
        let (sy, cy) = (yaw.radians() * 0.5).sin_cos();

        Quaternion::new(
            cy * sp * cr + sy * cp * sr,
            sy * cp * cr - cy * sp * sr,
            cy * cp * sr - sy * sp * cr,
            cy * cp * cr + sy * sp * sr,
        )
    }

    pub fn from_euler(x: Angle, y: Angle, z: Angle) -> Quaternion {
        Self::from_yaw_pitch_roll(y, x, z)
    }

    /// Orientation looking along `direction` with +Z as the reference forward.
    /// A zero vector yields identity.
    pub fn from_direction_vector(direction: Vector3) -> Quaternion {
        if direction.magnitude() == 0.0 {
            return Quaternion::identity();
        }
        let dir = direction.unit();

        // Straight up or down: yaw is undefined.
        if dir.x == 0.0 && dir.z == 0.0 {
            let pitch = if dir.y > 0.0 { -90.0 } else { 90.0 };
            return Self::from_yaw_pitch_roll(Angle::ZERO, Angle::from_degrees(pitch), Angle::ZERO);
        }

        let yaw = -dir.z.atan2(dir.x) + std::f64::consts::FRAC_PI_2;
        let flat = (dir.x * dir.x + dir.z * dir.z).sqrt();
        let pitch = -dir.y.atan2(flat);

        Self::from_yaw_pitch_roll(Angle::from_radians(yaw), Angle::from_radians(pitch), Angle::ZERO)
    }

    /// Extract the rotation of a normalised, unscaled rotation matrix.
    pub fn from_rotation_matrix(matrix: &Matrix) -> Quaternion {
        let m = matrix.m();
        let (m11, m12, m13) = (m[0], m[4], m[8]);
        let (m21, m22, m23) = (m[1], m[5], m[9]);
        let (m31, m32, m33) = (m[2], m[6], m[10]);
        let trace = m11 + m22 + m33;

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Quaternion::new((m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s)
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Quaternion::new(0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s)
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Quaternion::new((m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s)
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Quaternion::new((m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s)
        }
    }

    pub fn to_rotation_matrix(self) -> Matrix {
        Matrix::compose(Vector3::one(), self, Vector3::zero())
    }

    /// Rotation angle, in 0..=360 degrees.
    pub fn angle(self) -> Angle {
        Angle::from_radians(2.0 * self.w.clamp(-1.0, 1.0).acos())
    }

    /// Rotation axis. Zero when there is no rotation.
    pub fn axis(self) -> Vector3 {
        let s = (1.0 - self.w * self.w).sqrt();
        if s == 0.0 || s.is_nan() {
            return Vector3::zero();
        }
        Vector3::new(self.x / s, self.y / s, self.z / s)
    }

    /// Smallest angle between two orientations, in 0..=180 degrees.
    pub fn angle_between(a: Quaternion, b: Quaternion) -> Angle {
        let angle = Self::multiply(a.inverse(), b).angle();
        if angle.degrees() > 180.0 {
            Angle::from_degrees(360.0 - angle.degrees())
        } else {
            angle
        }
    }

    /// Spherical interpolation along the shorter arc.
    pub fn slerp(initial: Quaternion, target: Quaternion, percent: f64) -> Quaternion {
        let mut cos = Self::dot(initial, target);
        let flip = cos < 0.0;
        if flip {
            cos = -cos;
        }

        let (from_weight, mut to_weight) = if cos > 0.999_999 {
            (1.0 - percent, percent)
        } else {
            let theta = cos.acos();
            let inv_sin = 1.0 / theta.sin();
            (
                ((1.0 - percent) * theta).sin() * inv_sin,
                (percent * theta).sin() * inv_sin,
            )
        };
        if flip {
            to_weight = -to_weight;
        }

        Quaternion::new(
            from_weight * initial.x + to_weight * target.x,
            from_weight * initial.y + to_weight * target.y,
            from_weight * initial.z + to_weight * target.z,
            from_weight * initial.w + to_weight * target.w,
        )
    }

    fn dot(a: Quaternion, b: Quaternion) -> f64 {
        a.x * b.x + a.y * b.y + a.z * b.z + a.w * b.w
    }
}

impl From<DQuat> for Quaternion {
    fn from(q: DQuat) -> Self {
        Quaternion::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion> for DQuat {
    fn from(q: Quaternion) -> Self {
        DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion::multiply(self, rhs)
    }
}
