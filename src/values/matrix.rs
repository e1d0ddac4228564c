//! 4x4 transformation matrix.
//!
//! Sixteen values in column-major order: elements 0..4 are the first column,
//! 12..15 carry the translation. Products follow the usual `A * B` column
//! convention, so a point transformed by `A * B` is transformed by `B` first.
//!
//! Heavy lifting (product, determinant, inverse, axis-angle) is done by
//! `glam::DMat4`; the decomposition helpers follow the scale-rotation-translation
//! layout written by `compose`.

use std::ops::Mul;

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use super::{Angle, Quaternion, Vector3};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    m: [f64; 16],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub const CLOSE_THRESHOLD: f64 = 0.001;

    pub const fn new(m: [f64; 16]) -> Self {
        Self { m }
    }

    #[rustfmt::skip]
    pub const fn identity() -> Self {
        Self::new([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub const fn zero() -> Self {
        Self::new([0.0; 16])
    }

    /// Copy of the sixteen values.
    pub fn m(&self) -> [f64; 16] {
        self.m
    }

    /// Build from a float buffer (e.g. one handed over by a renderer).
    /// Anything other than sixteen values is logged and yields identity.
    pub fn from_f32_slice(values: &[f32]) -> Matrix {
        if values.len() != 16 {
            log::error!("[matrixFrom32] Array does not have a length of 16");
            return Matrix::identity();
        }
        let mut m = [0.0; 16];
        for (dst, src) in m.iter_mut().zip(values) {
            *dst = f64::from(*src);
        }
        Matrix::new(m)
    }

    /// Element-wise, within `threshold` (inclusive).
    pub fn close(a: &Matrix, b: &Matrix, threshold: f64) -> bool {
        a.m.iter().zip(b.m.iter()).all(|(l, r)| (l - r).abs() <= threshold)
    }

    pub fn is_close(&self, other: &Matrix) -> bool {
        Self::close(self, other, Self::CLOSE_THRESHOLD)
    }

    pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        (DMat4::from(*a) * DMat4::from(*b)).into()
    }

    pub fn compose(scale: Vector3, rotation: Quaternion, translation: Vector3) -> Matrix {
        DMat4::from_scale_rotation_translation(scale.into(), rotation.into(), translation.into()).into()
    }

    /// Inverse, or identity when the matrix is singular.
    pub fn invert(&self) -> Matrix {
        let mat = DMat4::from(*self);
        if mat.determinant() == 0.0 {
            return Matrix::identity();
        }
        mat.inverse().into()
    }

    pub fn determinant(&self) -> f64 {
        DMat4::from(*self).determinant()
    }

    pub fn from_rotation_axis_angle(axis: Vector3, angle: Angle) -> Matrix {
        let unit: DVec3 = axis.unit().into();
        DMat4::from_axis_angle(unit, angle.radians()).into()
    }

    pub fn with_translation(&self, translation: Vector3) -> Matrix {
        let mut m = self.m;
        m[12] = translation.x;
        m[13] = translation.y;
        m[14] = translation.z;
        Matrix::new(m)
    }

    /// Same scale and translation, new rotation.
    pub fn with_rotation(&self, rotation: Quaternion) -> Matrix {
        Matrix::compose(self.scale(), rotation, self.translation())
    }

    /// Same rotation and translation, new scale.
    pub fn with_scale(&self, scale: Vector3) -> Matrix {
        Matrix::compose(scale, self.rotation(), self.translation())
    }

    /// Mirror a transform between left- and right-handed (Z flip).
    pub fn flip_transform_matrix_hand(&self) -> Matrix {
        let mut m = self.m;
        for i in [2, 6, 8, 9, 14] {
            m[i] = -m[i];
        }
        Matrix::new(m)
    }

    pub fn flip_projection_matrix_hand(&self) -> Matrix {
        let mut m = self.m;
        for v in &mut m[8..12] {
            *v = -*v;
        }
        Matrix::new(m)
    }

    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.m[12], self.m[13], self.m[14])
    }

    /// Column lengths. A mirrored matrix (determinant <= 0) reports
    /// the mirroring on Y.
    pub fn scale(&self) -> Vector3 {
        let m = &self.m;
        let x = (m[0] * m[0] + m[1] * m[1] + m[2] * m[2]).sqrt();
        let mut y = (m[4] * m[4] + m[5] * m[5] + m[6] * m[6]).sqrt();
        let z = (m[8] * m[8] + m[9] * m[9] + m[10] * m[10]).sqrt();
        if self.determinant() <= 0.0 {
            y = -y;
        }
        Vector3::new(x, y, z)
    }

    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_rotation_matrix(&self.rotation_matrix())
    }

    /// Upper 3x3 with the scale divided out, no translation.
    #[rustfmt::skip]
    pub fn rotation_matrix(&self) -> Matrix {
        let scale = self.scale();
        let (sx, sy, sz) = (1.0 / scale.x, 1.0 / scale.y, 1.0 / scale.z);
        let m = &self.m;
        Matrix::new([
            m[0] * sx, m[1] * sx, m[2] * sx, 0.0,
            m[4] * sy, m[5] * sy, m[6] * sy, 0.0,
            m[8] * sz, m[9] * sz, m[10] * sz, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }
}

impl From<DMat4> for Matrix {
    fn from(mat: DMat4) -> Self {
        Matrix::new(mat.to_cols_array())
    }
}

impl From<Matrix> for DMat4 {
    fn from(matrix: Matrix) -> Self {
        DMat4::from_cols_array(&matrix.m)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        Matrix::multiply(&self, &rhs)
    }
}
