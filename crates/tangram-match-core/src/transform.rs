use nalgebra::{Matrix3, Point2, Vector3};
use serde::{Deserialize, Serialize};

/// Affine transform of a target piece in model/puzzle-definition space.
///
/// Wraps the full 3×3 homogeneous matrix; only the affine 2×3 part is ever
/// populated by puzzle definitions. Transforms are read-only inputs: they
/// are mapped into scene space, never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelTransform {
    pub m: Matrix3<f64>,
}

impl ModelTransform {
    pub fn new(m: Matrix3<f64>) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity())
    }

    /// Build from the affine coefficients `x' = a·x + b·y + tx`,
    /// `y' = c·x + d·y + ty`.
    pub fn from_parts(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self::new(Matrix3::new(a, b, tx, c, d, ty, 0.0, 0.0, 1.0))
    }

    /// Rigid transform: rotation by `theta` followed by a translation.
    pub fn from_rotation_translation(theta: f64, tx: f64, ty: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_parts(c, -s, s, c, tx, ty)
    }

    pub fn from_array(rows: [[f64; 3]; 3]) -> Self {
        Self::new(Matrix3::from_row_slice(&[
            rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
            rows[2][1], rows[2][2],
        ]))
    }

    pub fn to_array(&self) -> [[f64; 3]; 3] {
        [
            [self.m[(0, 0)], self.m[(0, 1)], self.m[(0, 2)]],
            [self.m[(1, 0)], self.m[(1, 1)], self.m[(1, 2)]],
            [self.m[(2, 0)], self.m[(2, 1)], self.m[(2, 2)]],
        ]
    }

    /// Raw position: the translation column, in model space.
    #[inline]
    pub fn translation(&self) -> Point2<f64> {
        Point2::new(self.m[(0, 2)], self.m[(1, 2)])
    }

    /// Raw angle in radians, model sense.
    ///
    /// Derived from the first basis column, so it stays meaningful for
    /// mirrored and uniformly scaled transforms.
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.m[(1, 0)].atan2(self.m[(0, 0)])
    }

    /// Determinant of the linear 2×2 part.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.m[(0, 0)] * self.m[(1, 1)] - self.m[(0, 1)] * self.m[(1, 0)]
    }

    /// Whether the transform mirrors the plane (negative determinant).
    ///
    /// Single source of truth for flip detection from a transform; every
    /// flip check goes through here.
    #[inline]
    pub fn is_mirrored(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Apply to a model-space point.
    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        let v = self.m * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v[0], v[1])
    }
}
