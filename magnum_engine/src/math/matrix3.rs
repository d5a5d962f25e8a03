/// 2D transformation matrices.
///
/// A `Matrix3` holds a 2x2 rotation/scaling part in the upper left and a
/// translation in the third column. Constructors are prefixed with `from_`
/// where the plain name is taken by the matching getter.

use crate::error::Result;
use crate::engine_bail;
use super::angle::Rad;
use super::matrix::{Matrix2, Matrix3};
use super::scalar::{Real, Scalar};
use super::vector::{Vector2, Vector3};
use super::LOG_SOURCE;

impl<T: Scalar> Matrix3<T> {
    /// 3x3 matrix from columns
    pub fn new(c0: Vector3<T>, c1: Vector3<T>, c2: Vector3<T>) -> Self {
        Self([c0, c1, c2])
    }

    /// 2D translation matrix
    pub fn from_translation(vector: Vector2<T>) -> Self {
        let mut out = Self::identity();
        out[2] = vector.pad(T::one());
        out
    }

    /// 2D scaling matrix
    pub fn from_scaling(vector: Vector2<T>) -> Self {
        Self::from_diagonal(vector.pad(T::one()))
    }

    /// Matrix from a 2x2 rotation/scaling part and a translation
    pub fn from_parts(rotation_scaling: Matrix2<T>, translation: Vector2<T>) -> Self {
        Self::new(
            rotation_scaling[0].pad(T::zero()),
            rotation_scaling[1].pad(T::zero()),
            translation.pad(T::one()),
        )
    }

    /// Upper-left 2x2 part
    pub fn rotation_scaling(&self) -> Matrix2<T> {
        Matrix2::new(self[0].xy(), self[1].xy())
    }

    /// Translation part
    pub fn translation(&self) -> Vector2<T> {
        self[2].xy()
    }

    /// Right-pointing 2D vector (first column)
    pub fn right(&self) -> Vector2<T> {
        self[0].xy()
    }

    /// Up-pointing 2D vector (second column)
    pub fn up(&self) -> Vector2<T> {
        self[1].xy()
    }
}

impl<T: Real> Matrix3<T> {
    /// 2D counterclockwise rotation matrix
    pub fn from_rotation(angle: impl Into<Rad<T>>) -> Self {
        let (sine, cosine) = angle.into().sin_cos();
        Self::new(
            Vector3::new(cosine, sine, T::zero()),
            Vector3::new(-sine, cosine, T::zero()),
            Vector3::new(T::zero(), T::zero(), T::one()),
        )
    }

    /// 2D reflection matrix about a line through the origin with given normal
    ///
    /// The normal must be normalized.
    pub fn from_reflection(normal: Vector2<T>) -> Result<Self> {
        if !normal.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Matrix3::from_reflection(): normal {:?} is not normalized", normal.0);
        }
        Ok(Self::from_reflection_unchecked(normal))
    }

    pub(crate) fn from_reflection_unchecked(normal: Vector2<T>) -> Self {
        let reflection = Matrix2::identity() - Matrix2::outer(normal, normal) * T::two();
        Self::from_parts(reflection, Vector2::zero())
    }

    /// 2D shearing along the X axis
    pub fn from_shearing_x(amount: T) -> Self {
        let mut out = Self::identity();
        out[1][0] = amount;
        out
    }

    /// 2D shearing along the Y axis
    pub fn from_shearing_y(amount: T) -> Self {
        let mut out = Self::identity();
        out[0][1] = amount;
        out
    }

    /// 2D projection matrix mapping a rectangle of `size` onto `[-1, 1]`
    pub fn projection(size: Vector2<T>) -> Self {
        Self::from_scaling(Vector2::splat(T::two()) / size)
    }

    /// Whether the matrix is a rigid transformation (rotation and translation only)
    pub fn is_rigid_transformation(&self) -> bool {
        self.rotation_scaling().is_orthogonal() && self.row(2) == Vector3::new(T::zero(), T::zero(), T::one())
    }

    /// Inverse of a rigid transformation
    pub fn inverted_rigid(&self) -> Result<Self> {
        if !self.is_rigid_transformation() {
            engine_bail!(LOG_SOURCE,
                "Matrix3::inverted_rigid(): the matrix doesn't represent a rigid transformation");
        }
        Ok(self.inverted_rigid_unchecked())
    }

    /// Inverse of a rigid transformation without the rigidity check
    pub fn inverted_rigid_unchecked(&self) -> Self {
        let inverse_rotation = self.rotation_scaling().transposed();
        Self::from_parts(inverse_rotation, -(inverse_rotation * self.translation()))
    }

    /// Transform a 2D direction (translation is ignored)
    pub fn transform_vector(&self, vector: Vector2<T>) -> Vector2<T> {
        self.rotation_scaling() * vector
    }

    /// Transform a 2D point
    pub fn transform_point(&self, point: Vector2<T>) -> Vector2<T> {
        (*self * point.pad(T::one())).xy()
    }
}

#[cfg(test)]
#[path = "matrix3_tests.rs"]
mod tests;
