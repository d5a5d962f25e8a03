/// Transformation policy contract.
///
/// A policy fixes how an object stores its local transformation
/// (`DataType`) and how such values compose, invert and convert to the
/// matrix type consumed by features. All policies obey the same algebra:
///
/// - `to_matrix(compose(a, b)) == to_matrix(a) * to_matrix(b)`
/// - `compose(inverted(a), a) == compose(a, inverted(a)) == identity()`

use std::fmt::Debug;
use std::ops::Mul;
use crate::error::Result;
use crate::math::{Matrix, Real, Vector2};

/// Matrix type a transformation policy converts to
///
/// Implemented for `Matrix3` (2D) and `Matrix4` (3D).
pub trait TransformationMatrix: Copy + Debug + PartialEq + Mul<Output = Self> + 'static {
    /// Underlying scalar
    type Scalar: Real;

    /// Number of spatial dimensions (2 or 3)
    const DIMENSIONS: u32;

    /// Identity transformation
    fn identity_matrix() -> Self;

    /// Scaling of the X and Y axes encoded in a projection matrix,
    /// `(m[0][0], m[1][1])`
    fn projection_scale(&self) -> Vector2<Self::Scalar>;

    /// Scaling matrix for the X and Y axes, other axes unchanged
    fn from_xy_scaling(scale: Vector2<Self::Scalar>) -> Self;
}

impl<T: Real> TransformationMatrix for Matrix<3, T> {
    type Scalar = T;
    const DIMENSIONS: u32 = 2;

    fn identity_matrix() -> Self {
        Matrix::identity()
    }

    fn projection_scale(&self) -> Vector2<T> {
        Vector2::new(self[0][0], self[1][1])
    }

    fn from_xy_scaling(scale: Vector2<T>) -> Self {
        Matrix::<3, T>::from_scaling(scale)
    }
}

impl<T: Real> TransformationMatrix for Matrix<4, T> {
    type Scalar = T;
    const DIMENSIONS: u32 = 3;

    fn identity_matrix() -> Self {
        Matrix::identity()
    }

    fn projection_scale(&self) -> Vector2<T> {
        Vector2::new(self[0][0], self[1][1])
    }

    fn from_xy_scaling(scale: Vector2<T>) -> Self {
        Matrix::<4, T>::from_scaling(scale.pad(T::one()))
    }
}

/// Transformation policy
///
/// Policies are zero-sized marker types; every operation is an associated
/// function over `DataType` values.
///
/// # Example
///
/// ```no_run
/// use magnum_engine::magnum::scene_graph::{DualComplexTransformation, Transformation};
/// use magnum_engine::magnum::math::{Deg, DualComplex, Vector2};
///
/// type P = DualComplexTransformation;
/// let a = DualComplex::from_rotation(Deg(30.0));
/// let b = DualComplex::from_translation(Vector2::new(1.0, 0.0));
/// assert_eq!(P::to_matrix(&P::compose(&a, &b)), P::to_matrix(&a) * P::to_matrix(&b));
/// ```
pub trait Transformation: 'static {
    /// Underlying scalar
    type Scalar: Real;

    /// Local transformation representation
    type DataType: Copy + Debug + PartialEq + 'static;

    /// Matrix representation handed to features
    type Matrix: TransformationMatrix<Scalar = Self::Scalar>;

    /// Policy name used in diagnostics
    const NAME: &'static str;

    /// Identity transformation
    fn identity() -> Self::DataType;

    /// Convert from a matrix
    ///
    /// Fails when the matrix cannot be represented by this policy.
    fn from_matrix(matrix: &Self::Matrix) -> Result<Self::DataType>;

    /// Convert to a matrix
    fn to_matrix(transformation: &Self::DataType) -> Self::Matrix;

    /// `parent ∘ child`, the child applied first
    fn compose(parent: &Self::DataType, child: &Self::DataType) -> Self::DataType;

    /// Inverse transformation
    fn inverted(transformation: &Self::DataType) -> Self::DataType;

    /// Check that a value may be stored by this policy
    ///
    /// Returns the reason for rejection, e.g. `"the dual complex number is not normalized"`.
    fn validate(_transformation: &Self::DataType) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
#[path = "transformation_tests.rs"]
mod tests;
