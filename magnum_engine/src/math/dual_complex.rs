/// Dual complex numbers as 2D rigid transformations.
///
/// The real part is a rotation complex number, the dual part holds the
/// translation as `x + iy`. A dual complex number is normalized when its
/// real part has unit length; products of normalized values stay
/// normalized up to rounding.

use std::ops::Mul;
use crate::error::Result;
use crate::engine_bail;
use super::angle::Rad;
use super::complex::Complex;
use super::matrix::Matrix3;
use super::scalar::{is_normalized_squared, Real};
use super::vector::Vector2;
use super::LOG_SOURCE;

/// Dual complex number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualComplex<T: Real = f32> {
    real: Complex<T>,
    dual: Complex<T>,
}

impl<T: Real> Default for DualComplex<T> {
    /// Identity transformation
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> DualComplex<T> {
    /// Dual complex number from real and dual parts
    #[inline]
    pub const fn new(real: Complex<T>, dual: Complex<T>) -> Self {
        Self { real, dual }
    }

    /// Identity transformation
    pub fn identity() -> Self {
        Self::new(Complex::identity(), Complex::zero())
    }

    /// Counterclockwise rotation around the origin
    pub fn from_rotation(angle: impl Into<Rad<T>>) -> Self {
        Self::new(Complex::rotation(angle), Complex::zero())
    }

    /// Translation
    pub fn from_translation(vector: Vector2<T>) -> Self {
        Self::new(Complex::identity(), Complex::from_vector(vector))
    }

    /// Rotation followed by translation
    pub fn from_parts(rotation: Complex<T>, translation: Vector2<T>) -> Self {
        Self::new(rotation, Complex::from_vector(translation))
    }

    /// Rigid transformation from a 3x3 matrix
    ///
    /// The matrix must represent a rigid transformation.
    pub fn from_matrix(matrix: &Matrix3<T>) -> Result<Self> {
        if !matrix.is_rigid_transformation() {
            engine_bail!(LOG_SOURCE,
                "DualComplex::from_matrix(): the matrix doesn't represent a rigid transformation");
        }
        Ok(Self::from_matrix_unchecked(matrix))
    }

    pub(crate) fn from_matrix_unchecked(matrix: &Matrix3<T>) -> Self {
        let rotation = matrix.rotation_scaling();
        Self::from_parts(Complex::new(rotation[0][0], rotation[0][1]), matrix.translation())
    }

    /// Real part
    #[inline]
    pub fn real(&self) -> Complex<T> {
        self.real
    }

    /// Dual part
    #[inline]
    pub fn dual(&self) -> Complex<T> {
        self.dual
    }

    /// Rotation part
    #[inline]
    pub fn rotation(&self) -> Complex<T> {
        self.real
    }

    /// Translation part
    pub fn translation(&self) -> Vector2<T> {
        self.dual.to_vector()
    }

    /// 3x3 transformation matrix
    pub fn to_matrix(&self) -> Matrix3<T> {
        Matrix3::from_parts(self.real.to_matrix(), self.translation())
    }

    /// Squared length of the real part
    pub fn length_squared(&self) -> T {
        self.real.length_squared()
    }

    /// Length of the real part
    pub fn length(&self) -> T {
        self.real.length()
    }

    /// Whether the real part has unit length, within tolerance
    pub fn is_normalized(&self) -> bool {
        is_normalized_squared(self.length_squared())
    }

    /// Dual complex number with normalized rotation, translation unchanged
    pub fn normalized(&self) -> Self {
        Self::new(self.real / self.length(), self.dual)
    }

    /// Complex-conjugated, `(r*, d*)`
    pub fn complex_conjugated(&self) -> Self {
        Self::new(self.real.conjugated(), self.dual.conjugated())
    }

    /// Dual-conjugated, `(r, -d)`
    pub fn dual_conjugated(&self) -> Self {
        Self::new(self.real, -self.dual)
    }

    /// Conjugated, `(r*, -d*)`
    pub fn conjugated(&self) -> Self {
        Self::new(self.real.conjugated(), -self.dual.conjugated())
    }

    /// Inverted transformation
    pub fn inverted(&self) -> Self {
        Self::new(self.real.inverted(), Complex::zero())
            * Self::new(Complex::identity(), -self.dual)
    }

    /// Inverse of a normalized dual complex number
    pub fn inverted_normalized(&self) -> Result<Self> {
        if !self.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "DualComplex::inverted_normalized(): {:?} is not normalized", self);
        }
        Ok(self.inverted_normalized_unchecked())
    }

    /// Inverse of a normalized dual complex number without the normalization check
    pub fn inverted_normalized_unchecked(&self) -> Self {
        Self::new(self.real.conjugated(), Complex::zero())
            * Self::new(Complex::identity(), -self.dual)
    }

    /// Rotate a vector (translation is ignored)
    pub fn transform_vector(&self, vector: Vector2<T>) -> Vector2<T> {
        self.real.transform_vector(vector)
    }

    /// Transform a point
    pub fn transform_point(&self, point: Vector2<T>) -> Vector2<T> {
        (*self * Self::from_translation(point)).translation()
    }
}

impl<T: Real> Mul for DualComplex<T> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(self.real * other.real, self.real * other.dual + self.dual)
    }
}

#[cfg(test)]
#[path = "dual_complex_tests.rs"]
mod tests;
