/// Complex numbers as 2D rotations.
///
/// A normalized complex number `cos θ + i sin θ` represents a
/// counterclockwise rotation by `θ`. Products compose rotations, with the
/// right operand applied first.

use std::ops::{Add, Div, Mul, MulAssign, Neg, Sub};
use crate::error::Result;
use crate::engine_bail;
use super::angle::Rad;
use super::matrix::Matrix2;
use super::scalar::{is_normalized_squared, Real};
use super::vector::Vector2;
use super::LOG_SOURCE;

/// Complex number
#[derive(Debug, Clone, Copy)]
pub struct Complex<T: Real = f32> {
    real: T,
    imaginary: T,
}

impl<T: Real> Default for Complex<T> {
    /// Identity rotation
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Complex<T> {
    /// Complex number from real and imaginary parts
    #[inline]
    pub const fn new(real: T, imaginary: T) -> Self {
        Self { real, imaginary }
    }

    /// Identity rotation, `1 + 0i`
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero())
    }

    /// Zero complex number
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// Counterclockwise rotation by `angle`
    pub fn rotation(angle: impl Into<Rad<T>>) -> Self {
        let (sine, cosine) = angle.into().sin_cos();
        Self::new(cosine, sine)
    }

    /// Complex number from a vector, `x + iy`
    pub fn from_vector(vector: Vector2<T>) -> Self {
        Self::new(vector.x(), vector.y())
    }

    /// Rotation from a 2x2 rotation matrix
    ///
    /// The matrix must be orthogonal.
    pub fn from_matrix(matrix: &Matrix2<T>) -> Result<Self> {
        if !matrix.is_orthogonal() {
            engine_bail!(LOG_SOURCE,
                "Complex::from_matrix(): the matrix is not orthogonal");
        }
        Ok(Self::new(matrix[0][0], matrix[0][1]))
    }

    /// Real part
    #[inline]
    pub fn real(&self) -> T {
        self.real
    }

    /// Imaginary part
    #[inline]
    pub fn imaginary(&self) -> T {
        self.imaginary
    }

    /// Vector `(real, imaginary)`
    pub fn to_vector(&self) -> Vector2<T> {
        Vector2::new(self.real, self.imaginary)
    }

    /// Rotation angle
    pub fn angle(&self) -> Rad<T> {
        Rad(self.imaginary.atan2(self.real))
    }

    /// 2x2 rotation matrix
    pub fn to_matrix(&self) -> Matrix2<T> {
        Matrix2::new(
            Vector2::new(self.real, self.imaginary),
            Vector2::new(-self.imaginary, self.real),
        )
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> T {
        self.real * other.real + self.imaginary * other.imaginary
    }

    /// Squared length
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    /// Length
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Normalized complex number
    pub fn normalized(&self) -> Self {
        *self / self.length()
    }

    /// Whether the complex number has unit length, within tolerance
    pub fn is_normalized(&self) -> bool {
        is_normalized_squared(self.length_squared())
    }

    /// Conjugated complex number
    pub fn conjugated(&self) -> Self {
        Self::new(self.real, -self.imaginary)
    }

    /// Inverted complex number
    pub fn inverted(&self) -> Self {
        self.conjugated() / self.length_squared()
    }

    /// Inverse of a normalized complex number, its conjugate
    pub fn inverted_normalized(&self) -> Result<Self> {
        if !self.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Complex::inverted_normalized(): {:?} is not normalized", self);
        }
        Ok(self.conjugated())
    }

    /// Inverse of a normalized complex number without the normalization check
    #[inline]
    pub fn inverted_normalized_unchecked(&self) -> Self {
        self.conjugated()
    }

    /// Rotate a vector
    pub fn transform_vector(&self, vector: Vector2<T>) -> Vector2<T> {
        Vector2::new(
            self.real * vector.x() - self.imaginary * vector.y(),
            self.imaginary * vector.x() + self.real * vector.y(),
        )
    }

    /// Normalized linear interpolation of two normalized rotations
    pub fn lerp(&self, other: &Self, t: T) -> Result<Self> {
        if !self.is_normalized() || !other.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Complex::lerp(): complex numbers must be normalized");
        }
        Ok((*self * (T::one() - t) + *other * t).normalized())
    }

    /// Spherical linear interpolation of two normalized rotations
    pub fn slerp(&self, other: &Self, t: T) -> Result<Self> {
        if !self.is_normalized() || !other.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Complex::slerp(): complex numbers must be normalized");
        }
        let cos_angle = self.dot(other);

        // Same or opposite rotation, the interpolation axis is undefined
        if cos_angle.abs() >= T::one() {
            return Ok(*self);
        }

        let angle = cos_angle.acos();
        Ok((*self * ((T::one() - t) * angle).sin() + *other * (t * angle).sin()) / angle.sin())
    }

    /// Angle between two normalized rotations
    pub fn angle_between(&self, other: &Self) -> Result<Rad<T>> {
        if !self.is_normalized() || !other.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Complex::angle_between(): complex numbers must be normalized");
        }
        Ok(Rad(self.dot(other).max(-T::one()).min(T::one()).acos()))
    }
}

impl<T: Real> PartialEq for Complex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.real.fuzzy_eq(other.real) && self.imaginary.fuzzy_eq(other.imaginary)
    }
}

impl<T: Real> Add for Complex<T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.real + other.real, self.imaginary + other.imaginary)
    }
}

impl<T: Real> Sub for Complex<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.real - other.real, self.imaginary - other.imaginary)
    }
}

impl<T: Real> Neg for Complex<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.real, -self.imaginary)
    }
}

impl<T: Real> Mul for Complex<T> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(
            self.real * other.real - self.imaginary * other.imaginary,
            self.imaginary * other.real + self.real * other.imaginary,
        )
    }
}

impl<T: Real> MulAssign for Complex<T> {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl<T: Real> Mul<T> for Complex<T> {
    type Output = Self;
    fn mul(self, scalar: T) -> Self {
        Self::new(self.real * scalar, self.imaginary * scalar)
    }
}

impl<T: Real> Div<T> for Complex<T> {
    type Output = Self;
    fn div(self, scalar: T) -> Self {
        Self::new(self.real / scalar, self.imaginary / scalar)
    }
}

#[cfg(test)]
#[path = "complex_tests.rs"]
mod tests;
