/// Quaternions as 3D rotations.
///
/// A normalized quaternion `(axis · sin(θ/2), cos(θ/2))` represents a
/// rotation by `θ` around `axis`. Products compose rotations, with the
/// right operand applied first.

use std::ops::{Add, Div, Mul, MulAssign, Neg, Sub};
use crate::error::Result;
use crate::engine_bail;
use super::angle::Rad;
use super::matrix::Matrix3;
use super::scalar::{is_normalized_squared, Real};
use super::vector::Vector3;
use super::LOG_SOURCE;

/// Quaternion, vector part and scalar part
#[derive(Debug, Clone, Copy)]
pub struct Quaternion<T: Real = f32> {
    vector: Vector3<T>,
    scalar: T,
}

impl<T: Real> Default for Quaternion<T> {
    /// Identity rotation
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Quaternion<T> {
    /// Quaternion from vector and scalar parts
    #[inline]
    pub const fn new(vector: Vector3<T>, scalar: T) -> Self {
        Self { vector, scalar }
    }

    /// Identity rotation, `([0, 0, 0], 1)`
    pub fn identity() -> Self {
        Self::new(Vector3::zero(), T::one())
    }

    /// Zero quaternion
    pub fn zero() -> Self {
        Self::new(Vector3::zero(), T::zero())
    }

    /// Pure quaternion `(vector, 0)`
    pub fn from_vector(vector: Vector3<T>) -> Self {
        Self::new(vector, T::zero())
    }

    /// Rotation by `angle` around a normalized `axis`
    pub fn rotation(angle: impl Into<Rad<T>>, axis: Vector3<T>) -> Result<Self> {
        if !axis.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Quaternion::rotation(): axis {:?} is not normalized", axis.0);
        }
        Ok(Self::rotation_unchecked(angle, axis))
    }

    pub(crate) fn rotation_unchecked(angle: impl Into<Rad<T>>, axis: Vector3<T>) -> Self {
        let (sine, cosine) = (angle.into().value() * T::half()).sin_cos();
        Self::new(axis * sine, cosine)
    }

    /// Rotation from a 3x3 rotation matrix
    ///
    /// The matrix must be orthogonal.
    pub fn from_matrix(matrix: &Matrix3<T>) -> Result<Self> {
        if !matrix.is_orthogonal() {
            engine_bail!(LOG_SOURCE,
                "Quaternion::from_matrix(): the matrix is not orthogonal");
        }
        Ok(Self::from_matrix_unchecked(matrix))
    }

    pub(crate) fn from_matrix_unchecked(m: &Matrix3<T>) -> Self {
        let trace = m.trace();

        if trace > T::zero() {
            let s = (trace + T::one()).sqrt();
            let t = T::half() / s;
            return Self::new(
                Vector3::new(m[1][2] - m[2][1], m[2][0] - m[0][2], m[0][1] - m[1][0]) * t,
                s * T::half(),
            );
        }

        // Diagonal element with the largest value
        let mut i = 0;
        if m[1][1] > m[0][0] {
            i = 1;
        }
        if m[2][2] > m[i][i] {
            i = 2;
        }
        let j = (i + 1) % 3;
        let k = (j + 1) % 3;

        let s = (m[i][i] - m[j][j] - m[k][k] + T::one()).sqrt();
        let t = if s == T::zero() { T::zero() } else { T::half() / s };

        let mut vector = Vector3::zero();
        vector[i] = s * T::half();
        vector[j] = (m[i][j] + m[j][i]) * t;
        vector[k] = (m[i][k] + m[k][i]) * t;

        Self::new(vector, (m[j][k] - m[k][j]) * t)
    }

    /// Vector part
    #[inline]
    pub fn vector(&self) -> Vector3<T> {
        self.vector
    }

    /// Scalar part
    #[inline]
    pub fn scalar(&self) -> T {
        self.scalar
    }

    /// Rotation angle of a normalized quaternion
    pub fn angle(&self) -> Rad<T> {
        Rad(T::two() * self.scalar.max(-T::one()).min(T::one()).acos())
    }

    /// Rotation axis of a normalized quaternion
    ///
    /// Undefined (non-finite) for the identity rotation.
    pub fn axis(&self) -> Vector3<T> {
        self.vector / (T::one() - self.scalar * self.scalar).sqrt()
    }

    /// 3x3 rotation matrix
    pub fn to_matrix(&self) -> Matrix3<T> {
        let v = self.vector;
        let w = self.scalar;
        let two = T::two();
        let one = T::one();

        Matrix3::new(
            Vector3::new(
                one - two * v.y() * v.y() - two * v.z() * v.z(),
                two * v.x() * v.y() + two * v.z() * w,
                two * v.x() * v.z() - two * v.y() * w,
            ),
            Vector3::new(
                two * v.x() * v.y() - two * v.z() * w,
                one - two * v.x() * v.x() - two * v.z() * v.z(),
                two * v.y() * v.z() + two * v.x() * w,
            ),
            Vector3::new(
                two * v.x() * v.z() + two * v.y() * w,
                two * v.y() * v.z() - two * v.x() * w,
                one - two * v.x() * v.x() - two * v.y() * v.y(),
            ),
        )
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> T {
        self.vector.dot(other.vector) + self.scalar * other.scalar
    }

    /// Squared length
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    /// Length
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Normalized quaternion
    pub fn normalized(&self) -> Self {
        *self / self.length()
    }

    /// Whether the quaternion has unit length, within tolerance
    pub fn is_normalized(&self) -> bool {
        is_normalized_squared(self.length_squared())
    }

    /// Conjugated quaternion
    pub fn conjugated(&self) -> Self {
        Self::new(-self.vector, self.scalar)
    }

    /// Inverted quaternion
    pub fn inverted(&self) -> Self {
        self.conjugated() / self.length_squared()
    }

    /// Inverse of a normalized quaternion, its conjugate
    pub fn inverted_normalized(&self) -> Result<Self> {
        if !self.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Quaternion::inverted_normalized(): {:?} is not normalized", self);
        }
        Ok(self.conjugated())
    }

    /// Inverse of a normalized quaternion without the normalization check
    #[inline]
    pub fn inverted_normalized_unchecked(&self) -> Self {
        self.conjugated()
    }

    /// Rotate a vector, `q v q⁻¹`
    pub fn transform_vector(&self, vector: Vector3<T>) -> Vector3<T> {
        (*self * Self::from_vector(vector) * self.inverted()).vector
    }

    /// Rotate a vector with a normalized quaternion
    pub fn transform_vector_normalized(&self, vector: Vector3<T>) -> Result<Vector3<T>> {
        if !self.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Quaternion::transform_vector_normalized(): {:?} is not normalized", self);
        }
        Ok(self.transform_vector_normalized_unchecked(vector))
    }

    /// Rotate a vector with a normalized quaternion, without the normalization check
    pub fn transform_vector_normalized_unchecked(&self, vector: Vector3<T>) -> Vector3<T> {
        let t = self.vector.cross(vector) * T::two();
        vector + t * self.scalar + self.vector.cross(t)
    }

    /// Normalized linear interpolation of two normalized rotations
    pub fn lerp(&self, other: &Self, t: T) -> Result<Self> {
        if !self.is_normalized() || !other.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Quaternion::lerp(): quaternions must be normalized");
        }
        Ok((*self * (T::one() - t) + *other * t).normalized())
    }

    /// Spherical linear interpolation of two normalized rotations, shortest path
    pub fn slerp(&self, other: &Self, t: T) -> Result<Self> {
        if !self.is_normalized() || !other.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Quaternion::slerp(): quaternions must be normalized");
        }

        let mut cos_half_angle = self.dot(other);
        let mut target = *other;
        if cos_half_angle < T::zero() {
            cos_half_angle = -cos_half_angle;
            target = -target;
        }

        // Nearly identical rotations, fall back to linear interpolation
        if cos_half_angle >= T::one() - T::comparison_epsilon() {
            return Ok((*self * (T::one() - t) + target * t).normalized());
        }

        let half_angle = cos_half_angle.acos();
        Ok((*self * ((T::one() - t) * half_angle).sin() + target * (t * half_angle).sin())
            / half_angle.sin())
    }

    /// Angle between two normalized rotations
    pub fn angle_between(&self, other: &Self) -> Result<Rad<T>> {
        if !self.is_normalized() || !other.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Quaternion::angle_between(): quaternions must be normalized");
        }
        Ok(Rad(T::two() * self.dot(other).abs().min(T::one()).acos()))
    }
}

impl<T: Real> PartialEq for Quaternion<T> {
    fn eq(&self, other: &Self) -> bool {
        self.vector == other.vector && self.scalar.fuzzy_eq(other.scalar)
    }
}

impl<T: Real> Add for Quaternion<T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.vector + other.vector, self.scalar + other.scalar)
    }
}

impl<T: Real> Sub for Quaternion<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.vector - other.vector, self.scalar - other.scalar)
    }
}

impl<T: Real> Neg for Quaternion<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.vector, -self.scalar)
    }
}

impl<T: Real> Mul for Quaternion<T> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(
            other.vector * self.scalar + self.vector * other.scalar + self.vector.cross(other.vector),
            self.scalar * other.scalar - self.vector.dot(other.vector),
        )
    }
}

impl<T: Real> MulAssign for Quaternion<T> {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl<T: Real> Mul<T> for Quaternion<T> {
    type Output = Self;
    fn mul(self, scalar: T) -> Self {
        Self::new(self.vector * scalar, self.scalar * scalar)
    }
}

impl<T: Real> Div<T> for Quaternion<T> {
    type Output = Self;
    fn div(self, scalar: T) -> Self {
        Self::new(self.vector / scalar, self.scalar / scalar)
    }
}

#[cfg(test)]
#[path = "quaternion_tests.rs"]
mod tests;
