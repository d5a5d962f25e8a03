/// Dual quaternions as 3D rigid transformations.
///
/// The real part is a rotation quaternion `r`, the dual part is
/// `½ · t · r` where `t` is the translation as a pure quaternion. A dual
/// quaternion is normalized when `|r| = 1` and `r · d = 0`.

use std::ops::Mul;
use crate::error::Result;
use crate::engine_bail;
use super::angle::Rad;
use super::matrix::Matrix4;
use super::quaternion::Quaternion;
use super::scalar::{is_normalized_squared, Real};
use super::vector::Vector3;
use super::LOG_SOURCE;

/// Dual quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualQuaternion<T: Real = f32> {
    real: Quaternion<T>,
    dual: Quaternion<T>,
}

impl<T: Real> Default for DualQuaternion<T> {
    /// Identity transformation
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> DualQuaternion<T> {
    /// Dual quaternion from real and dual parts
    #[inline]
    pub const fn new(real: Quaternion<T>, dual: Quaternion<T>) -> Self {
        Self { real, dual }
    }

    /// Identity transformation
    pub fn identity() -> Self {
        Self::new(Quaternion::identity(), Quaternion::zero())
    }

    /// Rotation by `angle` around a normalized `axis` through the origin
    pub fn from_rotation(angle: impl Into<Rad<T>>, axis: Vector3<T>) -> Result<Self> {
        Ok(Self::from_quaternion(Quaternion::rotation(angle, axis)?))
    }

    /// Pure rotation from a rotation quaternion
    pub fn from_quaternion(rotation: Quaternion<T>) -> Self {
        Self::new(rotation, Quaternion::zero())
    }

    /// Translation
    pub fn from_translation(vector: Vector3<T>) -> Self {
        Self::new(Quaternion::identity(), Quaternion::from_vector(vector * T::half()))
    }

    /// Rotation followed by translation
    pub fn from_parts(rotation: Quaternion<T>, translation: Vector3<T>) -> Self {
        Self::from_translation(translation) * Self::from_quaternion(rotation)
    }

    /// Rigid transformation from a 4x4 matrix
    ///
    /// The matrix must represent a rigid transformation.
    pub fn from_matrix(matrix: &Matrix4<T>) -> Result<Self> {
        if !matrix.is_rigid_transformation() {
            engine_bail!(LOG_SOURCE,
                "DualQuaternion::from_matrix(): the matrix doesn't represent a rigid transformation");
        }
        Ok(Self::from_matrix_unchecked(matrix))
    }

    pub(crate) fn from_matrix_unchecked(matrix: &Matrix4<T>) -> Self {
        let rotation = Quaternion::from_matrix_unchecked(&matrix.rotation_scaling());
        Self::from_parts(rotation, matrix.translation())
    }

    /// Real part
    #[inline]
    pub fn real(&self) -> Quaternion<T> {
        self.real
    }

    /// Dual part
    #[inline]
    pub fn dual(&self) -> Quaternion<T> {
        self.dual
    }

    /// Rotation part
    #[inline]
    pub fn rotation(&self) -> Quaternion<T> {
        self.real
    }

    /// Translation part, `2 · (d · r*)`
    pub fn translation(&self) -> Vector3<T> {
        (self.dual * self.real.conjugated()).vector() * T::two()
    }

    /// 4x4 transformation matrix
    pub fn to_matrix(&self) -> Matrix4<T> {
        Matrix4::from_parts(self.real.to_matrix(), self.translation())
    }

    /// Squared length of the real part
    pub fn length_squared(&self) -> T {
        self.real.length_squared()
    }

    /// Length of the real part
    pub fn length(&self) -> T {
        self.real.length()
    }

    /// Whether the real part has unit length and is orthogonal to the dual part
    pub fn is_normalized(&self) -> bool {
        let tolerance = T::two() * T::comparison_epsilon() * T::one().max(self.dual.length());
        is_normalized_squared(self.length_squared()) && self.real.dot(&self.dual).abs() < tolerance
    }

    /// Normalized dual quaternion
    pub fn normalized(&self) -> Self {
        let length = self.length();
        let real = self.real / length;
        let dual = self.dual / length;
        Self::new(real, dual - real * real.dot(&dual))
    }

    /// Quaternion-conjugated, `(r*, d*)`
    pub fn quaternion_conjugated(&self) -> Self {
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
        let real = self.real.inverted();
        Self::new(real, -(real * self.dual * real))
    }

    /// Inverse of a normalized dual quaternion, its quaternion conjugate
    pub fn inverted_normalized(&self) -> Result<Self> {
        if !self.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "DualQuaternion::inverted_normalized(): {:?} is not normalized", self);
        }
        Ok(self.quaternion_conjugated())
    }

    /// Inverse of a normalized dual quaternion without the normalization check
    #[inline]
    pub fn inverted_normalized_unchecked(&self) -> Self {
        self.quaternion_conjugated()
    }

    /// Rotate a vector (translation is ignored)
    pub fn transform_vector(&self, vector: Vector3<T>) -> Vector3<T> {
        self.real.transform_vector(vector)
    }

    /// Transform a point
    pub fn transform_point(&self, point: Vector3<T>) -> Vector3<T> {
        self.real.transform_vector(point) + self.translation()
    }
}

impl<T: Real> Mul for DualQuaternion<T> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(
            self.real * other.real,
            self.real * other.dual + self.dual * other.real,
        )
    }
}

#[cfg(test)]
#[path = "dual_quaternion_tests.rs"]
mod tests;
