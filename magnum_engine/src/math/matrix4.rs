/// 3D transformation and projection matrices.

use crate::error::Result;
use crate::engine_bail;
use super::angle::Rad;
use super::matrix::{Matrix3, Matrix4};
use super::scalar::{Real, Scalar};
use super::vector::{Vector2, Vector3, Vector4};
use super::LOG_SOURCE;

impl<T: Scalar> Matrix4<T> {
    /// 4x4 matrix from columns
    pub fn new(c0: Vector4<T>, c1: Vector4<T>, c2: Vector4<T>, c3: Vector4<T>) -> Self {
        Self([c0, c1, c2, c3])
    }

    /// 3D translation matrix
    pub fn from_translation(vector: Vector3<T>) -> Self {
        let mut out = Self::identity();
        out[3] = vector.pad(T::one());
        out
    }

    /// 3D scaling matrix
    pub fn from_scaling(vector: Vector3<T>) -> Self {
        Self::from_diagonal(vector.pad(T::one()))
    }

    /// Matrix from a 3x3 rotation/scaling part and a translation
    pub fn from_parts(rotation_scaling: Matrix3<T>, translation: Vector3<T>) -> Self {
        Self::new(
            rotation_scaling[0].pad(T::zero()),
            rotation_scaling[1].pad(T::zero()),
            rotation_scaling[2].pad(T::zero()),
            translation.pad(T::one()),
        )
    }

    /// Upper-left 3x3 part
    pub fn rotation_scaling(&self) -> Matrix3<T> {
        Matrix3::new(self[0].xyz(), self[1].xyz(), self[2].xyz())
    }

    /// Translation part
    pub fn translation(&self) -> Vector3<T> {
        self[3].xyz()
    }

    /// Right-pointing 3D vector (first column)
    pub fn right(&self) -> Vector3<T> {
        self[0].xyz()
    }

    /// Up-pointing 3D vector (second column)
    pub fn up(&self) -> Vector3<T> {
        self[1].xyz()
    }

    /// Backward-pointing 3D vector (third column)
    pub fn backward(&self) -> Vector3<T> {
        self[2].xyz()
    }
}

impl<T: Real> Matrix4<T> {
    /// 3D rotation around an arbitrary axis
    ///
    /// The axis must be normalized.
    pub fn from_rotation(angle: impl Into<Rad<T>>, axis: Vector3<T>) -> Result<Self> {
        if !axis.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Matrix4::from_rotation(): axis {:?} is not normalized", axis.0);
        }
        Ok(Self::from_rotation_unchecked(angle, axis))
    }

    pub(crate) fn from_rotation_unchecked(angle: impl Into<Rad<T>>, axis: Vector3<T>) -> Self {
        let (sine, cosine) = angle.into().sin_cos();
        let one_minus_cosine = T::one() - cosine;

        let xx = axis.x() * axis.x();
        let xy = axis.x() * axis.y();
        let xz = axis.x() * axis.z();
        let yy = axis.y() * axis.y();
        let yz = axis.y() * axis.z();
        let zz = axis.z() * axis.z();

        Self::new(
            Vector4::new(
                cosine + xx * one_minus_cosine,
                xy * one_minus_cosine + axis.z() * sine,
                xz * one_minus_cosine - axis.y() * sine,
                T::zero(),
            ),
            Vector4::new(
                xy * one_minus_cosine - axis.z() * sine,
                cosine + yy * one_minus_cosine,
                yz * one_minus_cosine + axis.x() * sine,
                T::zero(),
            ),
            Vector4::new(
                xz * one_minus_cosine + axis.y() * sine,
                yz * one_minus_cosine - axis.x() * sine,
                cosine + zz * one_minus_cosine,
                T::zero(),
            ),
            Vector4::new(T::zero(), T::zero(), T::zero(), T::one()),
        )
    }

    /// 3D rotation around the X axis
    pub fn from_rotation_x(angle: impl Into<Rad<T>>) -> Self {
        let (sine, cosine) = angle.into().sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Self::new(
            Vector4::new(one, zero, zero, zero),
            Vector4::new(zero, cosine, sine, zero),
            Vector4::new(zero, -sine, cosine, zero),
            Vector4::new(zero, zero, zero, one),
        )
    }

    /// 3D rotation around the Y axis
    pub fn from_rotation_y(angle: impl Into<Rad<T>>) -> Self {
        let (sine, cosine) = angle.into().sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Self::new(
            Vector4::new(cosine, zero, -sine, zero),
            Vector4::new(zero, one, zero, zero),
            Vector4::new(sine, zero, cosine, zero),
            Vector4::new(zero, zero, zero, one),
        )
    }

    /// 3D rotation around the Z axis
    pub fn from_rotation_z(angle: impl Into<Rad<T>>) -> Self {
        let (sine, cosine) = angle.into().sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Self::new(
            Vector4::new(cosine, sine, zero, zero),
            Vector4::new(-sine, cosine, zero, zero),
            Vector4::new(zero, zero, one, zero),
            Vector4::new(zero, zero, zero, one),
        )
    }

    /// 3D reflection about a plane through the origin with given normal
    ///
    /// The normal must be normalized.
    pub fn from_reflection(normal: Vector3<T>) -> Result<Self> {
        if !normal.is_normalized() {
            engine_bail!(LOG_SOURCE,
                "Matrix4::from_reflection(): normal {:?} is not normalized", normal.0);
        }
        Ok(Self::from_reflection_unchecked(normal))
    }

    pub(crate) fn from_reflection_unchecked(normal: Vector3<T>) -> Self {
        let reflection = Matrix3::identity() - Matrix3::outer(normal, normal) * T::two();
        Self::from_parts(reflection, Vector3::zero())
    }

    /// Shearing of X and Y along the Z axis
    pub fn from_shearing_xy(amount_x: T, amount_y: T) -> Self {
        let mut out = Self::identity();
        out[2][0] = amount_x;
        out[2][1] = amount_y;
        out
    }

    /// Shearing of X and Z along the Y axis
    pub fn from_shearing_xz(amount_x: T, amount_z: T) -> Self {
        let mut out = Self::identity();
        out[1][0] = amount_x;
        out[1][2] = amount_z;
        out
    }

    /// Shearing of Y and Z along the X axis
    pub fn from_shearing_yz(amount_y: T, amount_z: T) -> Self {
        let mut out = Self::identity();
        out[0][1] = amount_y;
        out[0][2] = amount_z;
        out
    }

    /// Orthographic projection of a box of `size` between `near` and `far`
    pub fn orthographic_projection(size: Vector2<T>, near: T, far: T) -> Self {
        let xy_scale = Vector2::splat(T::two()) / size;
        let z_scale = T::two() / (near - far);
        let (zero, one) = (T::zero(), T::one());

        Self::new(
            Vector4::new(xy_scale.x(), zero, zero, zero),
            Vector4::new(zero, xy_scale.y(), zero, zero),
            Vector4::new(zero, zero, z_scale, zero),
            Vector4::new(zero, zero, near * z_scale - one, one),
        )
    }

    /// Perspective projection with the near plane of given `size`
    pub fn perspective_projection(size: Vector2<T>, near: T, far: T) -> Self {
        let xy_scale = Vector2::splat(T::two() * near) / size;
        let z_scale = T::one() / (near - far);
        let zero = T::zero();

        Self::new(
            Vector4::new(xy_scale.x(), zero, zero, zero),
            Vector4::new(zero, xy_scale.y(), zero, zero),
            Vector4::new(zero, zero, (far + near) * z_scale, -T::one()),
            Vector4::new(zero, zero, T::two() * far * near * z_scale, zero),
        )
    }

    /// Perspective projection from horizontal field of view and aspect ratio
    pub fn perspective_projection_fov(
        fov: impl Into<Rad<T>>,
        aspect_ratio: T,
        near: T,
        far: T,
    ) -> Self {
        let x_scale = T::two() * (fov.into().value() * T::half()).tan() * near;
        Self::perspective_projection(Vector2::new(x_scale, x_scale / aspect_ratio), near, far)
    }

    /// Rigid transformation placing an object at `eye` looking at `target`
    pub fn look_at(eye: Vector3<T>, target: Vector3<T>, up: Vector3<T>) -> Self {
        let backward = (eye - target).normalized();
        let right = up.cross(backward).normalized();
        let real_up = backward.cross(right);
        Self::from_parts(Matrix3::new(right, real_up, backward), eye)
    }

    /// Whether the matrix is a rigid transformation (rotation and translation only)
    pub fn is_rigid_transformation(&self) -> bool {
        self.rotation_scaling().is_orthogonal()
            && self.row(3) == Vector4::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Inverse of a rigid transformation
    pub fn inverted_rigid(&self) -> Result<Self> {
        if !self.is_rigid_transformation() {
            engine_bail!(LOG_SOURCE,
                "Matrix4::inverted_rigid(): the matrix doesn't represent a rigid transformation");
        }
        Ok(self.inverted_rigid_unchecked())
    }

    /// Inverse of a rigid transformation without the rigidity check
    pub fn inverted_rigid_unchecked(&self) -> Self {
        let inverse_rotation = self.rotation_scaling().transposed();
        Self::from_parts(inverse_rotation, -(inverse_rotation * self.translation()))
    }

    /// Transform a 3D direction (translation is ignored)
    pub fn transform_vector(&self, vector: Vector3<T>) -> Vector3<T> {
        self.rotation_scaling() * vector
    }

    /// Transform a 3D point, with perspective division
    pub fn transform_point(&self, point: Vector3<T>) -> Vector3<T> {
        let transformed = *self * point.pad(T::one());
        transformed.xyz() / transformed.w()
    }
}

#[cfg(test)]
#[path = "matrix4_tests.rs"]
mod tests;
