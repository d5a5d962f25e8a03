/// Rigid matrix transformations.
///
/// Same storage as the plain matrix policies but restricted to rotation,
/// reflection and translation, which allows a cheap transpose-based
/// inverse. Accumulated rounding errors can be removed with
/// `normalize_rotation`.

use std::marker::PhantomData;
use crate::engine_bail;
use crate::error::Result;
use crate::math::{Matrix3, Matrix4, Rad, Real, Vector2, Vector3};
use super::object::ObjectMut;
use super::transformation::Transformation;
use super::LOG_SOURCE;

/// 2D rigid transformation stored as a 3x3 matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct RigidMatrixTransformation2D<T: Real = f32>(PhantomData<T>);

/// 3D rigid transformation stored as a 4x4 matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct RigidMatrixTransformation3D<T: Real = f32>(PhantomData<T>);

const NOT_RIGID: &str = "the matrix doesn't represent rigid transformation";

impl<T: Real> Transformation for RigidMatrixTransformation2D<T> {
    type Scalar = T;
    type DataType = Matrix3<T>;
    type Matrix = Matrix3<T>;
    const NAME: &'static str = "RigidMatrixTransformation2D";

    fn identity() -> Matrix3<T> {
        Matrix3::identity()
    }

    fn from_matrix(matrix: &Matrix3<T>) -> Result<Matrix3<T>> {
        if !matrix.is_rigid_transformation() {
            engine_bail!(LOG_SOURCE, "{}::from_matrix(): {}", Self::NAME, NOT_RIGID);
        }
        Ok(*matrix)
    }

    fn to_matrix(transformation: &Matrix3<T>) -> Matrix3<T> {
        *transformation
    }

    fn compose(parent: &Matrix3<T>, child: &Matrix3<T>) -> Matrix3<T> {
        *parent * *child
    }

    fn inverted(transformation: &Matrix3<T>) -> Matrix3<T> {
        transformation.inverted_rigid_unchecked()
    }

    fn validate(transformation: &Matrix3<T>) -> Option<&'static str> {
        (!transformation.is_rigid_transformation()).then_some(NOT_RIGID)
    }
}

impl<T: Real> Transformation for RigidMatrixTransformation3D<T> {
    type Scalar = T;
    type DataType = Matrix4<T>;
    type Matrix = Matrix4<T>;
    const NAME: &'static str = "RigidMatrixTransformation3D";

    fn identity() -> Matrix4<T> {
        Matrix4::identity()
    }

    fn from_matrix(matrix: &Matrix4<T>) -> Result<Matrix4<T>> {
        if !matrix.is_rigid_transformation() {
            engine_bail!(LOG_SOURCE, "{}::from_matrix(): {}", Self::NAME, NOT_RIGID);
        }
        Ok(*matrix)
    }

    fn to_matrix(transformation: &Matrix4<T>) -> Matrix4<T> {
        *transformation
    }

    fn compose(parent: &Matrix4<T>, child: &Matrix4<T>) -> Matrix4<T> {
        *parent * *child
    }

    fn inverted(transformation: &Matrix4<T>) -> Matrix4<T> {
        transformation.inverted_rigid_unchecked()
    }

    fn validate(transformation: &Matrix4<T>) -> Option<&'static str> {
        (!transformation.is_rigid_transformation()).then_some(NOT_RIGID)
    }
}

impl<T: Real> ObjectMut<'_, RigidMatrixTransformation2D<T>> {
    /// Re-orthonormalize the rotation part, keeping the translation
    pub fn normalize_rotation(&mut self) -> &mut Self {
        let current = self.transformation();
        let rotation = current.rotation_scaling().orthonormalized();
        self.set_transformation_unchecked(Matrix3::from_parts(rotation, current.translation()))
    }

    pub fn translate(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_unchecked(Matrix3::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_local_unchecked(Matrix3::from_translation(vector))
    }

    pub fn rotate(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_unchecked(Matrix3::from_rotation(angle))
    }

    pub fn rotate_local(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_local_unchecked(Matrix3::from_rotation(angle))
    }

    /// Reflect around a line through the origin, `normal` must be normalized
    pub fn reflect(&mut self, normal: Vector2<T>) -> Result<&mut Self> {
        let reflection = Matrix3::from_reflection(normal)?;
        Ok(self.transform_unchecked(reflection))
    }

    pub fn reflect_local(&mut self, normal: Vector2<T>) -> Result<&mut Self> {
        let reflection = Matrix3::from_reflection(normal)?;
        Ok(self.transform_local_unchecked(reflection))
    }
}

impl<T: Real> ObjectMut<'_, RigidMatrixTransformation3D<T>> {
    /// Re-orthonormalize the rotation part, keeping the translation
    pub fn normalize_rotation(&mut self) -> &mut Self {
        let current = self.transformation();
        let rotation = current.rotation_scaling().orthonormalized();
        self.set_transformation_unchecked(Matrix4::from_parts(rotation, current.translation()))
    }

    pub fn translate(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_unchecked(Matrix4::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_local_unchecked(Matrix4::from_translation(vector))
    }

    /// Rotate around a normalized axis through the origin
    pub fn rotate(&mut self, angle: impl Into<Rad<T>>, normalized_axis: Vector3<T>) -> Result<&mut Self> {
        let rotation = Matrix4::from_rotation(angle, normalized_axis)?;
        Ok(self.transform_unchecked(rotation))
    }

    pub fn rotate_local(&mut self, angle: impl Into<Rad<T>>, normalized_axis: Vector3<T>) -> Result<&mut Self> {
        let rotation = Matrix4::from_rotation(angle, normalized_axis)?;
        Ok(self.transform_local_unchecked(rotation))
    }

    pub fn rotate_x(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_unchecked(Matrix4::from_rotation_x(angle))
    }

    pub fn rotate_x_local(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_local_unchecked(Matrix4::from_rotation_x(angle))
    }

    pub fn rotate_y(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_unchecked(Matrix4::from_rotation_y(angle))
    }

    pub fn rotate_y_local(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_local_unchecked(Matrix4::from_rotation_y(angle))
    }

    pub fn rotate_z(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_unchecked(Matrix4::from_rotation_z(angle))
    }

    pub fn rotate_z_local(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_local_unchecked(Matrix4::from_rotation_z(angle))
    }

    /// Reflect around a plane through the origin, `normal` must be normalized
    pub fn reflect(&mut self, normal: Vector3<T>) -> Result<&mut Self> {
        let reflection = Matrix4::from_reflection(normal)?;
        Ok(self.transform_unchecked(reflection))
    }

    pub fn reflect_local(&mut self, normal: Vector3<T>) -> Result<&mut Self> {
        let reflection = Matrix4::from_reflection(normal)?;
        Ok(self.transform_local_unchecked(reflection))
    }
}

#[cfg(test)]
#[path = "rigid_matrix_transformation_tests.rs"]
mod tests;
