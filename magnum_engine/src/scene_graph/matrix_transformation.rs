/// Arbitrary matrix transformations.
///
/// The local transformation is stored as a full homogeneous matrix, so any
/// affine transformation (including scaling, shearing and reflection) is
/// representable. Inversion is a general matrix inverse.

use std::marker::PhantomData;
use crate::error::Result;
use crate::math::{Matrix3, Matrix4, Rad, Real, Vector2, Vector3};
use super::object::ObjectMut;
use super::transformation::Transformation;

/// 2D transformation stored as a 3x3 matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixTransformation2D<T: Real = f32>(PhantomData<T>);

/// 3D transformation stored as a 4x4 matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixTransformation3D<T: Real = f32>(PhantomData<T>);

impl<T: Real> Transformation for MatrixTransformation2D<T> {
    type Scalar = T;
    type DataType = Matrix3<T>;
    type Matrix = Matrix3<T>;
    const NAME: &'static str = "MatrixTransformation2D";

    fn identity() -> Matrix3<T> {
        Matrix3::identity()
    }

    fn from_matrix(matrix: &Matrix3<T>) -> Result<Matrix3<T>> {
        Ok(*matrix)
    }

    fn to_matrix(transformation: &Matrix3<T>) -> Matrix3<T> {
        *transformation
    }

    fn compose(parent: &Matrix3<T>, child: &Matrix3<T>) -> Matrix3<T> {
        *parent * *child
    }

    fn inverted(transformation: &Matrix3<T>) -> Matrix3<T> {
        transformation.inverted_unchecked()
    }
}

impl<T: Real> Transformation for MatrixTransformation3D<T> {
    type Scalar = T;
    type DataType = Matrix4<T>;
    type Matrix = Matrix4<T>;
    const NAME: &'static str = "MatrixTransformation3D";

    fn identity() -> Matrix4<T> {
        Matrix4::identity()
    }

    fn from_matrix(matrix: &Matrix4<T>) -> Result<Matrix4<T>> {
        Ok(*matrix)
    }

    fn to_matrix(transformation: &Matrix4<T>) -> Matrix4<T> {
        *transformation
    }

    fn compose(parent: &Matrix4<T>, child: &Matrix4<T>) -> Matrix4<T> {
        *parent * *child
    }

    fn inverted(transformation: &Matrix4<T>) -> Matrix4<T> {
        transformation.inverted_unchecked()
    }
}

// ===== 2D CONVENIENCE =====

impl<T: Real> ObjectMut<'_, MatrixTransformation2D<T>> {
    /// Translate the object, applied after the current transformation
    pub fn translate(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_unchecked(Matrix3::from_translation(vector))
    }

    /// Translate the object, applied before the current transformation
    pub fn translate_local(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_local_unchecked(Matrix3::from_translation(vector))
    }

    /// Rotate the object counterclockwise around the origin
    pub fn rotate(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_unchecked(Matrix3::from_rotation(angle))
    }

    pub fn rotate_local(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_local_unchecked(Matrix3::from_rotation(angle))
    }

    /// Scale the object
    pub fn scale(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_unchecked(Matrix3::from_scaling(vector))
    }

    pub fn scale_local(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_local_unchecked(Matrix3::from_scaling(vector))
    }

    /// Reflect the object around a line through the origin
    ///
    /// `normal` must be normalized.
    pub fn reflect(&mut self, normal: Vector2<T>) -> Result<&mut Self> {
        let reflection = Matrix3::from_reflection(normal)?;
        Ok(self.transform_unchecked(reflection))
    }

    pub fn reflect_local(&mut self, normal: Vector2<T>) -> Result<&mut Self> {
        let reflection = Matrix3::from_reflection(normal)?;
        Ok(self.transform_local_unchecked(reflection))
    }
}

// ===== 3D CONVENIENCE =====

impl<T: Real> ObjectMut<'_, MatrixTransformation3D<T>> {
    /// Translate the object, applied after the current transformation
    pub fn translate(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_unchecked(Matrix4::from_translation(vector))
    }

    /// Translate the object, applied before the current transformation
    pub fn translate_local(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_local_unchecked(Matrix4::from_translation(vector))
    }

    /// Rotate the object around a normalized axis through the origin
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

    /// Scale the object
    pub fn scale(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_unchecked(Matrix4::from_scaling(vector))
    }

    pub fn scale_local(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_local_unchecked(Matrix4::from_scaling(vector))
    }

    /// Reflect the object around a plane through the origin
    ///
    /// `normal` must be normalized.
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
#[path = "matrix_transformation_tests.rs"]
mod tests;
