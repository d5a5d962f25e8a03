/// 3D rigid transformations stored as unit dual quaternions.

use std::marker::PhantomData;
use crate::error::Result;
use crate::math::{DualQuaternion, Matrix4, Quaternion, Rad, Real, Vector3};
use super::object::ObjectMut;
use super::transformation::Transformation;

/// 3D rigid transformation stored as a dual quaternion
///
/// Only normalized dual quaternions are accepted by the public setters.
#[derive(Debug, Clone, Copy, Default)]
pub struct DualQuaternionTransformation<T: Real = f32>(PhantomData<T>);

impl<T: Real> Transformation for DualQuaternionTransformation<T> {
    type Scalar = T;
    type DataType = DualQuaternion<T>;
    type Matrix = Matrix4<T>;
    const NAME: &'static str = "DualQuaternionTransformation";

    fn identity() -> DualQuaternion<T> {
        DualQuaternion::identity()
    }

    fn from_matrix(matrix: &Matrix4<T>) -> Result<DualQuaternion<T>> {
        DualQuaternion::from_matrix(matrix)
    }

    fn to_matrix(transformation: &DualQuaternion<T>) -> Matrix4<T> {
        transformation.to_matrix()
    }

    fn compose(parent: &DualQuaternion<T>, child: &DualQuaternion<T>) -> DualQuaternion<T> {
        *parent * *child
    }

    fn inverted(transformation: &DualQuaternion<T>) -> DualQuaternion<T> {
        transformation.inverted_normalized_unchecked()
    }

    fn validate(transformation: &DualQuaternion<T>) -> Option<&'static str> {
        (!transformation.is_normalized()).then_some("the dual quaternion is not normalized")
    }
}

impl<T: Real> ObjectMut<'_, DualQuaternionTransformation<T>> {
    /// Renormalize the stored dual quaternion
    pub fn normalize_rotation(&mut self) -> &mut Self {
        let normalized = self.transformation().normalized();
        self.set_transformation_unchecked(normalized)
    }

    pub fn translate(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_unchecked(DualQuaternion::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_local_unchecked(DualQuaternion::from_translation(vector))
    }

    /// Rotate around a normalized axis through the origin
    pub fn rotate(&mut self, angle: impl Into<Rad<T>>, normalized_axis: Vector3<T>) -> Result<&mut Self> {
        let rotation = DualQuaternion::from_rotation(angle, normalized_axis)?;
        Ok(self.transform_unchecked(rotation))
    }

    pub fn rotate_local(&mut self, angle: impl Into<Rad<T>>, normalized_axis: Vector3<T>) -> Result<&mut Self> {
        let rotation = DualQuaternion::from_rotation(angle, normalized_axis)?;
        Ok(self.transform_local_unchecked(rotation))
    }

    pub fn rotate_x(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_unchecked(axis_rotation(angle, Vector3::x_axis(T::one())))
    }

    pub fn rotate_x_local(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_local_unchecked(axis_rotation(angle, Vector3::x_axis(T::one())))
    }

    pub fn rotate_y(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_unchecked(axis_rotation(angle, Vector3::y_axis(T::one())))
    }

    pub fn rotate_y_local(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_local_unchecked(axis_rotation(angle, Vector3::y_axis(T::one())))
    }

    pub fn rotate_z(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_unchecked(axis_rotation(angle, Vector3::z_axis(T::one())))
    }

    pub fn rotate_z_local(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_local_unchecked(axis_rotation(angle, Vector3::z_axis(T::one())))
    }
}

fn axis_rotation<T: Real>(angle: impl Into<Rad<T>>, axis: Vector3<T>) -> DualQuaternion<T> {
    DualQuaternion::from_quaternion(Quaternion::rotation_unchecked(angle, axis))
}

#[cfg(test)]
#[path = "dual_quaternion_transformation_tests.rs"]
mod tests;
