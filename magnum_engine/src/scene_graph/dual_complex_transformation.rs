/// 2D rigid transformations stored as unit dual complex numbers.

use std::marker::PhantomData;
use crate::error::Result;
use crate::math::{DualComplex, Matrix3, Rad, Real, Vector2};
use super::object::ObjectMut;
use super::transformation::Transformation;

/// 2D rigid transformation stored as a dual complex number
///
/// Only normalized dual complex numbers are accepted by the public setters.
#[derive(Debug, Clone, Copy, Default)]
pub struct DualComplexTransformation<T: Real = f32>(PhantomData<T>);

impl<T: Real> Transformation for DualComplexTransformation<T> {
    type Scalar = T;
    type DataType = DualComplex<T>;
    type Matrix = Matrix3<T>;
    const NAME: &'static str = "DualComplexTransformation";

    fn identity() -> DualComplex<T> {
        DualComplex::identity()
    }

    fn from_matrix(matrix: &Matrix3<T>) -> Result<DualComplex<T>> {
        DualComplex::from_matrix(matrix)
    }

    fn to_matrix(transformation: &DualComplex<T>) -> Matrix3<T> {
        transformation.to_matrix()
    }

    fn compose(parent: &DualComplex<T>, child: &DualComplex<T>) -> DualComplex<T> {
        *parent * *child
    }

    fn inverted(transformation: &DualComplex<T>) -> DualComplex<T> {
        transformation.inverted_normalized_unchecked()
    }

    fn validate(transformation: &DualComplex<T>) -> Option<&'static str> {
        (!transformation.is_normalized()).then_some("the dual complex number is not normalized")
    }
}

impl<T: Real> ObjectMut<'_, DualComplexTransformation<T>> {
    /// Renormalize the stored dual complex number
    pub fn normalize_rotation(&mut self) -> &mut Self {
        let normalized = self.transformation().normalized();
        self.set_transformation_unchecked(normalized)
    }

    pub fn translate(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_unchecked(DualComplex::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_local_unchecked(DualComplex::from_translation(vector))
    }

    pub fn rotate(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_unchecked(DualComplex::from_rotation(angle))
    }

    pub fn rotate_local(&mut self, angle: impl Into<Rad<T>>) -> &mut Self {
        self.transform_local_unchecked(DualComplex::from_rotation(angle))
    }
}

#[cfg(test)]
#[path = "dual_complex_transformation_tests.rs"]
mod tests;
