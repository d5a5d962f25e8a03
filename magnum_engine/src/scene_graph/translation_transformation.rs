/// Translation-only transformations.
///
/// The local transformation is a plain vector; composition is addition and
/// inversion is negation.

use std::marker::PhantomData;
use crate::engine_bail;
use crate::error::Result;
use crate::math::{Matrix3, Matrix4, Real, Vector2, Vector3};
use super::object::ObjectMut;
use super::transformation::Transformation;
use super::LOG_SOURCE;

/// 2D translation stored as a vector
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslationTransformation2D<T: Real = f32>(PhantomData<T>);

/// 3D translation stored as a vector
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslationTransformation3D<T: Real = f32>(PhantomData<T>);

const NOT_TRANSLATION: &str = "the matrix doesn't represent pure translation";

impl<T: Real> Transformation for TranslationTransformation2D<T> {
    type Scalar = T;
    type DataType = Vector2<T>;
    type Matrix = Matrix3<T>;
    const NAME: &'static str = "TranslationTransformation2D";

    fn identity() -> Vector2<T> {
        Vector2::zero()
    }

    fn from_matrix(matrix: &Matrix3<T>) -> Result<Vector2<T>> {
        if !matrix.rotation_scaling().is_identity() {
            engine_bail!(LOG_SOURCE, "{}::from_matrix(): {}", Self::NAME, NOT_TRANSLATION);
        }
        Ok(matrix.translation())
    }

    fn to_matrix(transformation: &Vector2<T>) -> Matrix3<T> {
        Matrix3::from_translation(*transformation)
    }

    fn compose(parent: &Vector2<T>, child: &Vector2<T>) -> Vector2<T> {
        *parent + *child
    }

    fn inverted(transformation: &Vector2<T>) -> Vector2<T> {
        -*transformation
    }
}

impl<T: Real> Transformation for TranslationTransformation3D<T> {
    type Scalar = T;
    type DataType = Vector3<T>;
    type Matrix = Matrix4<T>;
    const NAME: &'static str = "TranslationTransformation3D";

    fn identity() -> Vector3<T> {
        Vector3::zero()
    }

    fn from_matrix(matrix: &Matrix4<T>) -> Result<Vector3<T>> {
        if !matrix.rotation_scaling().is_identity() {
            engine_bail!(LOG_SOURCE, "{}::from_matrix(): {}", Self::NAME, NOT_TRANSLATION);
        }
        Ok(matrix.translation())
    }

    fn to_matrix(transformation: &Vector3<T>) -> Matrix4<T> {
        Matrix4::from_translation(*transformation)
    }

    fn compose(parent: &Vector3<T>, child: &Vector3<T>) -> Vector3<T> {
        *parent + *child
    }

    fn inverted(transformation: &Vector3<T>) -> Vector3<T> {
        -*transformation
    }
}

// Translations commute, so the local variants are the same operation

impl<T: Real> ObjectMut<'_, TranslationTransformation2D<T>> {
    pub fn translate(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_unchecked(vector)
    }

    pub fn translate_local(&mut self, vector: Vector2<T>) -> &mut Self {
        self.transform_local_unchecked(vector)
    }
}

impl<T: Real> ObjectMut<'_, TranslationTransformation3D<T>> {
    pub fn translate(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_unchecked(vector)
    }

    pub fn translate_local(&mut self, vector: Vector3<T>) -> &mut Self {
        self.transform_local_unchecked(vector)
    }
}

#[cfg(test)]
#[path = "translation_transformation_tests.rs"]
mod tests;
