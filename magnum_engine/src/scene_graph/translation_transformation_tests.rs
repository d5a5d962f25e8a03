//! Unit tests for translation_transformation.rs

use super::*;
use crate::error::Error;
use crate::math::Deg;
use crate::scene_graph::Scene;

#[test]
fn test_compose_and_invert() {
    let parent = Vector3::new(1.0f32, 2.0, 3.0);
    let child = Vector3::new(-4.0f32, 0.5, 0.0);

    assert_eq!(TranslationTransformation3D::compose(&parent, &child), Vector3::new(-3.0, 2.5, 3.0));
    assert_eq!(TranslationTransformation3D::inverted(&parent), Vector3::new(-1.0, -2.0, -3.0));
    assert_eq!(
        TranslationTransformation3D::to_matrix(&parent),
        Matrix4::from_translation(parent)
    );
}

#[test]
fn test_from_matrix_requires_pure_translation() {
    let matrix = Matrix3::from_translation(Vector2::new(3.0f32, 4.0));
    assert_eq!(TranslationTransformation2D::from_matrix(&matrix).unwrap(), Vector2::new(3.0, 4.0));

    let rotation = Matrix3::<f32>::from_rotation(Deg(10.0f32));
    assert!(matches!(TranslationTransformation2D::from_matrix(&rotation), Err(Error::Precondition(_))));
}

#[test]
fn test_translate_accumulates() {
    let mut scene = Scene::<TranslationTransformation2D>::new();
    let root = scene.root();
    let parent = scene.add_object(Some(root)).unwrap();
    let child = scene.add_object(Some(parent)).unwrap();

    scene.object_mut(parent).unwrap().translate(Vector2::new(1.0, 1.0));
    scene.object_mut(child).unwrap()
        .translate(Vector2::new(2.0, 0.0))
        .translate_local(Vector2::new(0.0, -3.0));

    assert_eq!(scene.transformation(child).unwrap(), Vector2::new(2.0, -3.0));
    assert_eq!(scene.absolute_transformation(child).unwrap(), Vector2::new(3.0, -2.0));
    assert_eq!(
        scene.absolute_transformation_matrix(child).unwrap(),
        Matrix3::from_translation(Vector2::new(3.0, -2.0))
    );
}
