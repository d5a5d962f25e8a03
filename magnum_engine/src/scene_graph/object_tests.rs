//! Unit tests for object.rs
//!
//! Tests the Object accessors and the ObjectMut transformation setters.

use super::*;
use crate::error::Error;
use crate::math::{Complex, Deg, DualComplex, Matrix4, Vector2, Vector3};
use crate::scene_graph::{DualComplexTransformation, MatrixTransformation3D};

fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

// ============================================================================
// OBJECT
// ============================================================================

#[test]
fn test_object_flags() {
    let object = Object::<MatrixTransformation3D>::new();
    assert!(object.is_dirty());
    assert!(!object.is_scene());
    assert_eq!(object.flags(), ObjectFlags::DIRTY);

    let root = Object::<MatrixTransformation3D>::new_scene();
    assert!(!root.is_dirty());
    assert!(root.is_scene());
    assert_eq!(root.cached_absolute_transformation(), Some(Matrix4::identity()));
}

// ============================================================================
// OBJECT MUT
// ============================================================================

#[test]
fn test_set_and_reset_transformation() {
    let mut scene = Scene::<MatrixTransformation3D>::new();
    let key = scene.add_object(None).unwrap();
    let mut object = scene.object_mut(key).unwrap();

    object.set_transformation(translation(1.0, 2.0, 3.0)).unwrap();
    assert_eq!(object.transformation(), translation(1.0, 2.0, 3.0));
    assert_eq!(object.transformation_matrix(), translation(1.0, 2.0, 3.0));

    object.reset_transformation();
    assert!(object.transformation().is_identity());
    assert_eq!(object.key(), key);
}

#[test]
fn test_transform_applies_after_current() {
    let mut scene = Scene::<MatrixTransformation3D>::new();
    let key = scene.add_object(None).unwrap();
    let rotation = Matrix4::from_rotation_z(Deg(90.0f32));

    let mut object = scene.object_mut(key).unwrap();
    object.set_transformation(translation(1.0, 0.0, 0.0)).unwrap();
    object.transform(rotation).unwrap();
    assert_eq!(object.transformation(), rotation * translation(1.0, 0.0, 0.0));

    object.set_transformation(translation(1.0, 0.0, 0.0)).unwrap();
    object.transform_local(rotation).unwrap();
    assert_eq!(object.transformation(), translation(1.0, 0.0, 0.0) * rotation);
}

#[test]
fn test_handle_clean_and_dirty() {
    let mut scene = Scene::<MatrixTransformation3D>::new();
    let root = scene.root();
    let key = scene.add_object(Some(root)).unwrap();

    let mut object = scene.object_mut(key).unwrap();
    assert!(object.is_dirty());
    object.set_clean();
    assert!(!object.is_dirty());
    assert_eq!(object.object().cached_absolute_transformation(), Some(Matrix4::identity()));

    object.set_dirty();
    assert!(object.is_dirty());
}

#[test]
fn test_handle_set_parent() {
    let mut scene = Scene::<MatrixTransformation3D>::new();
    let parent = scene.add_object(None).unwrap();
    let key = scene.add_object(None).unwrap();
    scene.object_mut(parent).unwrap().translate(Vector3::new(0.0, 1.0, 0.0));

    let mut object = scene.object_mut(key).unwrap();
    object.set_parent(Some(parent)).unwrap();
    assert_eq!(object.object().parent(), Some(parent));
    assert_eq!(object.absolute_transformation(), translation(0.0, 1.0, 0.0));
}

#[test]
fn test_rejected_transformation_leaves_object_unchanged() {
    let mut scene = Scene::<DualComplexTransformation>::new();
    let key = scene.add_object(Some(scene.root())).unwrap();
    scene.set_clean(key).unwrap();

    let not_normalized = DualComplex::new(Complex::new(1.0, 2.0), Complex::new(3.0, 4.0));
    let mut object = scene.object_mut(key).unwrap();

    let error = object.set_transformation(not_normalized).err().unwrap();
    assert_eq!(
        error,
        Error::Precondition(
            "DualComplexTransformation::set_transformation(): the dual complex number is not normalized"
                .to_string()
        )
    );
    assert!(matches!(object.transform(not_normalized), Err(Error::Precondition(message))
        if message.starts_with("DualComplexTransformation::transform():")));
    assert!(matches!(object.transform_local(not_normalized), Err(Error::Precondition(_))));

    assert_eq!(object.transformation(), DualComplex::identity());
    assert!(!object.is_dirty());

    object.translate(Vector2::new(1.0, 0.0));
    assert!(object.is_dirty());
}
