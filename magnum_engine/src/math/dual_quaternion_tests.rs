use super::*;
use crate::error::Error;
use crate::math::Deg;

fn axis() -> Vector3<f32> {
    Vector3::new(1.0f32, -1.0, 0.5).normalized()
}

fn sample() -> DualQuaternion<f32> {
    DualQuaternion::from_translation(Vector3::new(1.0, -3.5, 2.0))
        * DualQuaternion::from_rotation(Deg(23.0), axis()).unwrap()
}

#[test]
fn test_composition_order_matches_matrices() {
    let expected = Matrix4::from_translation(Vector3::new(1.0f32, -3.5, 2.0))
        * Matrix4::from_rotation(Deg(23.0f32), axis()).unwrap();
    assert_eq!(sample().to_matrix(), expected);
}

#[test]
fn test_parts() {
    let a = sample();
    assert_eq!(a.rotation(), Quaternion::rotation(Deg(23.0f32), axis()).unwrap());
    assert_eq!(a.translation(), Vector3::new(1.0, -3.5, 2.0));
    assert_eq!(
        DualQuaternion::from_parts(a.rotation(), a.translation()),
        a
    );
}

#[test]
fn test_rotation_requires_normalized_axis() {
    let result = DualQuaternion::from_rotation(Deg(10.0f32), Vector3::new(0.0, 2.0, 0.0));
    assert!(matches!(result, Err(Error::Precondition(_))));
}

#[test]
fn test_matrix_round_trip() {
    let a = sample();
    assert_eq!(DualQuaternion::from_matrix(&a.to_matrix()).unwrap(), a);

    let scaled = Matrix4::from_scaling(Vector3::splat(3.0f32));
    assert!(matches!(DualQuaternion::from_matrix(&scaled), Err(Error::Precondition(_))));
}

#[test]
fn test_normalization() {
    let a = sample();
    assert!(a.is_normalized());

    let scaled = DualQuaternion::new(a.real() * 2.0, a.dual() * 2.0);
    assert!(!scaled.is_normalized());
    assert_eq!(scaled.normalized(), a);

    // Real part normalized but not orthogonal to the dual part
    let skewed = DualQuaternion::new(a.real(), a.dual() + a.real() * 0.1);
    assert!(!skewed.is_normalized());
    assert!(skewed.normalized().is_normalized());
}

#[test]
fn test_inverted() {
    let a = sample();
    assert_eq!(a * a.inverted(), DualQuaternion::identity());
    assert_eq!(a.inverted() * a, DualQuaternion::identity());
    assert_eq!(a.inverted_normalized().unwrap(), a.inverted());
    assert_eq!(a.inverted().to_matrix(), a.to_matrix().inverted().unwrap());

    let scaled = DualQuaternion::new(a.real() * 2.0, a.dual());
    assert!(matches!(scaled.inverted_normalized(), Err(Error::Precondition(_))));
    assert_eq!(scaled * scaled.inverted(), DualQuaternion::identity());
}

#[test]
fn test_conjugates() {
    let a = sample();
    assert_eq!(a.quaternion_conjugated().real(), a.real().conjugated());
    assert_eq!(a.dual_conjugated().dual(), -a.dual());
    assert_eq!(a.conjugated().dual(), -a.dual().conjugated());
}

#[test]
fn test_transform_point() {
    let a = sample();
    let p = Vector3::new(0.5f32, 2.0, -1.0);
    assert_eq!(a.transform_point(p), a.to_matrix().transform_point(p));
    assert_eq!(a.transform_vector(p), a.to_matrix().transform_vector(p));
}
