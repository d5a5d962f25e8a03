use super::*;
use crate::math::{Matrix3, Matrix4, Vector3};

// ============================================================================
// TransformationMatrix
// ============================================================================

#[test]
fn test_dimensions() {
    assert_eq!(<Matrix3<f32> as TransformationMatrix>::DIMENSIONS, 2);
    assert_eq!(<Matrix4<f32> as TransformationMatrix>::DIMENSIONS, 3);
}

#[test]
fn test_identity_matrix() {
    assert!(<Matrix3<f32> as TransformationMatrix>::identity_matrix().is_identity());
    assert!(<Matrix4<f64> as TransformationMatrix>::identity_matrix().is_identity());
}

#[test]
fn test_projection_scale() {
    let projection = Matrix4::<f32>::orthographic_projection(Vector2::new(4.0, 2.0), 1.0, 10.0);
    assert_eq!(projection.projection_scale(), Vector2::new(0.5, 1.0));

    let projection = Matrix3::<f32>::projection(Vector2::new(8.0, 4.0));
    assert_eq!(projection.projection_scale(), Vector2::new(0.25, 0.5));
}

#[test]
fn test_xy_scaling_keeps_other_axes() {
    let m = <Matrix4<f32> as TransformationMatrix>::from_xy_scaling(Vector2::new(0.5, 2.0));
    assert_eq!(m, Matrix4::from_scaling(Vector3::new(0.5, 2.0, 1.0)));

    let m = <Matrix3<f32> as TransformationMatrix>::from_xy_scaling(Vector2::new(0.5, 2.0));
    assert_eq!(m, Matrix3::from_scaling(Vector2::new(0.5, 2.0)));
}
