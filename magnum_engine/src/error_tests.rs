//! Unit tests for error.rs
//!
//! Tests Error variants, their Display output, and the logging helpers.

use crate::error::{Error, Result};
use crate::scene_graph::{FeatureKey, GroupKey, ObjectKey};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_precondition_display_is_the_message() {
    let err = Error::Precondition(
        "DualComplexTransformation::set_transformation(): the dual complex number is not normalized"
            .to_string(),
    );
    assert_eq!(
        err.to_string(),
        "DualComplexTransformation::set_transformation(): the dual complex number is not normalized"
    );
}

#[test]
fn test_stale_handle_display() {
    let display = Error::StaleObject(ObjectKey::default()).to_string();
    assert!(display.contains("stale object handle"));

    let display = Error::StaleFeature(FeatureKey::default()).to_string();
    assert!(display.contains("stale feature handle"));

    let display = Error::StaleGroup(GroupKey::default()).to_string();
    assert!(display.contains("stale feature group handle"));
}

#[test]
fn test_not_in_group_display() {
    let err = Error::NotInGroup { feature: FeatureKey::default(), group: GroupKey::default() };
    assert!(err.to_string().contains("is not a member of group"));
}

#[test]
fn test_feature_type_mismatch_display() {
    let err = Error::FeatureTypeMismatch { feature: FeatureKey::default(), expected: "Camera3D" };
    assert!(err.to_string().ends_with("is not a Camera3D"));
}

#[test]
fn test_hierarchy_and_capability_display() {
    assert_eq!(Error::Hierarchy("cycle".to_string()).to_string(), "cycle");
    assert_eq!(Error::CapabilityMismatch("not drawable".to_string()).to_string(), "not drawable");
}

// ============================================================================
// TRAIT TESTS
// ============================================================================

#[test]
fn test_error_clone_and_eq() {
    let err = Error::Hierarchy("object is not part of the scene".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(err, Error::Precondition("object is not part of the scene".to_string()));
}

#[test]
fn test_error_is_std_error() {
    fn takes_std_error(_: &dyn std::error::Error) {}
    takes_std_error(&Error::Precondition("x".to_string()));
}

// ============================================================================
// MACRO TESTS
// ============================================================================

fn checked_sqrt(value: f32) -> Result<f32> {
    if value < 0.0 {
        crate::engine_bail!("magnum::ErrorTests", "checked_sqrt(): negative value {}", value);
    }
    Ok(value.sqrt())
}

#[test]
fn test_engine_bail_returns_precondition() {
    assert_eq!(checked_sqrt(4.0), Ok(2.0));
    assert_eq!(
        checked_sqrt(-1.0),
        Err(Error::Precondition("checked_sqrt(): negative value -1".to_string()))
    );
}

#[test]
fn test_engine_err_builds_precondition() {
    let err = crate::engine_err!("magnum::ErrorTests", "value {} out of range", 3);
    assert_eq!(err, Error::Precondition("value 3 out of range".to_string()));
}

#[test]
fn test_logged_returns_same_error() {
    let err = Error::StaleObject(ObjectKey::default());
    assert_eq!(err.clone().logged("magnum::ErrorTests"), err);
}
