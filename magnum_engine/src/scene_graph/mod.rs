//! Scene graph module
//!
//! Hierarchy of objects with local transformations, lazily cached absolute
//! transformations and attached features. The representation of a local
//! transformation is chosen per scene through a transformation policy:
//!
//! - `MatrixTransformation2D` / `MatrixTransformation3D`: arbitrary matrices
//! - `RigidMatrixTransformation2D` / `RigidMatrixTransformation3D`: rotation
//!   and translation matrices
//! - `DualComplexTransformation` / `DualQuaternionTransformation`: unit dual
//!   numbers
//! - `TranslationTransformation2D` / `TranslationTransformation3D`: vectors

mod transformation;
mod matrix_transformation;
mod rigid_matrix_transformation;
mod dual_complex_transformation;
mod dual_quaternion_transformation;
mod translation_transformation;
mod object;
mod scene;
mod feature;
mod feature_group;
mod camera;
mod drawable;
mod animable;

pub use transformation::{Transformation, TransformationMatrix};
pub use matrix_transformation::{MatrixTransformation2D, MatrixTransformation3D};
pub use rigid_matrix_transformation::{RigidMatrixTransformation2D, RigidMatrixTransformation3D};
pub use dual_complex_transformation::DualComplexTransformation;
pub use dual_quaternion_transformation::DualQuaternionTransformation;
pub use translation_transformation::{TranslationTransformation2D, TranslationTransformation3D};
pub use object::{Object, ObjectFlags, ObjectKey, ObjectMut};
pub use scene::Scene;
pub use feature::{CachedTransformations, Feature, FeatureKey};
pub use feature_group::{FeatureGroup, FeatureGroupKind, GroupKey};
pub use camera::{AspectRatioPolicy, Camera, Camera2D, Camera3D};
pub use drawable::Drawable;
pub use animable::{Animable, Animation, AnimationState};

/// Source string used by scene graph diagnostics
pub(crate) const LOG_SOURCE: &str = "magnum::SceneGraph";
