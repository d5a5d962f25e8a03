//! Error types for the Magnum engine
//!
//! Every fallible operation in the math and scene graph modules returns
//! [`Result`]. Errors are logged through the engine logger at the point
//! where they are produced, so callers can simply propagate them with `?`.

use crate::scene_graph::{FeatureKey, GroupKey, ObjectKey};

/// Result type for Magnum engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Magnum engine errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A value violated the precondition of the called operation
    /// (non-normalized rotation, singular matrix, non-rigid transformation...)
    ///
    /// The message names the operation, e.g.
    /// `DualComplexTransformation::set_transformation(): the dual complex number is not normalized`.
    #[error("{0}")]
    Precondition(String),

    /// The object handle does not refer to a live object of this scene
    #[error("stale object handle {0:?}")]
    StaleObject(ObjectKey),

    /// The feature handle does not refer to a live feature of this scene
    #[error("stale feature handle {0:?}")]
    StaleFeature(FeatureKey),

    /// The group handle does not refer to a live feature group of this scene
    #[error("stale feature group handle {0:?}")]
    StaleGroup(GroupKey),

    /// A re-parenting or batch query would break the tree structure
    #[error("{0}")]
    Hierarchy(String),

    /// Removing a feature from a group it does not belong to
    #[error("feature {feature:?} is not a member of group {group:?}")]
    NotInGroup {
        feature: FeatureKey,
        group: GroupKey,
    },

    /// Typed access to a feature with the wrong concrete type
    #[error("feature {feature:?} is not a {expected}")]
    FeatureTypeMismatch {
        feature: FeatureKey,
        expected: &'static str,
    },

    /// A feature lacks the capability required by its group (drawing, animation)
    #[error("{0}")]
    CapabilityMismatch(String),
}

impl Error {
    /// Log this error at ERROR severity and hand it back
    ///
    /// # Example
    ///
    /// ```ignore
    /// return Err(Error::StaleObject(key).logged("magnum::SceneGraph"));
    /// ```
    #[track_caller]
    pub fn logged(self, source: &str) -> Self {
        let location = std::panic::Location::caller();
        crate::engine::Engine::log_detailed(
            crate::log::LogSeverity::Error,
            source,
            self.to_string(),
            location.file(),
            location.line(),
        );
        self
    }
}

// ===== ERROR MACROS =====

/// Log a precondition violation and build the matching [`Error::Precondition`]
///
/// ```ignore
/// let inverse = m.inverted_checked().ok_or_else(|| engine_err!("magnum::Math",
///     "Matrix::inverted(): the matrix is not invertible"))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::magnum::Error::Precondition(message)
    }};
}

/// Log a precondition violation and return it as `Err` from the current function
///
/// ```ignore
/// if !value.is_normalized() {
///     engine_bail!("magnum::SceneGraph",
///         "DualComplexTransformation::set_transformation(): the dual complex number is not normalized");
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
