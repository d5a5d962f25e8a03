/*!
# Magnum Engine

Transformation hierarchy engine and its algebraic foundation.

This crate provides the math primitives (vectors, matrices, complex numbers,
quaternions and their dual counterparts, strongly-typed angles) and a scene
graph of transformable nodes with lazily cached absolute transformations,
pluggable transformation policies, and attachable features.

## Architecture

- **Math**: `Vector`, `Matrix`, `Complex`, `Quaternion`, `DualComplex`,
  `DualQuaternion`, `Deg`/`Rad`
- **Transformation policies**: interchangeable representations of a node's
  local transformation (matrix, rigid matrix, dual complex, dual quaternion,
  translation) behind the `Transformation` trait
- **Scene**: arena of objects, features and feature groups addressed by
  generation-checked keys
- **Features**: cameras, drawables, animables and user-defined capabilities
  attached to objects

Rendering collaborators consume `(FeatureKey, Matrix)` sequences produced by
cameras; no GPU API is touched here.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod scene_graph;

// Main magnum namespace module
pub mod magnum {
    // Error types
    pub use crate::error::{Error, Result};

    // Diagnostics facade
    pub use crate::engine::{Engine, DEFAULT_LOG_LEVEL};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Math sub-module
    pub mod math {
        pub use crate::math::*;
    }

    // Scene graph sub-module
    pub mod scene_graph {
        pub use crate::scene_graph::*;
    }
}

// Re-export interop math library at crate root
pub use glam;
