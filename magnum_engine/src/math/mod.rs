//! Math module
//!
//! Fixed-size linear algebra and rotation primitives underlying the scene
//! graph: scalars with fuzzy comparison, strongly-typed angles, column-major
//! vectors and matrices, complex numbers and quaternions, and their dual
//! counterparts for rigid transformations.

mod scalar;
mod angle;
mod vector;
mod matrix;
mod matrix3;
mod matrix4;
mod complex;
mod quaternion;
mod dual_complex;
mod dual_quaternion;
mod interop;

pub use scalar::{Scalar, Real};
pub use angle::{Deg, Rad};
pub use vector::{Vector, Vector2, Vector3, Vector4};
pub use matrix::{Matrix, Matrix2, Matrix3, Matrix4};
pub use complex::Complex;
pub use quaternion::Quaternion;
pub use dual_complex::DualComplex;
pub use dual_quaternion::DualQuaternion;

/// Source string used by math diagnostics
pub(crate) const LOG_SOURCE: &str = "magnum::Math";
