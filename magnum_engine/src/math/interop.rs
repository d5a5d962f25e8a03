/// Conversions to `glam` and raw-memory access through `bytemuck`.
///
/// Both libraries store matrices column-major, so conversions copy
/// columns one to one.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
use super::matrix::{Matrix, Matrix3, Matrix4};
use super::quaternion::Quaternion;
use super::vector::{Vector, Vector2, Vector3, Vector4};

// ===== BYTEMUCK =====

// SAFETY: `Vector` is `repr(transparent)` over `[T; N]`, which is Pod for Pod `T`
unsafe impl<const N: usize, T: bytemuck::Zeroable> bytemuck::Zeroable for Vector<N, T> {}
unsafe impl<const N: usize, T: bytemuck::Pod> bytemuck::Pod for Vector<N, T> {}

// SAFETY: `Matrix` is `repr(transparent)` over `[Vector<N, T>; N]`
unsafe impl<const N: usize, T: bytemuck::Zeroable> bytemuck::Zeroable for Matrix<N, T> {}
unsafe impl<const N: usize, T: bytemuck::Pod> bytemuck::Pod for Matrix<N, T> {}

// ===== VECTORS =====

impl From<Vec2> for Vector2<f32> {
    fn from(v: Vec2) -> Self {
        Self(v.to_array())
    }
}

impl From<Vector2<f32>> for Vec2 {
    fn from(v: Vector2<f32>) -> Self {
        Vec2::from_array(v.0)
    }
}

impl From<Vec3> for Vector3<f32> {
    fn from(v: Vec3) -> Self {
        Self(v.to_array())
    }
}

impl From<Vector3<f32>> for Vec3 {
    fn from(v: Vector3<f32>) -> Self {
        Vec3::from_array(v.0)
    }
}

impl From<Vec4> for Vector4<f32> {
    fn from(v: Vec4) -> Self {
        Self(v.to_array())
    }
}

impl From<Vector4<f32>> for Vec4 {
    fn from(v: Vector4<f32>) -> Self {
        Vec4::from_array(v.0)
    }
}

// ===== MATRICES =====

impl From<Mat3> for Matrix3<f32> {
    fn from(m: Mat3) -> Self {
        Self(m.to_cols_array_2d().map(Vector))
    }
}

impl From<Matrix3<f32>> for Mat3 {
    fn from(m: Matrix3<f32>) -> Self {
        Mat3::from_cols_array_2d(&m.0.map(|column| column.0))
    }
}

impl From<Mat4> for Matrix4<f32> {
    fn from(m: Mat4) -> Self {
        Self(m.to_cols_array_2d().map(Vector))
    }
}

impl From<Matrix4<f32>> for Mat4 {
    fn from(m: Matrix4<f32>) -> Self {
        Mat4::from_cols_array_2d(&m.0.map(|column| column.0))
    }
}

// ===== QUATERNIONS =====

impl From<Quat> for Quaternion<f32> {
    fn from(q: Quat) -> Self {
        Quaternion::new(Vector3::new(q.x, q.y, q.z), q.w)
    }
}

impl From<Quaternion<f32>> for Quat {
    fn from(q: Quaternion<f32>) -> Self {
        let v = q.vector();
        Quat::from_xyzw(v.x(), v.y(), v.z(), q.scalar())
    }
}

#[cfg(test)]
#[path = "interop_tests.rs"]
mod tests;
