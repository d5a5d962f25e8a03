/// Fixed-size vectors.
///
/// `Vector<N, T>` is a transparent wrapper over `[T; N]`, so it can be
/// reinterpreted as plain component memory (see the `bytemuck` impls in
/// `interop`). Equality is fuzzy for floating-point components.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Rem, RemAssign, Sub,
    SubAssign,
};
use super::scalar::{is_normalized_squared, Real, Scalar};

/// Column vector of `N` components
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Vector<const N: usize, T = f32>(pub [T; N]);

/// Two-component vector
pub type Vector2<T = f32> = Vector<2, T>;
/// Three-component vector
pub type Vector3<T = f32> = Vector<3, T>;
/// Four-component vector
pub type Vector4<T = f32> = Vector<4, T>;

impl<const N: usize, T: Scalar> Default for Vector<N, T> {
    fn default() -> Self {
        Self([T::default(); N])
    }
}

impl<const N: usize, T: Scalar> From<[T; N]> for Vector<N, T> {
    fn from(components: [T; N]) -> Self {
        Self(components)
    }
}

impl<const N: usize, T: Scalar> From<Vector<N, T>> for [T; N] {
    fn from(vector: Vector<N, T>) -> Self {
        vector.0
    }
}

// ===== GENERIC OPERATIONS =====

impl<const N: usize, T: Scalar> Vector<N, T> {
    /// Vector from a component array
    #[inline]
    pub const fn from_array(components: [T; N]) -> Self {
        Self(components)
    }

    /// Zero vector
    pub fn zero() -> Self {
        Self([T::zero(); N])
    }

    /// Vector with all components set to `value`
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    /// Component array
    #[inline]
    pub fn to_array(self) -> [T; N] {
        self.0
    }

    /// Component slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Apply `f` to every component
    pub fn map<F: Fn(T) -> T>(self, f: F) -> Self {
        Self(self.0.map(f))
    }

    fn zip<F: Fn(T, T) -> T>(self, other: Self, f: F) -> Self {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(other.0) {
            *a = f(*a, b);
        }
        Self(out)
    }

    /// Dot product
    pub fn dot(self, other: Self) -> T {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(T::zero(), |sum, (a, b)| sum + *a * *b)
    }

    /// Squared length, cheaper than [`length`](Self::length)
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    /// Sum of all components
    pub fn sum(self) -> T {
        self.0.iter().fold(T::zero(), |sum, v| sum + *v)
    }

    /// Product of all components
    pub fn product(self) -> T {
        self.0.iter().fold(T::one(), |product, v| product * *v)
    }

    /// Smallest component
    pub fn min(self) -> T {
        self.0.iter().skip(1).fold(self.0[0], |m, v| if *v < m { *v } else { m })
    }

    /// Largest component
    pub fn max(self) -> T {
        self.0.iter().skip(1).fold(self.0[0], |m, v| if *v > m { *v } else { m })
    }

    /// Component-wise minimum
    pub fn min_components(self, other: Self) -> Self {
        self.zip(other, |a, b| if b < a { b } else { a })
    }

    /// Component-wise maximum
    pub fn max_components(self, other: Self) -> Self {
        self.zip(other, |a, b| if b > a { b } else { a })
    }

    /// Whether all components are (fuzzy) zero
    pub fn is_zero(self) -> bool {
        self.0.iter().all(|v| v.fuzzy_zero())
    }
}

impl<const N: usize, T: Real> Vector<N, T> {
    /// Vector length
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Inverted vector length
    pub fn length_inverted(self) -> T {
        T::one() / self.length()
    }

    /// Unit vector in the same direction
    pub fn normalized(self) -> Self {
        self * self.length_inverted()
    }

    /// Vector in the same direction with given length
    pub fn resized(self, length: T) -> Self {
        self * (length * self.length_inverted())
    }

    /// Whether the vector has unit length, within tolerance
    pub fn is_normalized(self) -> bool {
        is_normalized_squared(self.length_squared())
    }

    /// Projection of this vector onto `line`
    pub fn projected(self, line: Self) -> Self {
        line * (self.dot(line) / line.length_squared())
    }

    /// Linear interpolation between two vectors
    pub fn lerp(self, other: Self, t: T) -> Self {
        self * (T::one() - t) + other * t
    }
}

// ===== DIMENSION-SPECIFIC =====

impl<T: Scalar> Vector<2, T> {
    /// Two-component vector
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self([x, y])
    }

    /// X component
    #[inline]
    pub fn x(self) -> T {
        self.0[0]
    }

    /// Y component
    #[inline]
    pub fn y(self) -> T {
        self.0[1]
    }

    /// Vector along X axis
    pub fn x_axis(length: T) -> Self {
        Self::new(length, T::zero())
    }

    /// Vector along Y axis
    pub fn y_axis(length: T) -> Self {
        Self::new(T::zero(), length)
    }

    /// Scaling vector in direction of X axis (Y is one)
    pub fn x_scale(scale: T) -> Self {
        Self::new(scale, T::one())
    }

    /// Scaling vector in direction of Y axis (X is one)
    pub fn y_scale(scale: T) -> Self {
        Self::new(T::one(), scale)
    }

    /// Extend with a third component
    pub fn pad(self, z: T) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), z)
    }

    /// 2D cross product (Z component of the 3D cross product)
    pub fn cross(self, other: Self) -> T {
        self.x() * other.y() - self.y() * other.x()
    }

    /// Aspect ratio, `x / y`
    pub fn aspect_ratio(self) -> T {
        self.x() / self.y()
    }
}

impl<T: Scalar + Neg<Output = T>> Vector<2, T> {
    /// Vector rotated by 90° counterclockwise
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y(), self.x())
    }
}

impl<T: Scalar> Vector<3, T> {
    /// Three-component vector
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self([x, y, z])
    }

    /// X component
    #[inline]
    pub fn x(self) -> T {
        self.0[0]
    }

    /// Y component
    #[inline]
    pub fn y(self) -> T {
        self.0[1]
    }

    /// Z component
    #[inline]
    pub fn z(self) -> T {
        self.0[2]
    }

    /// XY part
    pub fn xy(self) -> Vector2<T> {
        Vector2::new(self.x(), self.y())
    }

    /// Vector along X axis
    pub fn x_axis(length: T) -> Self {
        Self::new(length, T::zero(), T::zero())
    }

    /// Vector along Y axis
    pub fn y_axis(length: T) -> Self {
        Self::new(T::zero(), length, T::zero())
    }

    /// Vector along Z axis
    pub fn z_axis(length: T) -> Self {
        Self::new(T::zero(), T::zero(), length)
    }

    /// Scaling vector in direction of X axis
    pub fn x_scale(scale: T) -> Self {
        Self::new(scale, T::one(), T::one())
    }

    /// Scaling vector in direction of Y axis
    pub fn y_scale(scale: T) -> Self {
        Self::new(T::one(), scale, T::one())
    }

    /// Scaling vector in direction of Z axis
    pub fn z_scale(scale: T) -> Self {
        Self::new(T::one(), T::one(), scale)
    }

    /// Extend with a fourth component
    pub fn pad(self, w: T) -> Vector4<T> {
        Vector4::new(self.x(), self.y(), self.z(), w)
    }

    /// Cross product
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }
}

impl<T: Scalar> Vector<4, T> {
    /// Four-component vector
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self([x, y, z, w])
    }

    /// X component
    #[inline]
    pub fn x(self) -> T {
        self.0[0]
    }

    /// Y component
    #[inline]
    pub fn y(self) -> T {
        self.0[1]
    }

    /// Z component
    #[inline]
    pub fn z(self) -> T {
        self.0[2]
    }

    /// W component
    #[inline]
    pub fn w(self) -> T {
        self.0[3]
    }

    /// XYZ part
    pub fn xyz(self) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), self.z())
    }
}

// ===== COMPARISON =====

impl<const N: usize, T: Scalar> PartialEq for Vector<N, T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a.fuzzy_eq(*b))
    }
}

// ===== INDEXING =====

impl<const N: usize, T> Index<usize> for Vector<N, T> {
    type Output = T;
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<const N: usize, T> IndexMut<usize> for Vector<N, T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

// ===== ARITHMETIC =====

impl<const N: usize, T: Scalar + Neg<Output = T>> Neg for Vector<N, T> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

macro_rules! impl_component_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $sym:tt) => {
        impl<const N: usize, T: Scalar> $op for Vector<N, T> {
            type Output = Self;
            #[inline]
            fn $method(self, other: Self) -> Self {
                self.zip(other, |a, b| a $sym b)
            }
        }

        impl<const N: usize, T: Scalar> $op<T> for Vector<N, T> {
            type Output = Self;
            #[inline]
            fn $method(self, scalar: T) -> Self {
                self.map(|a| a $sym scalar)
            }
        }

        impl<const N: usize, T: Scalar> $assign for Vector<N, T> {
            #[inline]
            fn $assign_method(&mut self, other: Self) {
                *self = self.zip(other, |a, b| a $sym b);
            }
        }

        impl<const N: usize, T: Scalar> $assign<T> for Vector<N, T> {
            #[inline]
            fn $assign_method(&mut self, scalar: T) {
                *self = self.map(|a| a $sym scalar);
            }
        }
    };
}

impl_component_op!(Add, add, AddAssign, add_assign, +);
impl_component_op!(Sub, sub, SubAssign, sub_assign, -);
impl_component_op!(Mul, mul, MulAssign, mul_assign, *);
impl_component_op!(Div, div, DivAssign, div_assign, /);
impl_component_op!(Rem, rem, RemAssign, rem_assign, %);

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {$(
        impl<const N: usize> Mul<Vector<N, $t>> for $t {
            type Output = Vector<N, $t>;
            #[inline]
            fn mul(self, vector: Vector<N, $t>) -> Vector<N, $t> {
                vector * self
            }
        }
    )*};
}

impl_scalar_lhs_mul!(f32, f64, i32, i64, u32);

#[cfg(test)]
#[path = "vector_tests.rs"]
mod tests;
