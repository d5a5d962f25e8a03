/// Square column-major matrices.
///
/// `Matrix<N, T>` stores `N` column vectors. Indexing with `m[c]` returns
/// column `c`, so `m[c][r]` is the element in column `c`, row `r`.
/// Multiplication composes linear maps: `(a * b) * v == a * (b * v)`.

use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use crate::error::Result;
use crate::engine_bail;
use super::scalar::{Real, Scalar};
use super::vector::Vector;
use super::LOG_SOURCE;

/// Square matrix of `N` columns
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Matrix<const N: usize, T = f32>(pub [Vector<N, T>; N]);

/// 2x2 matrix
pub type Matrix2<T = f32> = Matrix<2, T>;
/// 3x3 matrix, 2D affine transformation
pub type Matrix3<T = f32> = Matrix<3, T>;
/// 4x4 matrix, 3D affine or projective transformation
pub type Matrix4<T = f32> = Matrix<4, T>;

impl<const N: usize, T: Scalar> Default for Matrix<N, T> {
    /// Identity matrix
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize, T: Scalar> Matrix<N, T> {
    /// Matrix from columns
    #[inline]
    pub const fn from_columns(columns: [Vector<N, T>; N]) -> Self {
        Self(columns)
    }

    /// Identity matrix
    pub fn identity() -> Self {
        Self::from_diagonal(Vector::splat(T::one()))
    }

    /// Zero matrix
    pub fn zero() -> Self {
        Self([Vector::zero(); N])
    }

    /// Diagonal matrix
    pub fn from_diagonal(diagonal: Vector<N, T>) -> Self {
        let mut out = Self::zero();
        for i in 0..N {
            out.0[i][i] = diagonal[i];
        }
        out
    }

    /// Column array
    #[inline]
    pub fn columns(&self) -> &[Vector<N, T>; N] {
        &self.0
    }

    /// Diagonal
    pub fn diagonal(&self) -> Vector<N, T> {
        let mut out = Vector::zero();
        for i in 0..N {
            out[i] = self.0[i][i];
        }
        out
    }

    /// Row `r`
    pub fn row(&self, r: usize) -> Vector<N, T> {
        let mut out = Vector::zero();
        for c in 0..N {
            out[c] = self.0[c][r];
        }
        out
    }

    /// Transposed matrix
    pub fn transposed(&self) -> Self {
        let mut out = Self::zero();
        for c in 0..N {
            for r in 0..N {
                out.0[r][c] = self.0[c][r];
            }
        }
        out
    }

    /// Sum of the diagonal
    pub fn trace(&self) -> T {
        self.diagonal().sum()
    }

    /// Whether the matrix is (fuzzy) identity
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Outer product `a * bᵀ`
    pub fn outer(a: Vector<N, T>, b: Vector<N, T>) -> Self {
        let mut out = Self::zero();
        for c in 0..N {
            out.0[c] = a * b[c];
        }
        out
    }

    /// Flattened column-major elements
    pub fn to_cols_vec(&self) -> Vec<T> {
        self.0.iter().flat_map(|column| column.0).collect()
    }
}

impl<const N: usize, T: Real> Matrix<N, T> {
    /// Determinant, by Gaussian elimination with partial pivoting
    pub fn determinant(&self) -> T {
        let mut m = self.0;
        let mut det = T::one();

        for i in 0..N {
            let pivot = (i..N).fold(i, |best, r| {
                if m[i][r].abs() > m[i][best].abs() { r } else { best }
            });
            if m[i][pivot] == T::zero() {
                return T::zero();
            }
            if pivot != i {
                for column in m.iter_mut() {
                    column.0.swap(i, pivot);
                }
                det = -det;
            }
            det = det * m[i][i];

            for r in (i + 1)..N {
                let factor = m[i][r] / m[i][i];
                for c in i..N {
                    let value = m[c][i];
                    m[c][r] = m[c][r] - factor * value;
                }
            }
        }

        det
    }

    /// Inverted matrix
    ///
    /// Fails with a precondition error if the matrix is singular.
    pub fn inverted(&self) -> Result<Self> {
        match self.gauss_jordan() {
            Some(inverse) => Ok(inverse),
            None => engine_bail!(LOG_SOURCE, "Matrix::inverted(): the matrix is not invertible"),
        }
    }

    /// Inverted matrix without the singularity check
    ///
    /// Singular input yields non-finite elements.
    pub fn inverted_unchecked(&self) -> Self {
        self.gauss_jordan()
            .unwrap_or_else(|| Self([Vector::splat(T::nan()); N]))
    }

    fn gauss_jordan(&self) -> Option<Self> {
        // Row operations on the transposed copy keep rows contiguous
        let mut a = self.transposed().0;
        let mut inv = Self::identity().0;

        for i in 0..N {
            let pivot = (i..N).fold(i, |best, r| {
                if a[r][i].abs() > a[best][i].abs() { r } else { best }
            });
            // Singular only on an exactly zero pivot
            if a[pivot][i] == T::zero() {
                return None;
            }
            a.swap(i, pivot);
            inv.swap(i, pivot);

            let divisor = T::one() / a[i][i];
            a[i] *= divisor;
            inv[i] *= divisor;

            for r in 0..N {
                if r != i {
                    let factor = a[r][i];
                    let a_row = a[i];
                    let inv_row = inv[i];
                    a[r] -= a_row * factor;
                    inv[r] -= inv_row * factor;
                }
            }
        }

        Some(Self(inv).transposed())
    }

    /// Whether all columns are normalized and mutually orthogonal
    pub fn is_orthogonal(&self) -> bool {
        for i in 0..N {
            if !self.0[i].is_normalized() {
                return false;
            }
            for j in (i + 1)..N {
                if !self.0[i].dot(self.0[j]).fuzzy_zero() {
                    return false;
                }
            }
        }
        true
    }

    /// Inverse of an orthogonal matrix, its transpose
    pub fn inverted_orthogonal(&self) -> Result<Self> {
        if !self.is_orthogonal() {
            engine_bail!(LOG_SOURCE,
                "Matrix::inverted_orthogonal(): the matrix is not orthogonal");
        }
        Ok(self.transposed())
    }

    /// Gram-Schmidt orthonormalization of the columns
    pub fn orthonormalized(&self) -> Self {
        let mut out = self.0;
        for i in 0..N {
            for j in 0..i {
                let projection = out[j] * out[j].dot(out[i]);
                out[i] -= projection;
            }
            out[i] = out[i].normalized();
        }
        Self(out)
    }
}

// ===== COMPARISON =====

impl<const N: usize, T: Scalar> PartialEq for Matrix<N, T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
    }
}

// ===== INDEXING =====

impl<const N: usize, T> Index<usize> for Matrix<N, T> {
    type Output = Vector<N, T>;
    #[inline]
    fn index(&self, column: usize) -> &Vector<N, T> {
        &self.0[column]
    }
}

impl<const N: usize, T> IndexMut<usize> for Matrix<N, T> {
    #[inline]
    fn index_mut(&mut self, column: usize) -> &mut Vector<N, T> {
        &mut self.0[column]
    }
}

// ===== ARITHMETIC =====

impl<const N: usize, T: Scalar> Mul for Matrix<N, T> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        let mut out = Self::zero();
        for c in 0..N {
            out.0[c] = self * other.0[c];
        }
        out
    }
}

impl<const N: usize, T: Scalar> MulAssign for Matrix<N, T> {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl<const N: usize, T: Scalar> Mul<Vector<N, T>> for Matrix<N, T> {
    type Output = Vector<N, T>;
    fn mul(self, vector: Vector<N, T>) -> Vector<N, T> {
        let mut out = Vector::zero();
        for c in 0..N {
            out += self.0[c] * vector[c];
        }
        out
    }
}

impl<const N: usize, T: Scalar> Mul<T> for Matrix<N, T> {
    type Output = Self;
    fn mul(self, scalar: T) -> Self {
        Self(self.0.map(|column| column * scalar))
    }
}

impl<const N: usize, T: Scalar> Add for Matrix<N, T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let mut out = self;
        out += other;
        out
    }
}

impl<const N: usize, T: Scalar> AddAssign for Matrix<N, T> {
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a += b;
        }
    }
}

impl<const N: usize, T: Scalar> Sub for Matrix<N, T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        let mut out = self;
        out -= other;
        out
    }
}

impl<const N: usize, T: Scalar> SubAssign for Matrix<N, T> {
    fn sub_assign(&mut self, other: Self) {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a -= b;
        }
    }
}

impl<const N: usize, T: Scalar + Neg<Output = T>> Neg for Matrix<N, T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self(self.0.map(|column| -column))
    }
}

// ===== 2x2 =====

impl<T: Scalar> Matrix<2, T> {
    /// 2x2 matrix from columns
    pub fn new(c0: Vector<2, T>, c1: Vector<2, T>) -> Self {
        Self([c0, c1])
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
