// SPDX-License-Identifier: MIT OR Apache-2.0

//! Determinants of square matrices.
//!
//! Matrices up to 4x4 use closed forms which always perform the same sequence of operations, so
//! the result for a given input is reproducible. Larger matrices fall back to a cofactor
//! expansion along the first row.

use super::Matrix;
use crate::utils::num::{Scalar, Zero};
use core::array;

/// Types which have a scalar determinant.
pub trait Determinant {
    type Scalar;

    /// Calculates the determinant. A value of zero means the matrix has no inverse.
    #[must_use]
    fn determinant(&self) -> Self::Scalar;
}

/// Calculates the determinant of `matrix`.
///
/// # Examples
///
/// ```
/// # use gaussian::{determinant, matrix::Matrix};
/// let matrix = Matrix::new([
///     [2.0, 0.0, 0.0],
///     [0.0, 3.0, 0.0],
///     [0.0, 0.0, 4.0],
/// ]);
///
/// assert_eq!(determinant(&matrix), 24.0);
/// ```
#[must_use]
#[inline]
pub fn determinant<M: Determinant + ?Sized>(matrix: &M) -> M::Scalar {
    matrix.determinant()
}

#[inline]
pub(crate) fn det2<T: Scalar>(m: [[T; 2]; 2]) -> T {
    m[0][0] * m[1][1] - m[0][1] * m[1][0]
}

#[inline]
pub(crate) fn det3<T: Scalar>(m: [[T; 3]; 3]) -> T {
    m[0][0] * (m[1][1] * m[2][2] - m[2][1] * m[1][2])
        - m[0][1] * (m[1][0] * m[2][2] - m[2][0] * m[1][2])
        + m[0][2] * (m[1][0] * m[2][1] - m[2][0] * m[1][1])
}

/// The 2x2 minors of a 4x4 matrix which are shared between its determinant and its adjugate.
///
/// `upper` holds the minors of the first two rows and `lower` those of the last two rows. The
/// pairs `upper[i]` and `lower[5 - i]` are complementary.
pub(crate) struct Minors4<T> {
    pub(crate) upper: [T; 6],
    pub(crate) lower: [T; 6],
}

impl<T: Scalar> Minors4<T> {
    #[inline]
    pub(crate) fn new(m: &[[T; 4]; 4]) -> Self {
        let upper = [
            m[0][0] * m[1][1] - m[1][0] * m[0][1],
            m[0][0] * m[1][2] - m[1][0] * m[0][2],
            m[0][0] * m[1][3] - m[1][0] * m[0][3],
            m[0][1] * m[1][2] - m[1][1] * m[0][2],
            m[0][1] * m[1][3] - m[1][1] * m[0][3],
            m[0][2] * m[1][3] - m[1][2] * m[0][3],
        ];

        let lower = [
            m[2][0] * m[3][1] - m[3][0] * m[2][1],
            m[2][0] * m[3][2] - m[3][0] * m[2][2],
            m[2][0] * m[3][3] - m[3][0] * m[2][3],
            m[2][1] * m[3][2] - m[3][1] * m[2][2],
            m[2][1] * m[3][3] - m[3][1] * m[2][3],
            m[2][2] * m[3][3] - m[3][2] * m[2][3],
        ];

        Self { upper, lower }
    }

    #[inline]
    pub(crate) fn determinant(&self) -> T {
        let (s, c) = (&self.upper, &self.lower);
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }
}

#[inline]
pub(crate) fn det4<T: Scalar>(m: [[T; 4]; 4]) -> T {
    Minors4::new(&m).determinant()
}

impl<T: Copy, const N: usize> Matrix<T, N, N> {
    /// Copies the top-left `K x K` block. Only called with `K <= N`.
    #[inline]
    pub(crate) fn leading_block<const K: usize>(&self) -> [[T; K]; K] {
        array::from_fn(|row| array::from_fn(|col| self.data[row][col]))
    }
}

impl<T: Copy + Zero, const N: usize> Matrix<T, N, N> {
    /// Returns the matrix with `removed_row` and `removed_col` deleted, where the retained
    /// elements are shifted to the top-left and the last row and column are zero-filled.
    ///
    /// # Panics
    ///
    /// Panics if `removed_row` or `removed_col` is not smaller than `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let matrix = Matrix::new([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    ///     [7, 8, 9],
    /// ]);
    ///
    /// assert_eq!(matrix.cofactor_shifted(1, 0), Matrix::new([
    ///     [2, 3, 0],
    ///     [8, 9, 0],
    ///     [0, 0, 0],
    /// ]));
    /// ```
    #[track_caller]
    #[must_use]
    #[inline]
    pub fn cofactor_shifted(&self, removed_row: usize, removed_col: usize) -> Self {
        assert!(
            removed_row < N && removed_col < N,
            "cofactor ({removed_row}, {removed_col}) out of bounds for a {N}x{N} matrix"
        );

        Matrix::from_fn(|row, col| {
            if row + 1 == N || col + 1 == N {
                return T::ZERO;
            }

            let src_row = if row < removed_row { row } else { row + 1 };
            let src_col = if col < removed_col { col } else { col + 1 };
            self.data[src_row][src_col]
        })
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Calculates the scalar determinant of the matrix.
    ///
    /// If this value is `0`, then the matrix is not invertible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let matrix = Matrix::new([
    ///     [3, 8],
    ///     [4, 6],
    /// ]);
    /// assert_eq!(matrix.determinant(), -14);
    /// ```
    #[must_use]
    #[inline]
    pub fn determinant(self) -> T {
        match N {
            1 => self.data[0][0],
            2 => det2(self.leading_block()),
            3 => det3(self.leading_block()),
            4 => det4(self.leading_block()),
            _ => self.det_laplace(N),
        }
    }

    /// Expands along the first row of the leading `n x n` block.
    #[must_use]
    pub(crate) fn det_laplace(self, n: usize) -> T {
        match n {
            0 => T::ZERO,
            1 => self.data[0][0],
            2 => self.data[0][0] * self.data[1][1] - self.data[0][1] * self.data[1][0],
            _ => {
                let mut result = T::ZERO;
                for col in 0..n {
                    let term = self.data[0][col] * self.cofactor_shifted(0, col).det_laplace(n - 1);
                    if col % 2 == 0 {
                        result += term;
                    } else {
                        result -= term;
                    }
                }

                result
            }
        }
    }
}

impl<T: Scalar, const N: usize> Determinant for Matrix<T, N, N> {
    type Scalar = T;

    #[inline]
    fn determinant(&self) -> T {
        Matrix::determinant(*self)
    }
}
