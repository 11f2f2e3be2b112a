// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inverses of square matrices.
//!
//! Every routine here tests the determinant for exact equality with zero. A singular matrix is
//! reported to the caller and the destination is left untouched; there is no tolerance and no
//! pivoting.

use super::{
    Matrix,
    determinant::{Minors4, det2, det3},
};
use crate::utils::num::{ClosedNeg, Real, Scalar};

/// Types which can be inverted.
///
/// Only matrices of [`Real`] elements are invertible; integer matrices still provide
/// [`Matrix::adjoint`] and [`Matrix::has_inverse`].
///
/// ```compile_fail
/// # use gaussian::matrix::Matrix;
/// let _ = Matrix::new([[2, 0], [0, 2]]).inverse_checked();
/// ```
///
/// ```compile_fail
/// # use gaussian::sparse::SparseMatrix4i;
/// let mut matrix = SparseMatrix4i::identity();
/// let _ = matrix.invert();
/// ```
///
/// [`Real`]: crate::utils::num::Real
pub trait Inverse: Sized {
    /// Writes the inverse of `self` to `out`.
    ///
    /// Returns `false` if `self` is singular, in which case `out` is not modified.
    fn inverse_into(&self, out: &mut Self) -> bool;
}

/// Writes the inverse of `matrix` to `out`, returning whether `matrix` was invertible.
///
/// # Examples
///
/// ```
/// # use gaussian::{inverse, matrix::Matrix};
/// let matrix = Matrix::new([[2.0, 0.0], [0.0, 4.0]]);
///
/// let mut out = Matrix::splat(0.0);
/// assert!(inverse(&mut out, &matrix));
/// assert_eq!(out, Matrix::new([[0.5, 0.0], [0.0, 0.25]]));
///
/// let singular = Matrix::new([[1.0, 2.0], [2.0, 4.0]]);
/// assert!(!inverse(&mut out, &singular));
/// assert_eq!(out, Matrix::new([[0.5, 0.0], [0.0, 0.25]]));
/// ```
#[must_use]
#[inline]
pub fn inverse<M: Inverse>(out: &mut M, matrix: &M) -> bool {
    matrix.inverse_into(out)
}

#[inline]
pub(crate) fn inverse2<T: Scalar + ClosedNeg>(m: [[T; 2]; 2]) -> Option<[[T; 2]; 2]> {
    let det = det2(m);
    if det == T::ZERO {
        return None;
    }

    let inv_det = T::ONE / det;
    Some([
        [m[1][1] * inv_det, -m[0][1] * inv_det],
        [-m[1][0] * inv_det, m[0][0] * inv_det],
    ])
}

/// The adjugate of a 3x3 block, before scaling by the inverse determinant.
#[inline]
pub(crate) fn adjugate3<T: Scalar>(m: &[[T; 3]; 3]) -> [[T; 3]; 3] {
    [
        [
            m[1][1] * m[2][2] - m[2][1] * m[1][2],
            m[2][1] * m[0][2] - m[0][1] * m[2][2],
            m[0][1] * m[1][2] - m[1][1] * m[0][2],
        ],
        [
            m[2][0] * m[1][2] - m[1][0] * m[2][2],
            m[0][0] * m[2][2] - m[2][0] * m[0][2],
            m[1][0] * m[0][2] - m[0][0] * m[1][2],
        ],
        [
            m[1][0] * m[2][1] - m[2][0] * m[1][1],
            m[2][0] * m[0][1] - m[0][0] * m[2][1],
            m[0][0] * m[1][1] - m[1][0] * m[0][1],
        ],
    ]
}

#[inline]
pub(crate) fn inverse3<T: Scalar>(m: [[T; 3]; 3]) -> Option<[[T; 3]; 3]> {
    let det = det3(m);
    if det == T::ZERO {
        return None;
    }

    let inv_det = T::ONE / det;
    Some(adjugate3(&m).map(|row| row.map(|elem| elem * inv_det)))
}

#[inline]
pub(crate) fn inverse4<T: Scalar + ClosedNeg>(m: [[T; 4]; 4]) -> Option<[[T; 4]; 4]> {
    let minors = Minors4::new(&m);
    let det = minors.determinant();
    if det == T::ZERO {
        return None;
    }

    let (s, c) = (minors.upper, minors.lower);
    let adjugate = [
        [
            m[1][1] * c[5] - m[1][2] * c[4] + m[1][3] * c[3],
            -m[0][1] * c[5] + m[0][2] * c[4] - m[0][3] * c[3],
            m[3][1] * s[5] - m[3][2] * s[4] + m[3][3] * s[3],
            -m[2][1] * s[5] + m[2][2] * s[4] - m[2][3] * s[3],
        ],
        [
            -m[1][0] * c[5] + m[1][2] * c[2] - m[1][3] * c[1],
            m[0][0] * c[5] - m[0][2] * c[2] + m[0][3] * c[1],
            -m[3][0] * s[5] + m[3][2] * s[2] - m[3][3] * s[1],
            m[2][0] * s[5] - m[2][2] * s[2] + m[2][3] * s[1],
        ],
        [
            m[1][0] * c[4] - m[1][1] * c[2] + m[1][3] * c[0],
            -m[0][0] * c[4] + m[0][1] * c[2] - m[0][3] * c[0],
            m[3][0] * s[4] - m[3][1] * s[2] + m[3][3] * s[0],
            -m[2][0] * s[4] + m[2][1] * s[2] - m[2][3] * s[0],
        ],
        [
            -m[1][0] * c[3] + m[1][1] * c[1] - m[1][2] * c[0],
            m[0][0] * c[3] - m[0][1] * c[1] + m[0][2] * c[0],
            -m[3][0] * s[3] + m[3][1] * s[1] - m[3][2] * s[0],
            m[2][0] * s[3] - m[2][1] * s[1] + m[2][2] * s[0],
        ],
    ];

    let inv_det = T::ONE / det;
    Some(adjugate.map(|row| row.map(|elem| elem * inv_det)))
}

impl<T: Scalar + ClosedNeg, const N: usize> Matrix<T, N, N> {
    /// Calculates the adjoint (adjugate) matrix: the transpose of the matrix of cofactors.
    ///
    /// The adjoint of a 1x1 matrix is `[[1]]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let matrix = Matrix::new([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    ///
    /// assert_eq!(matrix.adjoint(), Matrix::new([
    ///     [4, -2],
    ///     [-3, 1],
    /// ]));
    /// ```
    #[doc(alias = "adjugate")]
    #[must_use]
    #[inline]
    pub fn adjoint(self) -> Self {
        if N == 1 {
            return Matrix::splat(T::ONE);
        }

        Matrix::from_fn(|row, col| {
            let minor = self.cofactor_shifted(col, row).det_laplace(N - 1);
            if (row + col) % 2 == 0 { minor } else { -minor }
        })
    }

    /// Returns whether the matrix is invertible, i.e. whether its determinant is not exactly
    /// zero.
    #[must_use]
    #[inline]
    pub fn has_inverse(self) -> bool {
        self.determinant() != T::ZERO
    }
}

impl<T: Real, const N: usize> Matrix<T, N, N> {

    /// Calculates the inverse of the matrix, or `None` if the matrix is singular.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let matrix = Matrix::new([
    ///     [3.0, 1.0],
    ///     [2.0, 2.0],
    /// ]);
    ///
    /// assert_eq!(matrix.inverse_checked(), Some(Matrix::new([
    ///     [0.5, -0.25],
    ///     [-0.5, 0.75],
    /// ])));
    ///
    /// let singular = Matrix::new([[1.0, 2.0], [2.0, 4.0]]);
    /// assert_eq!(singular.inverse_checked(), None);
    /// ```
    #[must_use]
    #[inline]
    pub fn inverse_checked(self) -> Option<Self> {
        let inverse = match N {
            2 => inverse2(self.leading_block()).map(Self::from_block),
            3 => inverse3(self.leading_block()).map(Self::from_block),
            4 => inverse4(self.leading_block()).map(Self::from_block),
            _ => {
                let det = self.determinant();
                if det == T::ZERO {
                    None
                } else {
                    Some(self.adjoint() * (T::ONE / det))
                }
            }
        };

        if inverse.is_none() {
            log::debug!("cannot invert a singular {N}x{N} matrix");
        }

        inverse
    }

    /// Writes the inverse of the matrix to `out`.
    ///
    /// Returns `false` if the matrix is singular, in which case `out` is not modified.
    #[must_use]
    #[inline]
    pub fn inverse_into(&self, out: &mut Self) -> bool {
        match self.inverse_checked() {
            Some(inverse) => {
                *out = inverse;
                true
            }
            None => false,
        }
    }

    /// Inverts the matrix in place, returning whether it succeeded. A singular matrix is left
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let mut matrix = Matrix::new([
    ///     [1.0, 2.0, 3.0],
    ///     [4.0, 5.0, 6.0],
    ///     [0.0, 0.0, 0.0],
    /// ]);
    /// let original = matrix;
    ///
    /// assert!(!matrix.invert());
    /// assert_eq!(matrix, original);
    /// ```
    #[inline]
    pub fn invert(&mut self) -> bool {
        let original = *self;
        original.inverse_into(self)
    }

    /// Returns the inverse of the matrix, or the matrix itself if it is singular.
    ///
    /// Use [`inverse_checked()`] to tell the two cases apart.
    ///
    /// [`inverse_checked()`]: Matrix::inverse_checked
    #[must_use]
    #[inline]
    pub fn inverse(self) -> Self {
        self.inverse_checked().unwrap_or(self)
    }

    #[inline]
    fn from_block<const K: usize>(block: [[T; K]; K]) -> Self {
        Matrix::from_fn(|row, col| block[row][col])
    }
}

impl<T: Real, const N: usize> Inverse for Matrix<T, N, N> {
    #[inline]
    fn inverse_into(&self, out: &mut Self) -> bool {
        Matrix::inverse_into(self, out)
    }
}
