// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversions between quaternions and rotation matrices.
//!
//! The conversions only touch the upper-left 3x3 block, so they work on any matrix with at least
//! three rows and columns: [`Matrix3`], [`Matrix4`], [`Matrix3x4`] and [`SparseMatrix4`] alike.
//! Every other element of the destination is left as it was.
//!
//! [`quaternion_to_matrix()`] writes the rotation in the form used with row vectors (`v * M`),
//! and [`matrix_to_quaternion()`] reads that same form back. [`quaternion_to_matrix_transposed()`]
//! writes the column vector form (`M * v`), which is the one [`Matrix`] and [`SparseMatrix4`]
//! use to transform points.
//!
//! [`Matrix`]: crate::matrix::Matrix
//! [`Matrix3`]: crate::matrix::Matrix3
//! [`Matrix4`]: crate::matrix::Matrix4
//! [`Matrix3x4`]: crate::matrix::Matrix3x4

use crate::{
    const_assert_larger,
    matrix::Matrix,
    rotation::quaternion::Quaternion,
    sparse::SparseMatrix4,
    utils::num::Float,
};

/// A matrix with an upper-left 3x3 block which can hold a rotation.
pub trait RotationMatrix {
    type Scalar;

    /// Reads the element `(row, col)` of the rotation block. Both indices are below 3.
    #[must_use]
    fn rotation_entry(&self, row: usize, col: usize) -> Self::Scalar;

    /// Writes the element `(row, col)` of the rotation block. Both indices are below 3.
    fn set_rotation_entry(&mut self, row: usize, col: usize, value: Self::Scalar);
}

/// Implemented for every matrix with at least 3 rows and 3 columns. Smaller matrices fail to
/// compile when used as a rotation matrix.
impl<T: Copy, const ROWS: usize, const COLS: usize> RotationMatrix for Matrix<T, ROWS, COLS> {
    type Scalar = T;

    #[inline]
    fn rotation_entry(&self, row: usize, col: usize) -> T {
        const_assert_larger!(ROWS, 2);
        const_assert_larger!(COLS, 2);
        self[(row, col)]
    }

    #[inline]
    fn set_rotation_entry(&mut self, row: usize, col: usize, value: T) {
        const_assert_larger!(ROWS, 2);
        const_assert_larger!(COLS, 2);
        self[(row, col)] = value;
    }
}

impl<T: Copy> RotationMatrix for SparseMatrix4<T> {
    type Scalar = T;

    #[inline]
    fn rotation_entry(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }

    #[inline]
    fn set_rotation_entry(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }
}

#[inline]
fn two<T: Float>() -> T {
    T::ONE + T::ONE
}

/// Converts the rotation block of `matrix` to a unit quaternion.
///
/// `matrix` must be in the form written by [`quaternion_to_matrix()`] and must not be scaled.
/// The result is normalized, and may be the negation of the quaternion the matrix was built
/// from, which describes the same rotation.
///
/// # Examples
///
/// ```
/// # use gaussian::{conversions::matrix_to_quaternion, matrix::Matrix3, Quaternion};
/// let quat = matrix_to_quaternion(&Matrix3::<f64>::identity());
/// assert_eq!(quat, Quaternion::identity());
/// ```
#[must_use]
pub fn matrix_to_quaternion<T, M>(matrix: &M) -> Quaternion<T>
where
    T: Float,
    M: RotationMatrix<Scalar = T> + ?Sized,
{
    let m = |row, col| matrix.rotation_entry(row, col);
    let (one, quarter) = (T::ONE, T::QUARTER);

    let trace = m(0, 0) + m(1, 1) + m(2, 2) + one;
    let quat = if trace > T::ZERO {
        let s = two::<T>() * trace.sqrt();
        Quaternion::new(
            (m(1, 2) - m(2, 1)) / s,
            (m(2, 0) - m(0, 2)) / s,
            (m(0, 1) - m(1, 0)) / s,
            quarter * s,
        )
    } else if m(0, 0) > m(1, 1) && m(0, 0) > m(2, 2) {
        let s = two::<T>() * (one + m(0, 0) - m(1, 1) - m(2, 2)).sqrt();
        Quaternion::new(
            quarter * s,
            (m(1, 0) + m(0, 1)) / s,
            (m(0, 2) + m(2, 0)) / s,
            (m(1, 2) - m(2, 1)) / s,
        )
    } else if m(1, 1) > m(2, 2) {
        let s = two::<T>() * (one + m(1, 1) - m(0, 0) - m(2, 2)).sqrt();
        Quaternion::new(
            (m(1, 0) + m(0, 1)) / s,
            quarter * s,
            (m(2, 1) + m(1, 2)) / s,
            (m(2, 0) - m(0, 2)) / s,
        )
    } else {
        let s = two::<T>() * (one + m(2, 2) - m(0, 0) - m(1, 1)).sqrt();
        Quaternion::new(
            (m(2, 0) + m(0, 2)) / s,
            (m(2, 1) + m(1, 2)) / s,
            quarter * s,
            (m(0, 1) - m(1, 0)) / s,
        )
    };

    quat.normalized()
}

/// Writes the rotation described by the unit quaternion `rotation` to the rotation block of
/// `out`, in the form used with row vectors.
///
/// This is the transpose, and so the inverse, of [`quaternion_to_matrix_transposed()`].
pub fn quaternion_to_matrix<T, M>(out: &mut M, rotation: Quaternion<T>)
where
    T: Float,
    M: RotationMatrix<Scalar = T> + ?Sized,
{
    let Quaternion { x, y, z, w } = rotation;
    let (one, two) = (T::ONE, two::<T>());

    out.set_rotation_entry(0, 0, one - two * y * y - two * z * z);
    out.set_rotation_entry(0, 1, two * x * y + two * z * w);
    out.set_rotation_entry(0, 2, two * x * z - two * y * w);

    out.set_rotation_entry(1, 0, two * x * y - two * z * w);
    out.set_rotation_entry(1, 1, one - two * x * x - two * z * z);
    out.set_rotation_entry(1, 2, two * z * y + two * x * w);

    out.set_rotation_entry(2, 0, two * x * z + two * y * w);
    out.set_rotation_entry(2, 1, two * z * y - two * x * w);
    out.set_rotation_entry(2, 2, one - two * x * x - two * y * y);
}

/// Writes the rotation described by the unit quaternion `rotation` to the rotation block of
/// `out`, in the form used with column vectors.
///
/// # Examples
///
/// ```
/// # use gaussian::{conversions::quaternion_to_matrix_transposed, matrix::Matrix3, Angle, Quaternion, Vector3};
/// let quat = Quaternion::from_angle_axis(Angle::Degrees(90.0_f64), Vector3::Z);
///
/// let mut matrix = Matrix3::identity();
/// quaternion_to_matrix_transposed(&mut matrix, quat);
///
/// assert!((matrix * Vector3::X - Vector3::<f64>::Y).len() < 1e-12);
/// ```
pub fn quaternion_to_matrix_transposed<T, M>(out: &mut M, rotation: Quaternion<T>)
where
    T: Float,
    M: RotationMatrix<Scalar = T> + ?Sized,
{
    let Quaternion { x, y, z, w } = rotation;
    let (one, two) = (T::ONE, two::<T>());

    out.set_rotation_entry(0, 0, one - two * y * y - two * z * z);
    out.set_rotation_entry(0, 1, two * x * y - two * z * w);
    out.set_rotation_entry(0, 2, two * x * z + two * y * w);

    out.set_rotation_entry(1, 0, two * x * y + two * z * w);
    out.set_rotation_entry(1, 1, one - two * x * x - two * z * z);
    out.set_rotation_entry(1, 2, two * z * y - two * x * w);

    out.set_rotation_entry(2, 0, two * x * z - two * y * w);
    out.set_rotation_entry(2, 1, two * z * y + two * x * w);
    out.set_rotation_entry(2, 2, one - two * x * x - two * y * y);
}
