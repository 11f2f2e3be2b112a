// SPDX-License-Identifier: MIT OR Apache-2.0

//! Affine 4x4 transforms which only store their upper 3x4 block.

use crate::{
    conversions::quaternion_to_matrix_transposed,
    error::NotAffineError,
    layout::Layout,
    matrix::{
        Matrix, Matrix3x4, Matrix4,
        determinant::{Determinant, det3},
        inverse::{Inverse, adjugate3},
    },
    rotation::quaternion::Quaternion,
    utils::{
        arrays::array_assume_init,
        num::{ClosedAdd, ClosedMul, Float, One, Real, Scalar, Zero},
        sum,
    },
    vector::{Vector3, Vector4},
};
use core::{
    array,
    mem::{self, MaybeUninit},
    ops::{Index, IndexMut, Mul, MulAssign},
    slice,
};

#[cfg(test)]
mod tests;

/// A 4x4 affine transform whose bottom row is always `(0, 0, 0, 1)`.
///
/// Only the upper three rows are stored: a rotation/scale block in columns 0 to 2 and the
/// translation in column 3. Points are transformed as column vectors, like [`Matrix`].
///
/// # Examples
///
/// ```
/// # use gaussian::{sparse::SparseMatrix4, vector::Vector3};
/// let mut transform = SparseMatrix4::<f32>::identity();
/// transform.translate(Vector3::new([1.0, 2.0, 3.0]));
/// transform.scale(Vector3::splat(2.0));
///
/// let point = transform.transform_point(Vector3::new([1.0, 1.0, 1.0]));
/// assert_eq!(point, Vector3::new([3.0, 4.0, 5.0]));
/// assert_eq!(transform.entry(3, 3), 1.0);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(C)]
pub struct SparseMatrix4<T = f32> {
    data: [[T; 4]; 3],
}

pub type SparseMatrix4f = SparseMatrix4<f32>;
pub type SparseMatrix4d = SparseMatrix4<f64>;
pub type SparseMatrix4i = SparseMatrix4<i32>;

impl<T> SparseMatrix4<T> {
    /// The number of rows of the logical matrix.
    pub const ROWS: usize = 4;

    /// The number of columns of the logical matrix.
    pub const COLS: usize = 4;

    pub const ELEMENTS: usize = Self::ROWS * Self::COLS;

    /// The number of rows which are actually stored.
    pub const ROWS_SPARSE: usize = 3;

    pub const COLS_SPARSE: usize = 4;

    pub const ELEMENTS_SPARSE: usize = Self::ROWS_SPARSE * Self::COLS_SPARSE;

    /// Creates a transform from its three stored rows.
    #[must_use]
    #[inline]
    pub const fn new(data: [[T; 4]; 3]) -> Self {
        Self { data }
    }

    /// Creates a transform by calling `f(row, col)` for every stored element.
    #[must_use]
    #[inline]
    pub fn from_fn<F: FnMut(usize, usize) -> T>(mut f: F) -> Self {
        Self::new(array::from_fn(|row| array::from_fn(|col| f(row, col))))
    }

    #[must_use]
    #[inline]
    pub const fn uninit() -> SparseMatrix4<MaybeUninit<T>> {
        SparseMatrix4::new([const { [const { MaybeUninit::uninit() }; 4] }; 3])
    }

    #[must_use]
    #[inline]
    pub const fn as_array(&self) -> &[[T; 4]; 3] {
        &self.data
    }

    #[must_use]
    #[inline]
    pub fn to_array(self) -> [[T; 4]; 3] {
        self.data
    }

    /// Returns the 12 stored elements as a flat, row-major slice.
    #[must_use]
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), Self::ELEMENTS_SPARSE) }
    }

    #[must_use]
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), Self::ELEMENTS_SPARSE) }
    }

    #[must_use]
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr().cast()
    }

    #[must_use]
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr().cast()
    }

    /// Returns the stored element at `(row, col)`, or `None` if `row >= 3` or `col >= 4`.
    ///
    /// The implicit bottom row cannot be borrowed; read it with [`entry()`].
    ///
    /// [`entry()`]: SparseMatrix4::entry
    #[must_use]
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.data.get(row)?.get(col)
    }

    #[must_use]
    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.data.get_mut(row)?.get_mut(col)
    }

    /// Returns the stored element at the row-major linear `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 12`.
    #[track_caller]
    #[must_use]
    #[inline]
    pub fn element(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }

    #[track_caller]
    #[must_use]
    #[inline]
    pub fn element_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }

    #[must_use]
    #[inline]
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> SparseMatrix4<U> {
        SparseMatrix4::new(self.data.map(|row| row.map(&mut f)))
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T> SparseMatrix4<MaybeUninit<T>> {
    /// # Safety
    ///
    /// Every one of the 12 stored elements must have been initialized.
    #[must_use]
    #[inline]
    pub unsafe fn assume_init(self) -> SparseMatrix4<T> {
        SparseMatrix4::new(self.data.map(|row| unsafe { array_assume_init(row) }))
    }
}

/// Maps the stored element `(row, col)` to its index in an array with the given `layout`.
#[inline]
const fn layout_index(layout: Layout, row: usize, col: usize) -> usize {
    layout.linear_index(3, 4, row, col)
}

impl<T: Copy> SparseMatrix4<T> {
    /// Returns the translation column.
    #[must_use]
    #[inline]
    pub fn position(&self) -> Vector3<T> {
        Vector3::new(self.data.map(|row| row[3]))
    }

    #[inline]
    pub fn set_position(&mut self, position: Vector3<T>) {
        for (row, value) in self.data.iter_mut().zip(position) {
            row[3] = value;
        }
    }

    /// Writes the 12 stored elements in the given memory layout.
    ///
    /// Under [`RowVectors`] the stored block is transposed into 4 rows of 3
    /// columns, with the translation in the last row.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::{layout::{Layout, StorageOrder, VectorConvention}, sparse::SparseMatrix4};
    /// let matrix = SparseMatrix4::new([
    ///     [1, 2, 3, 4],
    ///     [5, 6, 7, 8],
    ///     [9, 10, 11, 12],
    /// ]);
    ///
    /// let row_vectors = Layout::new(StorageOrder::RowMajor, VectorConvention::RowVectors);
    /// assert_eq!(
    ///     matrix.to_layout_array(row_vectors),
    ///     [1, 5, 9, 2, 6, 10, 3, 7, 11, 4, 8, 12],
    /// );
    /// assert_eq!(SparseMatrix4::from_layout_array(row_vectors, matrix.to_layout_array(row_vectors)), matrix);
    /// ```
    ///
    /// [`RowVectors`]: crate::layout::VectorConvention::RowVectors
    #[must_use]
    #[inline]
    pub fn to_layout_array(&self, layout: Layout) -> [T; 12] {
        let mut out = [self.data[0][0]; 12];
        for (row, values) in self.data.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                out[layout_index(layout, row, col)] = *value;
            }
        }
        out
    }

    /// Reads the 12 stored elements from an array in the given memory layout.
    #[must_use]
    #[inline]
    pub fn from_layout_array(layout: Layout, elements: [T; 12]) -> Self {
        Self::from_fn(|row, col| elements[layout_index(layout, row, col)])
    }

    /// Writes the 12 stored elements in [`Layout::DEFAULT`], the layout selected by the
    /// `column-major` and `row-vectors` cargo features.
    #[must_use]
    #[inline]
    pub fn to_default_layout_array(&self) -> [T; 12] {
        self.to_layout_array(Layout::DEFAULT)
    }

    /// Reads the 12 stored elements from an array in [`Layout::DEFAULT`].
    #[must_use]
    #[inline]
    pub fn from_default_layout_array(elements: [T; 12]) -> Self {
        Self::from_layout_array(Layout::DEFAULT, elements)
    }

    #[inline]
    fn block(&self) -> [[T; 3]; 3] {
        self.data.map(|[a, b, c, _]| [a, b, c])
    }
}

impl<T: Zero> Zero for SparseMatrix4<T> {
    const ZERO: Self = SparseMatrix4::new(Zero::ZERO);
}

impl<T: Zero> Default for SparseMatrix4<T> {
    /// The transform with every stored element zero. The implicit bottom-right element is
    /// still one.
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<T: Zero> SparseMatrix4<T> {
    /// Sets every stored element to zero.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::ZERO;
    }
}

impl<T: Zero + One> SparseMatrix4<T> {
    #[must_use]
    #[inline]
    pub fn identity() -> Self {
        Self::from_fn(|row, col| if row == col { T::ONE } else { T::ZERO })
    }

    #[inline]
    pub fn load_identity(&mut self) {
        *self = Self::identity();
    }
}

impl<T: Copy + Zero + One> SparseMatrix4<T> {
    /// Returns the element `(row, col)` of the logical 4x4 matrix, including the implicit
    /// bottom row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= 4` or `col >= 4`.
    #[track_caller]
    #[must_use]
    #[inline]
    pub fn entry(&self, row: usize, col: usize) -> T {
        assert!(col < 4, "column {col} is out of range for a 4x4 matrix");
        match row {
            0..3 => self.data[row][col],
            3 if col == 3 => T::ONE,
            3 => T::ZERO,
            _ => panic!("row {row} is out of range for a 4x4 matrix"),
        }
    }

    /// Materializes the logical 4x4 matrix.
    #[must_use]
    #[inline]
    pub fn to_matrix(&self) -> Matrix4<T> {
        Matrix::from_fn(|row, col| self.entry(row, col))
    }

    /// Returns the transpose of the logical 4x4 matrix, with the implicit row as its last
    /// column. The result is no longer affine, so it is a dense matrix.
    #[must_use]
    #[inline]
    pub fn transpose(&self) -> Matrix4<T> {
        self.to_matrix().transpose()
    }

    #[must_use]
    #[inline]
    pub fn translation(offset: Vector3<T>) -> Self {
        let mut matrix = Self::identity();
        matrix.set_position(offset);
        matrix
    }

    #[must_use]
    #[inline]
    pub fn scaling(factors: Vector3<T>) -> Self {
        Self::from_fn(|row, col| if row == col { factors[row] } else { T::ZERO })
    }
}

impl<T: Copy + Zero + One + ClosedMul + ClosedAdd> SparseMatrix4<T> {
    /// Applies `offset` before the existing transform.
    #[inline]
    pub fn translate(&mut self, offset: Vector3<T>) {
        *self *= Self::translation(offset);
    }

    /// Applies a scale by `factors` before the existing transform.
    #[inline]
    pub fn scale(&mut self, factors: Vector3<T>) {
        *self *= Self::scaling(factors);
    }

    /// Transforms `point`, including the translation.
    #[must_use]
    #[inline]
    pub fn transform_point(&self, point: Vector3<T>) -> Vector3<T> {
        (*self * point.extend::<4>(T::ONE)).truncate()
    }

    /// Transforms the direction `vector`, ignoring the translation.
    #[must_use]
    #[inline]
    pub fn transform_vector(&self, vector: Vector3<T>) -> Vector3<T> {
        (*self * vector.extend::<4>(T::ZERO)).truncate()
    }

    /// The trace of the logical 4x4 matrix: `m00 + m11 + m22 + 1`.
    #[must_use]
    #[inline]
    pub fn trace(&self) -> T {
        self.data[0][0] + self.data[1][1] + self.data[2][2] + T::ONE
    }
}

impl<T: Float> SparseMatrix4<T> {
    /// Creates the rotation described by the unit quaternion `rotation`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::{rotation::{angle::Angle, quaternion::Quaternion}, sparse::SparseMatrix4, vector::Vector3};
    /// let quat = Quaternion::from_angle_axis(Angle::Degrees(90.0_f64), Vector3::Z);
    /// let rotated = SparseMatrix4::rotation(quat).transform_vector(Vector3::X);
    ///
    /// assert!((rotated - Vector3::<f64>::Y).len() < 1e-12);
    /// ```
    #[must_use]
    #[inline]
    pub fn rotation(rotation: Quaternion<T>) -> Self {
        let mut matrix = Self::identity();
        quaternion_to_matrix_transposed(&mut matrix, rotation);
        matrix
    }

    /// Applies `rotation` before the existing transform.
    #[inline]
    pub fn rotate(&mut self, rotation: Quaternion<T>) {
        *self *= Self::rotation(rotation);
    }
}

impl<T: Scalar> SparseMatrix4<T> {
    /// Calculates the determinant, which is that of the upper-left 3x3 block.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::sparse::SparseMatrix4;
    /// let matrix = SparseMatrix4::new([
    ///     [2, 0, 0, 7],
    ///     [0, 3, 0, 8],
    ///     [0, 0, 4, 9],
    /// ]);
    /// assert_eq!(matrix.determinant(), 24);
    /// assert_eq!(matrix.to_matrix().determinant(), 24);
    /// ```
    #[must_use]
    #[inline]
    pub fn determinant(&self) -> T {
        det3(self.block())
    }

    #[must_use]
    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.determinant() != T::ZERO
    }
}

impl<T: Real> SparseMatrix4<T> {

    /// Calculates the inverse transform, or `None` if the matrix is singular.
    ///
    /// The result is affine as well, so only its 12 stored elements are computed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::sparse::SparseMatrix4;
    /// let matrix = SparseMatrix4::new([
    ///     [2.0, 0.0, 0.0, 1.0],
    ///     [0.0, 4.0, 0.0, 2.0],
    ///     [0.0, 0.0, 8.0, 3.0],
    /// ]);
    ///
    /// assert_eq!(matrix.inverse_checked(), Some(SparseMatrix4::new([
    ///     [0.5, 0.0, 0.0, -0.5],
    ///     [0.0, 0.25, 0.0, -0.5],
    ///     [0.0, 0.0, 0.125, -0.375],
    /// ])));
    /// ```
    #[must_use]
    #[inline]
    pub fn inverse_checked(&self) -> Option<Self> {
        let block = self.block();
        let det = det3(block);
        if det == T::ZERO {
            log::debug!("cannot invert a singular affine 4x4 matrix");
            return None;
        }

        let adjugate = adjugate3(&block);
        let offset = self.position().to_array();
        let inv_det = T::ONE / det;
        Some(Self::from_fn(|row, col| {
            let adj = adjugate[row];
            if col < 3 {
                adj[col] * inv_det
            } else {
                -(adj[0] * offset[0] + adj[1] * offset[1] + adj[2] * offset[2]) * inv_det
            }
        }))
    }

    /// Writes the inverse transform to `out`.
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

    /// Inverts the transform in place, returning whether it succeeded. A singular matrix is
    /// left unchanged.
    #[inline]
    pub fn invert(&mut self) -> bool {
        let original = *self;
        original.inverse_into(self)
    }

    /// Returns the inverse transform, or the transform itself if it is singular.
    #[must_use]
    #[inline]
    pub fn inverse(&self) -> Self {
        self.inverse_checked().unwrap_or(*self)
    }
}

impl<T: Scalar> Determinant for SparseMatrix4<T> {
    type Scalar = T;

    #[inline]
    fn determinant(&self) -> T {
        SparseMatrix4::determinant(self)
    }
}

impl<T: Real> Inverse for SparseMatrix4<T> {
    #[inline]
    fn inverse_into(&self, out: &mut Self) -> bool {
        SparseMatrix4::inverse_into(self, out)
    }
}

impl<T> Index<usize> for SparseMatrix4<T> {
    type Output = [T; 4];
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for SparseMatrix4<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T> Index<(usize, usize)> for SparseMatrix4<T> {
    type Output = T;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row][col]
    }
}

impl<T> IndexMut<(usize, usize)> for SparseMatrix4<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row][col]
    }
}

/// Composes two affine transforms: `lhs * rhs` applies `rhs` first.
///
/// The implicit bottom rows are never materialized; only the left translation is added to the
/// last column.
impl<T> Mul for SparseMatrix4<T>
where
    T: Zero + Copy + ClosedMul + ClosedAdd,
{
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_fn(|row, col| {
            let product = sum((0..3).map(|i| self.data[row][i] * rhs.data[i][col]));
            if col == 3 {
                product + self.data[row][3]
            } else {
                product
            }
        })
    }
}

impl<T> MulAssign for SparseMatrix4<T>
where
    T: Zero + Copy + ClosedMul + ClosedAdd,
{
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T> Mul<Vector4<T>> for SparseMatrix4<T>
where
    T: Zero + Copy + ClosedMul + ClosedAdd,
{
    type Output = Vector4<T>;
    #[inline]
    fn mul(self, rhs: Vector4<T>) -> Self::Output {
        let v = rhs.to_array();
        let [x, y, z] = self.data.map(|row| sum((0..4).map(|i| row[i] * v[i])));
        Vector4::new([x, y, z, v[3]])
    }
}

impl<T: Copy + Zero + One> From<SparseMatrix4<T>> for Matrix4<T> {
    #[inline]
    fn from(value: SparseMatrix4<T>) -> Self {
        value.to_matrix()
    }
}

impl<T: Copy + Zero + One + PartialEq> TryFrom<Matrix4<T>> for SparseMatrix4<T> {
    type Error = NotAffineError;

    /// Drops the bottom row of `value`, which must be exactly `(0, 0, 0, 1)`.
    #[inline]
    fn try_from(value: Matrix4<T>) -> Result<Self, Self::Error> {
        if value.row(3) != [T::ZERO, T::ZERO, T::ZERO, T::ONE] {
            return Err(NotAffineError);
        }

        Ok(Self::from_fn(|row, col| value[(row, col)]))
    }
}

impl<T> From<Matrix3x4<T>> for SparseMatrix4<T> {
    #[inline]
    fn from(value: Matrix3x4<T>) -> Self {
        Self::new(value.to_array())
    }
}

impl<T> From<SparseMatrix4<T>> for Matrix3x4<T> {
    #[inline]
    fn from(value: SparseMatrix4<T>) -> Self {
        Matrix::new(value.data)
    }
}

impl<T> From<[[T; 4]; 3]> for SparseMatrix4<T> {
    #[inline]
    fn from(value: [[T; 4]; 3]) -> Self {
        Self::new(value)
    }
}

impl<T> AsRef<[T]> for SparseMatrix4<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> IntoIterator for &'a SparseMatrix4<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const _: () = {
    assert!(mem::size_of::<SparseMatrix4<f32>>() == 12 * mem::size_of::<f32>());
    assert!(mem::size_of::<SparseMatrix4<f64>>() == 12 * mem::size_of::<f64>());
};

#[cfg(feature = "mint")]
impl<T> From<mint::RowMatrix3x4<T>> for SparseMatrix4<T> {
    #[inline]
    fn from(value: mint::RowMatrix3x4<T>) -> Self {
        Matrix3x4::from(value).into()
    }
}

#[cfg(feature = "mint")]
impl<T> From<SparseMatrix4<T>> for mint::RowMatrix3x4<T> {
    #[inline]
    fn from(value: SparseMatrix4<T>) -> Self {
        Matrix3x4::from(value).into()
    }
}

#[cfg(feature = "mint")]
impl<T> mint::IntoMint for SparseMatrix4<T> {
    type MintType = mint::RowMatrix3x4<T>;
}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for SparseMatrix4<T> {}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for SparseMatrix4<T> {}

#[cfg(feature = "approx")]
impl<T: approx::AbsDiffEq> approx::AbsDiffEq for SparseMatrix4<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(x, y)| x.abs_diff_eq(y, epsilon))
    }
}

#[cfg(feature = "approx")]
impl<T: approx::RelativeEq> approx::RelativeEq for SparseMatrix4<T>
where
    T::Epsilon: Copy,
{
    #[inline]
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    #[inline]
    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(x, y)| x.relative_eq(y, epsilon, max_relative))
    }
}

#[cfg(feature = "approx")]
impl<T: approx::UlpsEq> approx::UlpsEq for SparseMatrix4<T>
where
    T::Epsilon: Copy,
{
    #[inline]
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    #[inline]
    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(x, y)| x.ulps_eq(y, epsilon, max_ulps))
    }
}
