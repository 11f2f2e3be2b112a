// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dense matrices of any fixed size.

use crate::{
    const_assert_non_empty,
    error::ElementCountError,
    layout::{Layout, StorageOrder},
    utils::{
        arrays::{array_assume_init, try_array_from_fn},
        num::{ClosedAdd, ClosedMul, One, Zero},
        sum, zip_map,
    },
    vector::Vector,
};
#[cfg(feature = "serde")]
use core::marker::PhantomData;
use core::{
    array,
    borrow::{Borrow, BorrowMut},
    mem::{self, MaybeUninit},
    ops::{Add, AddAssign, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
    slice,
};
#[cfg(feature = "serde")]
use serde_core::{
    de::{self, Deserialize, Deserializer, Error, SeqAccess},
    ser::{Serialize, Serializer},
};

pub mod determinant;
pub mod inverse;

#[cfg(test)]
mod tests;

/// A row-major matrix of arbitrary dimensions.
///
/// Element `(row, col)` is stored at `row * COLS + col`, and vectors are multiplied on the
/// right (`matrix * column_vector`). Use the adapters in [`layout`](crate::layout) to exchange
/// matrices with code that expects another layout.
///
/// A matrix must hold at least one element: naming a constructor of a `Matrix<T, 0, N>` fails to
/// compile.
///
/// ```compile_fail
/// use gaussian::matrix::Matrix;
///
/// let _ = Matrix::<f32, 0, 3>::new([]);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(C)]
pub struct Matrix<T = f32, const ROWS: usize = 4, const COLS: usize = 4> {
    data: [[T; COLS]; ROWS],
}

pub type Matrix2<T = f32> = Matrix<T, 2, 2>;
pub type Matrix3<T = f32> = Matrix<T, 3, 3>;
pub type Matrix4<T = f32> = Matrix<T, 4, 4>;
pub type Matrix3x4<T = f32> = Matrix<T, 3, 4>;
pub type Matrix4x3<T = f32> = Matrix<T, 4, 3>;

impl<T: Default, const ROWS: usize, const COLS: usize> Default for Matrix<T, ROWS, COLS> {
    #[inline]
    fn default() -> Self {
        Self::from_fn(|_, _| Default::default())
    }
}

impl<T, const ROWS: usize, const COLS: usize> Matrix<T, ROWS, COLS> {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;
    pub const NUM_ELEMENTS: usize = ROWS * COLS;

    /// Create a new `Matrix` from the given nested array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let matrix = Matrix::new([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    /// ]);
    /// assert_eq!(matrix[(1, 0)], 4);
    /// ```
    #[must_use]
    #[inline]
    pub const fn new(data: [[T; COLS]; ROWS]) -> Self {
        const_assert_non_empty!(ROWS, COLS);
        Self { data }
    }

    /// Builds a matrix by calling `f(row, col)` for every element, row by row.
    #[must_use]
    #[inline]
    pub fn from_fn<F: FnMut(usize, usize) -> T>(mut f: F) -> Self {
        Self::new(array::from_fn(|row| array::from_fn(|col| f(row, col))))
    }

    /// Builds a matrix from exactly `ROWS * COLS` elements, given in row-major order.
    ///
    /// Surplus elements are not consumed: when `elements` yields too many values, the error
    /// reports one more than expected.
    ///
    /// # Errors
    ///
    /// Returns an [`ElementCountError`] if `elements` yields fewer or more values than the
    /// matrix holds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let matrix = Matrix::<i32, 2, 3>::from_elements([1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(matrix, Matrix::new([[1, 2, 3], [4, 5, 6]]));
    ///
    /// assert!(Matrix::<i32, 2, 3>::from_elements([1, 2, 3, 4, 5]).is_err());
    /// assert!(Matrix::<i32, 2, 3>::from_elements([1, 2, 3, 4, 5, 6, 7]).is_err());
    /// assert!(Matrix::<i32, 2, 3>::from_elements(core::iter::repeat(1)).is_err());
    /// ```
    #[inline]
    pub fn from_elements<I: IntoIterator<Item = T>>(
        elements: I,
    ) -> Result<Self, ElementCountError> {
        let expected = Self::NUM_ELEMENTS;
        let mut elements = elements.into_iter();

        let data = try_array_from_fn(|row| {
            try_array_from_fn(|col| {
                elements.next().ok_or(ElementCountError {
                    expected,
                    found: row * COLS + col,
                })
            })
        })?;

        if elements.next().is_some() {
            return Err(ElementCountError {
                expected,
                found: expected + 1,
            });
        }

        Ok(Self::new(data))
    }

    /// Creates a new `Matrix`, where every element is uninitialized.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let mut matrix = Matrix::<i32, 2, 2>::uninit();
    /// for (i, slot) in matrix.as_mut_slice().iter_mut().enumerate() {
    ///     slot.write(i as i32);
    /// }
    ///
    /// let matrix = unsafe { matrix.assume_init() };
    /// assert_eq!(matrix, Matrix::new([[0, 1], [2, 3]]));
    /// ```
    #[must_use]
    #[inline]
    pub const fn uninit() -> Matrix<MaybeUninit<T>, ROWS, COLS> {
        Matrix::new([const { [const { MaybeUninit::uninit() }; COLS] }; ROWS])
    }

    #[must_use]
    #[inline]
    pub const fn as_array(&self) -> &[[T; COLS]; ROWS] {
        &self.data
    }

    #[must_use]
    #[inline]
    pub const fn as_array_mut(&mut self) -> &mut [[T; COLS]; ROWS] {
        &mut self.data
    }

    #[must_use]
    #[inline]
    pub fn to_array(self) -> [[T; COLS]; ROWS] {
        self.data
    }

    /// Returns every element of the matrix as a flat, row-major slice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let matrix = Matrix::new([[1, 2], [3, 4], [5, 6]]);
    /// assert_eq!(matrix.as_slice(), &[1, 2, 3, 4, 5, 6]);
    /// ```
    #[must_use]
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), ROWS * COLS) }
    }

    #[must_use]
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), ROWS * COLS) }
    }

    /// Returns a pointer to the first element, for handing the matrix to foreign code.
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

    /// Attempt to get a reference to the element at `(row, col)`.
    ///
    /// This method returns `None` if either of the given indices are out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaussian::matrix::Matrix;
    ///
    /// let matrix: Matrix<f32, _, _> = Matrix::new([
    ///     [5.0, 6.0, 4.0, 2.0],
    ///     [1.0, 1.0, 3.0, 4.0],
    ///     [2.0, 7.0, 9.0, 0.0],
    /// ]);
    ///
    /// assert_eq!(matrix.get(1, 2), Some(&3.0));
    /// assert_eq!(matrix.get(3, 0), None);
    /// ```
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

    /// Returns the element at the row-major linear `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= ROWS * COLS`.
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

    /// Sets the column of the `Matrix` at `col_idx` to the given `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col_idx >= COLS`.
    #[track_caller]
    #[inline]
    pub fn set_col(&mut self, col_idx: usize, col: [T; ROWS]) {
        if self.try_set_col(col_idx, col).is_err() {
            panic!("column index {col_idx} out of bounds for a matrix with {COLS} columns");
        }
    }

    /// Sets the column at `col_idx`, handing `col` back if the index is out of bounds.
    #[inline]
    pub fn try_set_col(&mut self, col_idx: usize, col: [T; ROWS]) -> Result<(), [T; ROWS]> {
        if col_idx >= COLS {
            return Err(col);
        }

        for (row, elem) in self.data.iter_mut().zip(col) {
            row[col_idx] = elem;
        }

        Ok(())
    }

    /// Sets the row of the `Matrix` at `row_idx` to the given `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row_idx >= ROWS`.
    #[track_caller]
    #[inline]
    pub fn set_row(&mut self, row_idx: usize, row: [T; COLS]) {
        self.data[row_idx] = row;
    }

    /// Sets the row at `row_idx`, handing `row` back if the index is out of bounds.
    #[inline]
    pub fn try_set_row(&mut self, row_idx: usize, row: [T; COLS]) -> Result<(), [T; COLS]> {
        match self.data.get_mut(row_idx) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(row),
        }
    }

    #[inline]
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Matrix<U, ROWS, COLS> {
        Matrix::new(self.data.map(|row| row.map(&mut f)))
    }

    #[inline]
    pub fn zip_map<U, Ret, F: FnMut(T, U) -> Ret>(
        self,
        rhs: Matrix<U, ROWS, COLS>,
        mut f: F,
    ) -> Matrix<Ret, ROWS, COLS> {
        Matrix::new(zip_map(self.data, rhs.data, |lhs, rhs| {
            zip_map(lhs, rhs, &mut f)
        }))
    }

    /// Returns the transpose of the matrix, where every row of `self` becomes a column.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let matrix = Matrix::new([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    /// ]);
    ///
    /// assert_eq!(matrix.transpose(), Matrix::new([
    ///     [1, 4],
    ///     [2, 5],
    ///     [3, 6],
    /// ]));
    /// ```
    #[must_use]
    #[inline]
    pub fn transpose(self) -> Matrix<T, COLS, ROWS> {
        let mut transposed = Matrix::<T, COLS, ROWS>::uninit();
        for (row, elems) in self.data.into_iter().enumerate() {
            for (col, elem) in elems.into_iter().enumerate() {
                transposed.data[col][row].write(elem);
            }
        }

        unsafe { transposed.assume_init() }
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Maps `(row, col)` to a position in linear memory laid out with `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::{layout::StorageOrder, matrix::Matrix};
    /// assert_eq!(Matrix::<f32, 3, 4>::linear_index(StorageOrder::RowMajor, 1, 2), 6);
    /// assert_eq!(Matrix::<f32, 3, 4>::linear_index(StorageOrder::ColumnMajor, 1, 2), 7);
    /// ```
    #[must_use]
    #[inline]
    pub const fn linear_index(order: StorageOrder, row: usize, col: usize) -> usize {
        order.linear_index(ROWS, COLS, row, col)
    }
}

impl<T: Copy, const ROWS: usize, const COLS: usize> Matrix<T, ROWS, COLS> {
    /// Creates a matrix with every element set to `value`.
    #[must_use]
    #[inline]
    pub const fn splat(value: T) -> Self {
        Self::new([[value; COLS]; ROWS])
    }

    #[track_caller]
    #[must_use]
    #[inline]
    pub const fn row(&self, n: usize) -> [T; COLS] {
        self.data[n]
    }

    #[track_caller]
    #[must_use]
    #[inline]
    pub fn col(&self, n: usize) -> [T; ROWS] {
        assert!(n < COLS, "column index out of bounds");
        self.data.map(|row| row[n])
    }

    /// Copies the matrix into `out`, with the elements in the given storage `order`.
    ///
    /// # Errors
    ///
    /// Returns an [`ElementCountError`] if `out` is not exactly `ROWS * COLS` elements long.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::{layout::StorageOrder, matrix::Matrix};
    /// let matrix = Matrix::new([[1, 2, 3], [4, 5, 6]]);
    ///
    /// let mut column_major = [0; 6];
    /// matrix.write_to_slice(StorageOrder::ColumnMajor, &mut column_major).unwrap();
    /// assert_eq!(column_major, [1, 4, 2, 5, 3, 6]);
    /// ```
    #[inline]
    pub fn write_to_slice(&self, order: StorageOrder, out: &mut [T]) -> Result<(), ElementCountError> {
        self.write_with(out, |row, col| Self::linear_index(order, row, col))
    }

    /// Copies the matrix into `out` in [`Layout::DEFAULT`], the layout selected by the
    /// `column-major` and `row-vectors` cargo features.
    ///
    /// Under [`VectorConvention::RowVectors`] the transpose is written.
    ///
    /// # Errors
    ///
    /// Returns an [`ElementCountError`] if `out` is not exactly `ROWS * COLS` elements long.
    ///
    /// [`VectorConvention::RowVectors`]: crate::layout::VectorConvention::RowVectors
    #[inline]
    pub fn write_to_slice_default(&self, out: &mut [T]) -> Result<(), ElementCountError> {
        self.write_with(out, |row, col| {
            Layout::DEFAULT.linear_index(ROWS, COLS, row, col)
        })
    }

    /// Reads a matrix from `elements`, which are laid out in the given storage `order`.
    ///
    /// # Errors
    ///
    /// Returns an [`ElementCountError`] if `elements` is not exactly `ROWS * COLS` long.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::{layout::StorageOrder, matrix::Matrix};
    /// let matrix = Matrix::<i32, 2, 3>::from_slice_with(
    ///     StorageOrder::ColumnMajor,
    ///     &[1, 4, 2, 5, 3, 6],
    /// ).unwrap();
    ///
    /// assert_eq!(matrix, Matrix::new([[1, 2, 3], [4, 5, 6]]));
    /// ```
    #[inline]
    pub fn from_slice_with(order: StorageOrder, elements: &[T]) -> Result<Self, ElementCountError> {
        Self::read_with(elements, |row, col| Self::linear_index(order, row, col))
    }

    /// Reads a matrix from `elements`, which are laid out in [`Layout::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns an [`ElementCountError`] if `elements` is not exactly `ROWS * COLS` long.
    #[inline]
    pub fn from_slice_default(elements: &[T]) -> Result<Self, ElementCountError> {
        Self::read_with(elements, |row, col| {
            Layout::DEFAULT.linear_index(ROWS, COLS, row, col)
        })
    }

    #[inline]
    fn write_with<F: Fn(usize, usize) -> usize>(
        &self,
        out: &mut [T],
        index: F,
    ) -> Result<(), ElementCountError> {
        if out.len() != Self::NUM_ELEMENTS {
            return Err(ElementCountError {
                expected: Self::NUM_ELEMENTS,
                found: out.len(),
            });
        }

        for (row, elems) in self.data.iter().enumerate() {
            for (col, elem) in elems.iter().enumerate() {
                out[index(row, col)] = *elem;
            }
        }

        Ok(())
    }

    #[inline]
    fn read_with<F: Fn(usize, usize) -> usize>(
        elements: &[T],
        index: F,
    ) -> Result<Self, ElementCountError> {
        if elements.len() != Self::NUM_ELEMENTS {
            return Err(ElementCountError {
                expected: Self::NUM_ELEMENTS,
                found: elements.len(),
            });
        }

        Ok(Self::from_fn(|row, col| elements[index(row, col)]))
    }
}

impl<T, const ROWS: usize, const COLS: usize> Matrix<MaybeUninit<T>, ROWS, COLS> {
    /// # Safety
    ///
    /// Every element of the matrix must have been written to.
    #[must_use]
    #[inline]
    pub unsafe fn assume_init(self) -> Matrix<T, ROWS, COLS> {
        let rows = self.data.map(|row| unsafe { array_assume_init(row) });
        Matrix::new(rows)
    }
}

impl<T: Zero, const ROWS: usize, const COLS: usize> Zero for Matrix<T, ROWS, COLS> {
    const ZERO: Self = Matrix::new(Zero::ZERO);
}

impl<T: Zero, const ROWS: usize, const COLS: usize> Matrix<T, ROWS, COLS> {
    /// Sets every element to zero.
    #[inline]
    pub fn reset(&mut self) {
        for elem in self.iter_mut() {
            *elem = T::ZERO;
        }
    }
}

impl<T: Zero + One, const N: usize> Matrix<T, N, N> {
    /// Constructs an instance of the identity matrix.
    ///
    /// Only square matrices have an identity:
    ///
    /// ```compile_fail
    /// use gaussian::matrix::Matrix;
    ///
    /// let _ = Matrix::<f32, 3, 4>::identity();
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let matrix = Matrix::<f64, 3, 3>::identity();
    ///
    /// assert_eq!(matrix, Matrix::new([
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.0, 0.0, 1.0],
    /// ]));
    /// ```
    #[must_use]
    #[inline]
    pub fn identity() -> Self {
        Self::from_fn(|row, col| if row == col { T::ONE } else { T::ZERO })
    }

    /// Overwrites the matrix with the identity matrix.
    #[inline]
    pub fn load_identity(&mut self) {
        *self = Self::identity();
    }
}

impl<T, const N: usize> Matrix<T, N, N> {
    /// Transposes a square matrix in place.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::matrix::Matrix;
    /// let mut matrix = Matrix::new([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    ///     [7, 8, 9],
    /// ]);
    ///
    /// matrix.transpose_in_place();
    /// assert_eq!(matrix, Matrix::new([
    ///     [1, 4, 7],
    ///     [2, 5, 8],
    ///     [3, 6, 9],
    /// ]));
    /// ```
    #[inline]
    pub fn transpose_in_place(&mut self) {
        for row in 0..N {
            for col in (row + 1)..N {
                let (upper, lower) = self.data.split_at_mut(col);
                mem::swap(&mut upper[row][col], &mut lower[0][row]);
            }
        }
    }
}

impl<T, const ROWS: usize, const COLS: usize> Index<usize> for Matrix<T, ROWS, COLS> {
    type Output = [T; COLS];
    #[track_caller]
    #[inline]
    fn index(&self, row: usize) -> &Self::Output {
        &self.data[row]
    }
}

impl<T, const ROWS: usize, const COLS: usize> IndexMut<usize> for Matrix<T, ROWS, COLS> {
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        &mut self.data[row]
    }
}

impl<T, const ROWS: usize, const COLS: usize> Index<(usize, usize)> for Matrix<T, ROWS, COLS> {
    type Output = T;
    #[track_caller]
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row][col]
    }
}

impl<T, const ROWS: usize, const COLS: usize> IndexMut<(usize, usize)> for Matrix<T, ROWS, COLS> {
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row][col]
    }
}

impl<T, const A: usize, const B: usize, const C: usize> Mul<Matrix<T, B, C>> for Matrix<T, A, B>
where
    T: Zero + Copy + ClosedMul + ClosedAdd,
{
    type Output = Matrix<T, A, C>;
    #[inline]
    fn mul(self, rhs: Matrix<T, B, C>) -> Self::Output {
        Matrix::from_fn(|row, col| sum((0..B).map(|i| self.data[row][i] * rhs.data[i][col])))
    }
}

impl<T, const N: usize> MulAssign<Matrix<T, N, N>> for Matrix<T, N, N>
where
    T: Zero + Copy + ClosedMul + ClosedAdd,
{
    #[inline]
    fn mul_assign(&mut self, rhs: Matrix<T, N, N>) {
        *self = *self * rhs;
    }
}

impl<T: Copy + Mul, const ROWS: usize, const COLS: usize> Mul<T> for Matrix<T, ROWS, COLS> {
    type Output = Matrix<T::Output, ROWS, COLS>;
    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        self.map(|elem| elem * rhs)
    }
}

macro_rules! impl_scalar_lhs_mul {
    ( $($ty:ty),* $(,)? ) => {
        $(
            impl<const ROWS: usize, const COLS: usize> Mul<Matrix<$ty, ROWS, COLS>> for $ty {
                type Output = Matrix<$ty, ROWS, COLS>;
                #[inline]
                fn mul(self, rhs: Matrix<$ty, ROWS, COLS>) -> Self::Output {
                    rhs.map(|elem| self * elem)
                }
            }
        )*
    };
}

impl_scalar_lhs_mul! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
}

impl<T: Copy + MulAssign, const ROWS: usize, const COLS: usize> MulAssign<T>
    for Matrix<T, ROWS, COLS>
{
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        for elem in self.iter_mut() {
            elem.mul_assign(rhs);
        }
    }
}

impl<T: Copy + DivAssign, const ROWS: usize, const COLS: usize> DivAssign<T>
    for Matrix<T, ROWS, COLS>
{
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        for elem in self.iter_mut() {
            elem.div_assign(rhs);
        }
    }
}

impl<T: Add<U>, U, const ROWS: usize, const COLS: usize> Add<Matrix<U, ROWS, COLS>>
    for Matrix<T, ROWS, COLS>
{
    type Output = Matrix<T::Output, ROWS, COLS>;
    #[inline]
    fn add(self, rhs: Matrix<U, ROWS, COLS>) -> Self::Output {
        self.zip_map(rhs, Add::add)
    }
}

impl<T: AddAssign<U>, U, const ROWS: usize, const COLS: usize> AddAssign<Matrix<U, ROWS, COLS>>
    for Matrix<T, ROWS, COLS>
{
    #[inline]
    fn add_assign(&mut self, rhs: Matrix<U, ROWS, COLS>) {
        for (lhs, rhs) in self.data.iter_mut().flatten().zip(rhs.data.into_iter().flatten()) {
            lhs.add_assign(rhs);
        }
    }
}

impl<T: Sub<U>, U, const ROWS: usize, const COLS: usize> Sub<Matrix<U, ROWS, COLS>>
    for Matrix<T, ROWS, COLS>
{
    type Output = Matrix<T::Output, ROWS, COLS>;
    #[inline]
    fn sub(self, rhs: Matrix<U, ROWS, COLS>) -> Self::Output {
        self.zip_map(rhs, Sub::sub)
    }
}

impl<T: SubAssign<U>, U, const ROWS: usize, const COLS: usize> SubAssign<Matrix<U, ROWS, COLS>>
    for Matrix<T, ROWS, COLS>
{
    #[inline]
    fn sub_assign(&mut self, rhs: Matrix<U, ROWS, COLS>) {
        for (lhs, rhs) in self.data.iter_mut().flatten().zip(rhs.data.into_iter().flatten()) {
            lhs.sub_assign(rhs);
        }
    }
}

impl<T: Neg, const ROWS: usize, const COLS: usize> Neg for Matrix<T, ROWS, COLS> {
    type Output = Matrix<T::Output, ROWS, COLS>;
    #[inline]
    fn neg(self) -> Self::Output {
        self.map(Neg::neg)
    }
}

/// Transforms a column vector: `(matrix * v)[row] = dot(matrix.row(row), v)`.
impl<T, const ROWS: usize, const COLS: usize> Mul<Vector<T, COLS>> for Matrix<T, ROWS, COLS>
where
    T: Zero + Copy + ClosedMul + ClosedAdd,
{
    type Output = Vector<T, ROWS>;
    #[inline]
    fn mul(self, rhs: Vector<T, COLS>) -> Self::Output {
        let rhs = rhs.to_array();
        Vector::new(self.data.map(|row| sum(zip_map(row, rhs, Mul::mul))))
    }
}

impl<T, const ROWS: usize, const COLS: usize> Matrix<T, ROWS, COLS>
where
    T: Zero + Copy + ClosedMul + ClosedAdd,
{
    /// Transforms a row vector, `vector * self`: `result[col] = dot(vector, self.col(col))`.
    ///
    /// The operator form needs the vector's element type to be known, because `Vector * T`
    /// scales a vector. Write `Vector3::<f64>::X * matrix`, or call this method instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::{matrix::Matrix, vector::Vector3};
    /// let matrix = Matrix::new([
    ///     [1.0, 2.0, 3.0],
    ///     [4.0, 5.0, 6.0],
    ///     [7.0, 8.0, 9.0],
    /// ]);
    ///
    /// assert_eq!(matrix.premul(Vector3::X), Vector3::new([1.0, 2.0, 3.0]));
    /// assert_eq!(Vector3::<f64>::Y * matrix, Vector3::new([4.0, 5.0, 6.0]));
    /// ```
    #[must_use]
    #[inline]
    pub fn premul(&self, vector: Vector<T, ROWS>) -> Vector<T, COLS> {
        Vector::from_fn(|col| sum((0..ROWS).map(|row| vector[row] * self.data[row][col])))
    }
}

/// Transforms a row vector. See [`Matrix::premul`].
impl<T, const ROWS: usize, const COLS: usize> Mul<Matrix<T, ROWS, COLS>> for Vector<T, ROWS>
where
    T: Zero + Copy + ClosedMul + ClosedAdd,
{
    type Output = Vector<T, COLS>;
    #[inline]
    fn mul(self, rhs: Matrix<T, ROWS, COLS>) -> Self::Output {
        rhs.premul(self)
    }
}

impl<T, const ROWS: usize, const COLS: usize> From<[[T; COLS]; ROWS]> for Matrix<T, ROWS, COLS> {
    #[inline]
    fn from(value: [[T; COLS]; ROWS]) -> Self {
        Self::new(value)
    }
}

impl<T, const ROWS: usize, const COLS: usize> From<Matrix<T, ROWS, COLS>> for [[T; COLS]; ROWS] {
    #[inline]
    fn from(value: Matrix<T, ROWS, COLS>) -> Self {
        value.data
    }
}

impl<T: Copy, const ROWS: usize, const COLS: usize> TryFrom<&[T]> for Matrix<T, ROWS, COLS> {
    type Error = ElementCountError;

    #[inline]
    fn try_from(value: &[T]) -> Result<Self, Self::Error> {
        if value.len() != Self::NUM_ELEMENTS {
            return Err(ElementCountError {
                expected: Self::NUM_ELEMENTS,
                found: value.len(),
            });
        }

        Self::from_elements(value.iter().copied())
    }
}

impl<T, const ROWS: usize, const COLS: usize> AsRef<[T]> for Matrix<T, ROWS, COLS> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const ROWS: usize, const COLS: usize> AsMut<[T]> for Matrix<T, ROWS, COLS> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const ROWS: usize, const COLS: usize> Borrow<[T]> for Matrix<T, ROWS, COLS> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const ROWS: usize, const COLS: usize> BorrowMut<[T]> for Matrix<T, ROWS, COLS> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const ROWS: usize, const COLS: usize> AsRef<[[T; COLS]; ROWS]> for Matrix<T, ROWS, COLS> {
    #[inline]
    fn as_ref(&self) -> &[[T; COLS]; ROWS] {
        &self.data
    }
}

impl<T, const ROWS: usize, const COLS: usize> AsMut<[[T; COLS]; ROWS]> for Matrix<T, ROWS, COLS> {
    #[inline]
    fn as_mut(&mut self) -> &mut [[T; COLS]; ROWS] {
        &mut self.data
    }
}

impl<'a, T, const ROWS: usize, const COLS: usize> IntoIterator for &'a Matrix<T, ROWS, COLS> {
    type IntoIter = slice::Iter<'a, T>;
    type Item = &'a T;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const ROWS: usize, const COLS: usize> IntoIterator for &'a mut Matrix<T, ROWS, COLS> {
    type IntoIter = slice::IterMut<'a, T>;
    type Item = &'a mut T;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Conversions to and from the `mint` matrix types.
///
/// `mint` row matrices hold one vector per row, which matches this crate's layout. Column
/// matrices hold one vector per column, so they go through a transpose.
macro_rules! impl_mint_conversions {
    (
        $(
            ($rows:literal, $cols:literal)
                => $row_matrix:ident { $( $row:ident ),+ }, $col_matrix:ident { $( $col:ident ),+ }
        )*
    ) => {
        $(
            #[cfg(feature = "mint")]
            impl<T> From<mint::$row_matrix<T>> for Matrix<T, $rows, $cols> {
                #[inline]
                fn from(value: mint::$row_matrix<T>) -> Self {
                    Matrix::new([ $( value.$row.into() ),+ ])
                }
            }

            #[cfg(feature = "mint")]
            impl<T> From<Matrix<T, $rows, $cols>> for mint::$row_matrix<T> {
                #[inline]
                fn from(value: Matrix<T, $rows, $cols>) -> Self {
                    mint::$row_matrix::from(value.to_array())
                }
            }

            #[cfg(feature = "mint")]
            impl<T> mint::IntoMint for Matrix<T, $rows, $cols> {
                type MintType = mint::$row_matrix<T>;
            }

            #[cfg(feature = "mint")]
            impl<T> From<mint::$col_matrix<T>> for Matrix<T, $rows, $cols> {
                #[inline]
                fn from(value: mint::$col_matrix<T>) -> Self {
                    Matrix::<T, $cols, $rows>::new([ $( value.$col.into() ),+ ]).transpose()
                }
            }

            #[cfg(feature = "mint")]
            impl<T> From<Matrix<T, $rows, $cols>> for mint::$col_matrix<T> {
                #[inline]
                fn from(value: Matrix<T, $rows, $cols>) -> Self {
                    mint::$col_matrix::from(value.transpose().to_array())
                }
            }

            #[cfg(feature = "mint")]
            impl<T: PartialEq> PartialEq<mint::$row_matrix<T>> for Matrix<T, $rows, $cols> {
                #[inline]
                fn eq(&self, other: &mint::$row_matrix<T>) -> bool {
                    let rhs: &[T; $rows * $cols] = other.as_ref();
                    self.as_slice() == &rhs[..]
                }
            }

            #[cfg(feature = "mint")]
            impl<T: PartialEq> PartialEq<mint::$col_matrix<T>> for Matrix<T, $rows, $cols> {
                #[inline]
                fn eq(&self, other: &mint::$col_matrix<T>) -> bool {
                    let cols: &[[T; $rows]; $cols] = other.as_ref();
                    (0..$cols).all(|col| (0..$rows).all(|row| self.data[row][col] == cols[col][row]))
                }
            }
        )*
    };
}

impl_mint_conversions! {
    (2, 2) => RowMatrix2 { x, y }, ColumnMatrix2 { x, y }
    (3, 3) => RowMatrix3 { x, y, z }, ColumnMatrix3 { x, y, z }
    (4, 4) => RowMatrix4 { x, y, z, w }, ColumnMatrix4 { x, y, z, w }
    (2, 3) => RowMatrix2x3 { x, y }, ColumnMatrix2x3 { x, y, z }
    (2, 4) => RowMatrix2x4 { x, y }, ColumnMatrix2x4 { x, y, z, w }
    (3, 2) => RowMatrix3x2 { x, y, z }, ColumnMatrix3x2 { x, y }
    (3, 4) => RowMatrix3x4 { x, y, z }, ColumnMatrix3x4 { x, y, z, w }
    (4, 2) => RowMatrix4x2 { x, y, z, w }, ColumnMatrix4x2 { x, y }
    (4, 3) => RowMatrix4x3 { x, y, z, w }, ColumnMatrix4x3 { x, y, z }
}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Zeroable, const ROWS: usize, const COLS: usize> bytemuck::Zeroable
    for Matrix<T, ROWS, COLS>
{
}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Pod, const ROWS: usize, const COLS: usize> bytemuck::Pod
    for Matrix<T, ROWS, COLS>
{
}

#[cfg(feature = "approx")]
impl<T: approx::AbsDiffEq, const ROWS: usize, const COLS: usize> approx::AbsDiffEq
    for Matrix<T, ROWS, COLS>
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
impl<T: approx::RelativeEq, const ROWS: usize, const COLS: usize> approx::RelativeEq
    for Matrix<T, ROWS, COLS>
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
impl<T: approx::UlpsEq, const ROWS: usize, const COLS: usize> approx::UlpsEq
    for Matrix<T, ROWS, COLS>
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

/// Matrices serialize as a flat, row-major sequence of `ROWS * COLS` elements.
#[cfg(feature = "serde")]
impl<T: Serialize, const ROWS: usize, const COLS: usize> Serialize for Matrix<T, ROWS, COLS> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Deserialize<'de>, const ROWS: usize, const COLS: usize> Deserialize<'de>
    for Matrix<T, ROWS, COLS>
{
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExpectedElements(usize);

        impl de::Expected for ExpectedElements {
            #[inline]
            fn fmt(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(formatter, "a sequence of {} matrix elements", self.0)
            }
        }

        struct Visitor<T, const ROWS: usize, const COLS: usize>(PhantomData<Matrix<T, ROWS, COLS>>);

        impl<'de, T: Deserialize<'de>, const ROWS: usize, const COLS: usize> de::Visitor<'de>
            for Visitor<T, ROWS, COLS>
        {
            type Value = Matrix<T, ROWS, COLS>;

            #[inline]
            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                de::Expected::fmt(&ExpectedElements(ROWS * COLS), formatter)
            }

            #[inline]
            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let expected = ExpectedElements(ROWS * COLS);
                let data = try_array_from_fn(|row| {
                    try_array_from_fn(|col| {
                        seq.next_element::<T>()?
                            .ok_or_else(|| A::Error::invalid_length(row * COLS + col, &expected))
                    })
                })?;

                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(A::Error::invalid_length(ROWS * COLS + 1, &expected));
                }

                Ok(Matrix::new(data))
            }
        }

        deserializer.deserialize_seq(Visitor::<T, ROWS, COLS>(PhantomData))
    }
}
