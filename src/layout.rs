// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory layouts for exchanging matrices with code that expects a particular element order.
//!
//! Every matrix in this crate is stored row-major, with points transformed as column vectors
//! (`M * v`). Graphics APIs and file formats disagree about both choices, so the layout is only
//! applied at the boundary: [`Matrix::write_to_slice`], [`Matrix::from_slice_with`],
//! [`SparseMatrix4::to_layout_array`] and [`SparseMatrix4::from_layout_array`] translate between
//! the internal representation and any of the four layouts described here.
//!
//! The crate-wide default is [`Layout::DEFAULT`], selected with the `column-major` and
//! `row-vectors` cargo features. It is what [`Matrix::write_to_slice_default`],
//! [`Matrix::from_slice_default`], [`SparseMatrix4::to_default_layout_array`] and
//! [`SparseMatrix4::from_default_layout_array`] use.
//!
//! [`Matrix::write_to_slice`]: crate::matrix::Matrix::write_to_slice
//! [`Matrix::from_slice_with`]: crate::matrix::Matrix::from_slice_with
//! [`SparseMatrix4::to_layout_array`]: crate::sparse::SparseMatrix4::to_layout_array
//! [`SparseMatrix4::from_layout_array`]: crate::sparse::SparseMatrix4::from_layout_array
//! [`Matrix::write_to_slice_default`]: crate::matrix::Matrix::write_to_slice_default
//! [`Matrix::from_slice_default`]: crate::matrix::Matrix::from_slice_default
//! [`SparseMatrix4::to_default_layout_array`]: crate::sparse::SparseMatrix4::to_default_layout_array
//! [`SparseMatrix4::from_default_layout_array`]: crate::sparse::SparseMatrix4::from_default_layout_array

/// The order in which the elements of a matrix are laid out in linear memory.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum StorageOrder {
    /// Element `(r, c)` lives at index `r * COLS + c`.
    #[default]
    RowMajor,
    /// Element `(r, c)` lives at index `c * ROWS + r`.
    ColumnMajor,
}

impl StorageOrder {
    /// Maps the element `(row, col)` of a `rows x cols` matrix to its linear index.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::layout::StorageOrder;
    /// assert_eq!(StorageOrder::RowMajor.linear_index(2, 3, 1, 2), 5);
    /// assert_eq!(StorageOrder::ColumnMajor.linear_index(2, 3, 1, 2), 5);
    /// assert_eq!(StorageOrder::ColumnMajor.linear_index(2, 3, 0, 1), 2);
    /// ```
    #[must_use]
    #[inline]
    pub const fn linear_index(self, rows: usize, cols: usize, row: usize, col: usize) -> usize {
        match self {
            StorageOrder::RowMajor => row * cols + col,
            StorageOrder::ColumnMajor => col * rows + row,
        }
    }
}

/// Whether points are transformed as column vectors (`M * v`) or as row vectors (`v * M`).
///
/// The convention decides which side of an affine transform holds the translation, and so which
/// dimension of a [`SparseMatrix4`] is left implicit.
///
/// [`SparseMatrix4`]: crate::sparse::SparseMatrix4
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum VectorConvention {
    /// The translation is the last column, and the implicit `(0, 0, 0, 1)` is the last row.
    #[default]
    ColumnVectors,
    /// The translation is the last row, and the implicit `(0, 0, 0, 1)` is the last column.
    RowVectors,
}

/// A combination of a [`StorageOrder`] and a [`VectorConvention`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Layout {
    pub order: StorageOrder,
    pub convention: VectorConvention,
}

impl Layout {
    /// The layout of the in-memory representation of every matrix in this crate.
    pub const NATIVE: Layout = Layout::new(StorageOrder::RowMajor, VectorConvention::ColumnVectors);

    /// The layout used by the adapters when the caller does not name one.
    ///
    /// Row-major with column vectors, unless the `column-major` or `row-vectors` cargo features
    /// are enabled.
    pub const DEFAULT: Layout = Layout::new(
        if cfg!(feature = "column-major") {
            StorageOrder::ColumnMajor
        } else {
            StorageOrder::RowMajor
        },
        if cfg!(feature = "row-vectors") {
            VectorConvention::RowVectors
        } else {
            VectorConvention::ColumnVectors
        },
    );

    #[must_use]
    #[inline]
    pub const fn new(order: StorageOrder, convention: VectorConvention) -> Self {
        Self { order, convention }
    }

    /// Maps the element `(row, col)` of a `rows x cols` matrix, stored natively, to its linear
    /// index in this layout.
    ///
    /// Under [`VectorConvention::RowVectors`] the matrix is written transposed, as `cols` rows of
    /// `rows` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::layout::{Layout, StorageOrder, VectorConvention};
    /// let row_vectors = Layout::new(StorageOrder::RowMajor, VectorConvention::RowVectors);
    /// assert_eq!(row_vectors.linear_index(3, 4, 0, 1), 3);
    /// assert_eq!(Layout::NATIVE.linear_index(3, 4, 0, 1), 1);
    /// ```
    #[must_use]
    #[inline]
    pub const fn linear_index(self, rows: usize, cols: usize, row: usize, col: usize) -> usize {
        match self.convention {
            VectorConvention::ColumnVectors => self.order.linear_index(rows, cols, row, col),
            VectorConvention::RowVectors => self.order.linear_index(cols, rows, col, row),
        }
    }

    /// All four layouts.
    pub const ALL: [Layout; 4] = [
        Layout::new(StorageOrder::RowMajor, VectorConvention::ColumnVectors),
        Layout::new(StorageOrder::RowMajor, VectorConvention::RowVectors),
        Layout::new(StorageOrder::ColumnMajor, VectorConvention::ColumnVectors),
        Layout::new(StorageOrder::ColumnMajor, VectorConvention::RowVectors),
    ];
}
