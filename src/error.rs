// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors returned by the fallible conversions in this crate.
//!
//! Singular matrices are not errors: inversion reports them with a `bool` or an `Option`, and
//! leaves the destination untouched.

use thiserror::Error;

/// A matrix was built from a list holding the wrong number of elements.
///
/// # Examples
///
/// ```
/// # use gaussian::{error::ElementCountError, matrix::Matrix};
/// let err = Matrix::<i32, 2, 2>::from_elements([1, 2, 3]).unwrap_err();
/// assert_eq!(err, ElementCountError { expected: 4, found: 3 });
/// ```
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("expected exactly {expected} matrix elements, found {found}")]
pub struct ElementCountError {
    pub expected: usize,
    /// The number of elements found. Iterators are not drained past the first surplus element,
    /// so this is `expected + 1` for any iterator that is too long.
    pub found: usize,
}

/// A 4x4 matrix could not be stored as an affine transform, because its bottom row is not
/// exactly `(0, 0, 0, 1)`.
#[derive(Clone, Copy, Debug, Default, Eq, Error, Hash, PartialEq)]
#[error("matrix is not affine: the bottom row must be exactly (0, 0, 0, 1)")]
#[non_exhaustive]
pub struct NotAffineError;
