// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::utils::num::{ClosedAdd, Zero};
use core::ops::Add;

pub mod assertions {
    #[macro_export]
    macro_rules! const_assert_larger {
        ($x:expr, $y:expr) => {
            #[allow(path_statements)]
            <$crate::utils::assertions::AssertLarger<$x, $y>>::ASSERT;
        };
    }

    #[macro_export]
    macro_rules! const_assert_smaller_or_equal {
        ($x:expr, $y:expr) => {
            #[allow(path_statements)]
            <$crate::utils::assertions::AssertSmallerOrEqual<$x, $y>>::ASSERT;
        };
    }

    /// Rejects a `ROWS x COLS` shape that holds no elements.
    #[macro_export]
    macro_rules! const_assert_non_empty {
        ($rows:expr, $cols:expr) => {
            #[allow(path_statements)]
            <$crate::utils::assertions::AssertNonEmpty<$rows, $cols>>::ASSERT;
        };
    }

    #[non_exhaustive]
    pub struct AssertLarger<const X: usize, const Y: usize>;

    impl<const X: usize, const Y: usize> AssertLarger<{ X }, { Y }> {
        pub const ASSERT: () = assert!(X > Y);
    }

    #[non_exhaustive]
    pub struct AssertSmallerOrEqual<const X: usize, const Y: usize>;

    impl<const X: usize, const Y: usize> AssertSmallerOrEqual<X, Y> {
        pub const ASSERT: () = assert!(X <= Y);
    }

    #[non_exhaustive]
    pub struct AssertNonEmpty<const ROWS: usize, const COLS: usize>;

    impl<const ROWS: usize, const COLS: usize> AssertNonEmpty<ROWS, COLS> {
        pub const ASSERT: () = assert!(
            ROWS > 0 && COLS > 0,
            "matrices must consist of at least 1x1 elements"
        );
    }
}

pub mod arrays;
pub mod num;

/// Analogous to the [`Iterator::sum()`] method, but which uses [`Zero`] and [`ClosedAdd`] instead of
/// the [`Sum`] trait.
///
/// [`Iterator::sum()`]: https://doc.rust-lang.org/stable/std/iter/trait.Iterator.html#method.sum
/// [`Sum`]: https://doc.rust-lang.org/stable/std/iter/trait.Sum.html
/// [`ClosedAdd`]: ../trait.ClosedAdd.html
/// [`Zero`]: ../trait.Zero.html
#[must_use]
#[inline(always)]
pub fn sum<I>(iter: I) -> I::Item
where
    I: IntoIterator,
    I::Item: Zero + ClosedAdd,
{
    iter.into_iter().fold(Zero::ZERO, Add::add)
}

pub use self::arrays::*;
