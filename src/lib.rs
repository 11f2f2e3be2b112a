// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small, fixed-size linear algebra for graphics and geometry code.
//!
//! The dimensions of every type are known at compile time, so vectors and matrices are plain
//! arrays that can be copied around by value and handed to graphics APIs without conversion.
//!
//! * [`Matrix`] is a dense `ROWS x COLS` matrix with closed-form determinants and inverses for
//!   the common sizes.
//! * [`SparseMatrix4`] is an affine 4x4 transform which only stores its upper 3x4 block.
//! * [`Quaternion`] and [`Spherical`] cover rotations and spherical coordinates, and the
//!   [`conversions`] module translates between quaternions and rotation matrices.
//!
//! [`Matrix`]: crate::matrix::Matrix
//! [`SparseMatrix4`]: crate::sparse::SparseMatrix4
//! [`Quaternion`]: crate::rotation::quaternion::Quaternion
//! [`Spherical`]: crate::spherical::Spherical

#![cfg_attr(not(any(test, feature = "std")), no_std)]

/// Views a fixed-length vector through one of the named-component structs in [`fields`].
macro_rules! impl_field_access {
    ( $( $type:ident<{ $len:literal }> => $fields:ident ),+ $(,)? ) => {
        $(
            const _: () = {
                use core::mem::{align_of, size_of};
                use crate::fields::$fields;

                assert!(size_of::<$type<u8, $len>>() == size_of::<$fields<u8>>());
                assert!(size_of::<$type<f32, $len>>() == size_of::<$fields<f32>>());
                assert!(size_of::<$type<f64, $len>>() == size_of::<$fields<f64>>());
                assert!(align_of::<$type<f64, $len>>() == align_of::<$fields<f64>>());
            };

            impl<T> core::ops::Deref for $type<T, $len> {
                type Target = crate::fields::$fields<T>;

                #[inline(always)]
                fn deref(&self) -> &Self::Target {
                    // Both sides are `repr(C)` runs of `$len` values of `T`.
                    unsafe { &*(self as *const Self).cast::<Self::Target>() }
                }
            }

            impl<T> core::ops::DerefMut for $type<T, $len> {
                #[inline(always)]
                fn deref_mut(&mut self) -> &mut Self::Target {
                    unsafe { &mut *(self as *mut Self).cast::<Self::Target>() }
                }
            }

            impl<T> From<$type<T, $len>> for crate::fields::$fields<T> {
                #[inline]
                fn from(value: $type<T, $len>) -> Self {
                    From::from(<[T; $len]>::from(value))
                }
            }

            impl<T> From<crate::fields::$fields<T>> for $type<T, $len> {
                #[inline]
                fn from(value: crate::fields::$fields<T>) -> Self {
                    From::from(<[T; $len]>::from(value))
                }
            }
        )+
    };
}

/// Compares a linear algebra type against the `mint` type with the same element order.
macro_rules! impl_eq_mint {
    ( $( ( $mint_type:ident, $linalg_type:ident < $len:literal > $(,)? ) ),* $(,)? ) => {
        $(
            #[cfg(feature = "mint")]
            impl<T: PartialEq> PartialEq<mint::$mint_type<T>> for $linalg_type<T, $len> {
                #[inline]
                fn eq(&self, other: &mint::$mint_type<T>) -> bool {
                    let rhs: &[T; $len] = other.as_ref();
                    self.as_slice() == &rhs[..]
                }
            }

            #[cfg(feature = "mint")]
            impl<T: PartialEq> PartialEq<$linalg_type<T, $len>> for mint::$mint_type<T> {
                #[inline]
                fn eq(&self, other: &$linalg_type<T, $len>) -> bool {
                    other == self
                }
            }
        )*
    };
}

pub mod conversions;
pub mod error;
pub mod fields;
pub mod layout;
pub mod matrix;
pub mod rotation;
pub mod sparse;
pub mod spherical;
pub mod utils;
pub mod vector;

pub use crate::{
    error::{ElementCountError, NotAffineError},
    layout::{Layout, StorageOrder, VectorConvention},
    matrix::{
        Matrix, Matrix2, Matrix3, Matrix3x4, Matrix4, Matrix4x3,
        determinant::{Determinant, determinant},
        inverse::{Inverse, inverse},
    },
    rotation::{angle::Angle, quaternion::Quaternion},
    sparse::{SparseMatrix4, SparseMatrix4d, SparseMatrix4f, SparseMatrix4i},
    spherical::Spherical,
    vector::{Vector, Vector2, Vector3, Vector4},
};
