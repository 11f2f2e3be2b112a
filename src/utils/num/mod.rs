// SPDX-License-Identifier: MIT OR Apache-2.0

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub trait ClosedSub: Sized + Sub<Output = Self> {}
pub trait ClosedMul: Sized + Mul<Output = Self> {}
pub trait ClosedAdd: Sized + Add<Output = Self> {}
pub trait ClosedDiv: Sized + Div<Output = Self> {}
pub trait ClosedNeg: Sized + Neg<Output = Self> {}

impl<T: Sized + Sub<Output = Self>> ClosedSub for T {}
impl<T: Sized + Mul<Output = Self>> ClosedMul for T {}
impl<T: Sized + Add<Output = Self>> ClosedAdd for T {}
impl<T: Sized + Div<Output = Self>> ClosedDiv for T {}
impl<T: Sized + Neg<Output = Self>> ClosedNeg for T {}

/// The element requirements shared by the determinant and adjugate routines.
///
/// Every primitive integer and float type implements this trait.
pub trait Scalar:
    Copy
    + ClosedAdd
    + ClosedDiv
    + ClosedMul
    + ClosedSub
    + AddAssign
    + DivAssign
    + MulAssign
    + SubAssign
    + One
    + PartialEq
    + PartialOrd
    + Zero
{
}

impl<T> Scalar for T where
    T: Copy
        + ClosedAdd
        + ClosedDiv
        + ClosedMul
        + ClosedSub
        + AddAssign
        + DivAssign
        + MulAssign
        + SubAssign
        + One
        + PartialEq
        + PartialOrd
        + Zero
{
}

/// Scalars which can be negated.
pub trait Signed: Scalar + ClosedNeg {}
impl<T: Scalar + ClosedNeg> Signed for T {}

pub trait Sqrt: Copy {
    #[must_use]
    fn sqrt(self) -> Self;
}

/// Scalars whose division is exact up to rounding, so that `ONE / x` is a reciprocal.
///
/// Inversion is only offered for these types: an integer reciprocal truncates to zero. Only the
/// primitive float types implement this trait, and it does not need `std` or `libm`.
pub trait Real: Signed + FromHalf {}
impl<T> Real for T where T: Signed + FromHalf {}

/// Floating point scalars: everything the rotation and spherical code needs.
pub trait Float: Real + Trig + Sqrt {}
impl<T> Float for T where T: Real + Trig + Sqrt {}

/// Provides the constant `0.5` and `0.25`, which integers cannot represent.
pub trait FromHalf {
    const HALF: Self;
    const QUARTER: Self;
}

#[doc(alias = "1")]
pub trait One {
    const ONE: Self;
}

#[doc(alias = "0")]
pub trait Zero {
    const ZERO: Self;
}

pub trait Trig: Copy {
    #[must_use]
    fn sin(self) -> Self;
    #[must_use]
    fn cos(self) -> Self;
    #[must_use]
    fn tan(self) -> Self;

    #[must_use]
    fn asin(self) -> Self;
    #[must_use]
    fn acos(self) -> Self;
    #[must_use]
    fn atan(self) -> Self;
    #[must_use]
    fn atan2(self, other: Self) -> Self;

    #[must_use]
    fn to_radians(self) -> Self;
    #[must_use]
    fn to_degrees(self) -> Self;

    #[must_use]
    #[inline]
    fn sin_cos(self) -> (Self, Self) {
        (self.sin(), self.cos())
    }
}

macro_rules! impl_nums {
    (
        $(
            $num_ty:ty => ( zero = $zero:expr, one = $one:expr )
        ),* $(,)?
    ) => {
        $(
            impl Zero for $num_ty {
                const ZERO: Self = $zero;
            }

            impl One for $num_ty {
                const ONE: Self = $one;
            }
        )*
    };
}

impl_nums! {
    u8 => (zero = 0, one = 1),
    u16 => (zero = 0, one = 1),
    u32 => (zero = 0, one = 1),
    u64 => (zero = 0, one = 1),
    u128 => (zero = 0, one = 1),
    usize => (zero = 0, one = 1),

    i8 => (zero = 0, one = 1),
    i16 => (zero = 0, one = 1),
    i32 => (zero = 0, one = 1),
    i64 => (zero = 0, one = 1),
    i128 => (zero = 0, one = 1),
    isize => (zero = 0, one = 1),

    f32 => (zero = 0.0, one = 1.0),
    f64 => (zero = 0.0, one = 1.0),
}

impl<T: Zero, const N: usize> Zero for [T; N] {
    const ZERO: Self = [T::ZERO; N];
}

impl FromHalf for f32 {
    const HALF: Self = 0.5;
    const QUARTER: Self = 0.25;
}

impl FromHalf for f64 {
    const HALF: Self = 0.5;
    const QUARTER: Self = 0.25;
}

macro_rules! impl_float_traits {
    ( $($type:ty),* $(,)? ) => {
        $(
            #[cfg(feature = "std")]
            impl Sqrt for $type {
                #[inline(always)]
                fn sqrt(self) -> Self {
                    <$type>::sqrt(self)
                }
            }

            #[cfg(all(feature = "libm", not(feature = "std")))]
            impl Sqrt for $type {
                #[inline(always)]
                fn sqrt(self) -> Self {
                    libm::Libm::<$type>::sqrt(self)
                }
            }

            #[cfg(feature = "std")]
            impl Trig for $type {
                #[inline]
                fn sin(self) -> Self  {
                    <$type>::sin(self)
                }

                #[inline]
                fn cos(self) -> Self  {
                    <$type>::cos(self)
                }

                #[inline]
                fn tan(self) -> Self  {
                    <$type>::tan(self)
                }

                #[inline]
                fn asin(self) -> Self  {
                    <$type>::asin(self)
                }

                #[inline]
                fn acos(self) -> Self  {
                    <$type>::acos(self)
                }

                #[inline]
                fn atan(self) -> Self  {
                    <$type>::atan(self)
                }

                #[inline]
                fn atan2(self, other: Self) -> Self  {
                    <$type>::atan2(self, other)
                }

                #[inline]
                fn to_radians(self) -> Self {
                    <$type>::to_radians(self)
                }

                #[inline]
                fn to_degrees(self) -> Self {
                    <$type>::to_degrees(self)
                }

                #[inline]
                fn sin_cos(self) -> (Self, Self) {
                    <$type>::sin_cos(self)
                }
            }

            #[cfg(all(feature = "libm", not(feature = "std")))]
            impl Trig for $type {
                #[inline]
                fn sin(self) -> Self  {
                    libm::Libm::<$type>::sin(self)
                }

                #[inline]
                fn cos(self) -> Self  {
                    libm::Libm::<$type>::cos(self)
                }

                #[inline]
                fn tan(self) -> Self  {
                    libm::Libm::<$type>::tan(self)
                }

                #[inline]
                fn asin(self) -> Self  {
                    libm::Libm::<$type>::asin(self)
                }

                #[inline]
                fn acos(self) -> Self  {
                    libm::Libm::<$type>::acos(self)
                }

                #[inline]
                fn atan(self) -> Self  {
                    libm::Libm::<$type>::atan(self)
                }

                #[inline]
                fn atan2(self, other: Self) -> Self  {
                    libm::Libm::<$type>::atan2(self, other)
                }

                #[inline]
                fn to_radians(self) -> Self {
                    <$type>::to_radians(self)
                }

                #[inline]
                fn to_degrees(self) -> Self {
                    <$type>::to_degrees(self)
                }
            }
        )*
    };
}

impl_float_traits! {
    f32, f64,
}
