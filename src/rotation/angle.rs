// SPDX-License-Identifier: MIT OR Apache-2.0

//! Angles which remember the unit they were given in.

use crate::utils::num::{ClosedAdd, ClosedSub, Trig, Zero};
use core::{
    cmp,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// An angle, in either degrees or radians.
///
/// Angles in different units compare and combine through radians.
///
/// # Examples
///
/// ```
/// # use gaussian::rotation::angle::Angle;
/// let right = Angle::Degrees(90.0_f64);
/// assert_eq!(right.in_radians(), core::f64::consts::FRAC_PI_2);
/// assert_eq!(right + Angle::Degrees(90.0), Angle::Degrees(180.0));
/// ```
#[derive(Clone, Copy, Debug)]
pub enum Angle<T> {
    Degrees(T),
    Radians(T),
}

impl<T: Zero> Angle<T> {
    #[must_use]
    #[inline]
    pub const fn zero() -> Self {
        Self::Radians(T::ZERO)
    }
}

impl<T: Trig> Angle<T> {
    #[must_use]
    #[inline]
    pub fn in_degrees(self) -> T {
        match self {
            Self::Degrees(degrees) => degrees,
            Self::Radians(radians) => radians.to_degrees(),
        }
    }

    #[must_use]
    #[inline]
    pub fn in_radians(self) -> T {
        match self {
            Self::Degrees(degrees) => degrees.to_radians(),
            Self::Radians(radians) => radians,
        }
    }

    /// Returns the sine and cosine of the angle.
    #[must_use]
    #[inline]
    pub fn sin_cos(self) -> (T, T) {
        self.in_radians().sin_cos()
    }
}

impl<T: Neg> Neg for Angle<T> {
    type Output = Angle<T::Output>;
    #[inline]
    fn neg(self) -> Self::Output {
        match self {
            Self::Degrees(angle) => Angle::Degrees(angle.neg()),
            Self::Radians(angle) => Angle::Radians(angle.neg()),
        }
    }
}

impl<T: Trig + ClosedAdd> Add for Angle<T> {
    type Output = Angle<T>;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Degrees(lhs), Self::Degrees(rhs)) => Self::Degrees(lhs + rhs),
            (lhs, rhs) => Self::Radians(lhs.in_radians() + rhs.in_radians()),
        }
    }
}

impl<T: Trig + AddAssign> AddAssign for Angle<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        match self {
            Self::Degrees(lhs) => lhs.add_assign(rhs.in_degrees()),
            Self::Radians(lhs) => lhs.add_assign(rhs.in_radians()),
        }
    }
}

impl<T: Trig + ClosedSub> Sub for Angle<T> {
    type Output = Angle<T>;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Degrees(lhs), Self::Degrees(rhs)) => Self::Degrees(lhs - rhs),
            (lhs, rhs) => Self::Radians(lhs.in_radians() - rhs.in_radians()),
        }
    }
}

impl<T: Trig + SubAssign> SubAssign for Angle<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        match self {
            Self::Degrees(lhs) => lhs.sub_assign(rhs.in_degrees()),
            Self::Radians(lhs) => lhs.sub_assign(rhs.in_radians()),
        }
    }
}

impl<T: PartialOrd + Trig> PartialOrd for Angle<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        match (*self, *other) {
            (Angle::Degrees(a0), Angle::Degrees(a1)) => a0.partial_cmp(&a1),
            (a0, a1) => a0.in_radians().partial_cmp(&a1.in_radians()),
        }
    }
}

impl<T: PartialEq + Trig> PartialEq for Angle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Angle::Degrees(a0), Angle::Degrees(a1)) => a0 == a1,
            (a0, a1) => a0.in_radians() == a1.in_radians(),
        }
    }
}

impl<T: Default> Default for Angle<T> {
    #[inline]
    fn default() -> Self {
        Self::Radians(Default::default())
    }
}

impl<T: Zero> Zero for Angle<T> {
    const ZERO: Self = Self::Radians(Zero::ZERO);
}
