// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    rotation::angle::Angle,
    utils::num::{ClosedAdd, ClosedMul, ClosedNeg, ClosedSub, Float, One, Zero},
    vector::{Vector3, Vector4},
};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A quaternion `w + xi + yj + zk`, used to represent rotations in three dimensions.
///
/// Only unit quaternions describe rotations. Use [`normalized()`] after accumulating many
/// products to keep a rotation on the unit sphere.
///
/// [`normalized()`]: Quaternion::normalized
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Quaternion<T = f32> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

impl<T> Quaternion<T> {
    #[must_use]
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// Builds a quaternion from a vector holding `(x, y, z, w)`.
    #[must_use]
    #[inline]
    pub fn from_vector(vector: Vector4<T>) -> Self {
        let [x, y, z, w] = vector.to_array();
        Self { x, y, z, w }
    }

    #[must_use]
    #[inline]
    pub fn into_vector(self) -> Vector4<T> {
        Vector4::new([self.x, self.y, self.z, self.w])
    }

    #[must_use]
    #[inline]
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Quaternion<U> {
        Quaternion {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
            w: f(self.w),
        }
    }

    /// Returns a pointer to `x`, which is followed by `y`, `z` and `w`.
    #[must_use]
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        (self as *const Self).cast()
    }
}

impl<T: Zero + One> Quaternion<T> {
    /// The quaternion which performs no rotation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::rotation::quaternion::Quaternion;
    /// let identity = Quaternion::<f32>::identity();
    /// assert_eq!(identity, Quaternion::new(0.0, 0.0, 0.0, 1.0));
    /// ```
    #[must_use]
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: T::ZERO,
            y: T::ZERO,
            z: T::ZERO,
            w: T::ONE,
        }
    }

    #[inline]
    pub fn load_identity(&mut self) {
        *self = Self::identity();
    }
}

impl<T: Zero + One> Default for Quaternion<T> {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Copy + ClosedMul + ClosedAdd> Quaternion<T> {
    #[must_use]
    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    #[must_use]
    #[inline]
    pub fn len_squared(self) -> T {
        self.dot(self)
    }
}

impl<T: ClosedNeg> Quaternion<T> {
    /// Returns the conjugate, which for a unit quaternion is the inverse rotation.
    #[must_use]
    #[inline]
    pub fn conjugated(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }
}

impl<T: Copy + ClosedNeg> Quaternion<T> {
    #[inline]
    pub fn conjugate(&mut self) {
        *self = self.conjugated();
    }
}

impl<T: Float> Quaternion<T> {
    /// Creates the rotation of `angle` around the unit vector `axis`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::{rotation::{angle::Angle, quaternion::Quaternion}, vector::Vector3};
    /// let quat = Quaternion::from_angle_axis(Angle::Degrees(180.0_f64), Vector3::Z);
    /// assert!((quat.z - 1.0).abs() < 1e-12);
    /// assert!(quat.w.abs() < 1e-12);
    /// ```
    #[must_use]
    #[inline]
    pub fn from_angle_axis(angle: Angle<T>, axis: Vector3<T>) -> Self {
        let (sin, cos) = (angle.in_radians() * T::HALF).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    #[must_use]
    #[inline]
    pub fn len(self) -> T {
        self.len_squared().sqrt()
    }

    /// Returns the quaternion scaled to unit length, or `None` if its length is zero.
    #[must_use]
    #[inline]
    pub fn normalized_checked(self) -> Option<Self> {
        let len = self.len();
        if len == T::ZERO {
            None
        } else {
            Some(self / len)
        }
    }

    /// Returns the quaternion scaled to unit length. A zero quaternion is returned unchanged.
    #[must_use]
    #[inline]
    pub fn normalized(self) -> Self {
        self.normalized_checked().unwrap_or(self)
    }

    #[inline]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Rotates `vector` by this quaternion, which must have unit length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::{rotation::{angle::Angle, quaternion::Quaternion}, vector::Vector3};
    /// let quat = Quaternion::from_angle_axis(Angle::Degrees(90.0_f64), Vector3::Z);
    /// let rotated = quat.rotate_vector(Vector3::X);
    ///
    /// assert!((rotated - Vector3::<f64>::Y).len() < 1e-12);
    /// ```
    #[must_use]
    #[inline]
    pub fn rotate_vector(self, vector: Vector3<T>) -> Vector3<T> {
        let axis = Vector3::new([self.x, self.y, self.z]);
        let two = T::ONE + T::ONE;
        let t = axis.cross(vector) * two;
        vector + t * self.w + axis.cross(t)
    }
}

/// The Hamilton product: `lhs * rhs` applies `rhs` first, then `lhs`.
impl<T: Copy + ClosedMul + ClosedAdd + ClosedSub> Mul for Quaternion<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let (l, r) = (self, rhs);
        Quaternion {
            x: l.w * r.x + l.x * r.w + l.y * r.z - l.z * r.y,
            y: l.w * r.y - l.x * r.z + l.y * r.w + l.z * r.x,
            z: l.w * r.z + l.x * r.y - l.y * r.x + l.z * r.w,
            w: l.w * r.w - l.x * r.x - l.y * r.y - l.z * r.z,
        }
    }
}

impl<T: Copy + ClosedMul + ClosedAdd + ClosedSub> MulAssign for Quaternion<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Copy + Mul> Mul<T> for Quaternion<T> {
    type Output = Quaternion<T::Output>;
    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        self.map(|elem| elem * rhs)
    }
}

impl<T: Copy + Div> Div<T> for Quaternion<T> {
    type Output = Quaternion<T::Output>;
    #[inline]
    fn div(self, rhs: T) -> Self::Output {
        self.map(|elem| elem / rhs)
    }
}

impl<T: Copy + DivAssign> DivAssign<T> for Quaternion<T> {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
        self.w /= rhs;
    }
}

impl<T: Add> Add for Quaternion<T> {
    type Output = Quaternion<T::Output>;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Quaternion {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl<T: AddAssign> AddAssign for Quaternion<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
        self.w += rhs.w;
    }
}

impl<T: Sub> Sub for Quaternion<T> {
    type Output = Quaternion<T::Output>;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Quaternion {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl<T: SubAssign> SubAssign for Quaternion<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
        self.w -= rhs.w;
    }
}

impl<T: Neg> Neg for Quaternion<T> {
    type Output = Quaternion<T::Output>;
    #[inline]
    fn neg(self) -> Self::Output {
        self.map(Neg::neg)
    }
}

impl<T> From<Vector4<T>> for Quaternion<T> {
    #[inline]
    fn from(value: Vector4<T>) -> Self {
        Self::from_vector(value)
    }
}

impl<T> From<Quaternion<T>> for Vector4<T> {
    #[inline]
    fn from(value: Quaternion<T>) -> Self {
        value.into_vector()
    }
}

#[cfg(feature = "mint")]
impl<T> From<mint::Quaternion<T>> for Quaternion<T> {
    #[inline]
    fn from(mint::Quaternion { v, s }: mint::Quaternion<T>) -> Self {
        Quaternion::new(v.x, v.y, v.z, s)
    }
}

#[cfg(feature = "mint")]
impl<T> From<Quaternion<T>> for mint::Quaternion<T> {
    #[inline]
    fn from(Quaternion { x, y, z, w }: Quaternion<T>) -> Self {
        mint::Quaternion {
            v: mint::Vector3 { x, y, z },
            s: w,
        }
    }
}

#[cfg(feature = "mint")]
impl<T> mint::IntoMint for Quaternion<T> {
    type MintType = mint::Quaternion<T>;
}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Quaternion<T> {}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Quaternion<T> {}

#[cfg(feature = "approx")]
impl<T: approx::AbsDiffEq> approx::AbsDiffEq for Quaternion<T>
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
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

#[cfg(feature = "approx")]
impl<T: approx::RelativeEq> approx::RelativeEq for Quaternion<T>
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
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}

#[cfg(feature = "approx")]
impl<T: approx::UlpsEq> approx::UlpsEq for Quaternion<T>
where
    T::Epsilon: Copy,
{
    #[inline]
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    #[inline]
    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.x.ulps_eq(&other.x, epsilon, max_ulps)
            && self.y.ulps_eq(&other.y, epsilon, max_ulps)
            && self.z.ulps_eq(&other.z, epsilon, max_ulps)
            && self.w.ulps_eq(&other.w, epsilon, max_ulps)
    }
}
