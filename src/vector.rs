// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-length vectors, used as the operands of matrix and transform products.

use crate::{
    const_assert_larger,
    utils::{
        arrays::array_assume_init,
        extend,
        num::{ClosedAdd, ClosedDiv, ClosedMul, ClosedNeg, ClosedSub, One, Sqrt, Zero},
        sum, truncate, zip_map,
    },
};
#[cfg(feature = "serde")]
use core::marker::PhantomData;
use core::{
    array::{self, IntoIter},
    borrow::{Borrow, BorrowMut},
    fmt,
    mem::MaybeUninit,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
    slice::{Iter, IterMut},
};
#[cfg(feature = "serde")]
use serde_core::{
    de::{self, Deserialize, Deserializer, Error, SeqAccess},
    ser::{Serialize, SerializeTupleStruct, Serializer},
};

/// A column of `N` scalars.
///
/// Vectors of length 2, 3 and 4 dereference to [`Xy`], [`Xyz`] and [`Xyzw`], so their components
/// can be read and written by name.
///
/// [`Xy`]: crate::fields::Xy
/// [`Xyz`]: crate::fields::Xyz
/// [`Xyzw`]: crate::fields::Xyzw
#[repr(C)]
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Vector<T = f32, const N: usize = 3> {
    data: [T; N],
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Vector<T, N> {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.write_str("Vector ")?;
        fmtr.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T: Default, const N: usize> Default for Vector<T, N> {
    #[inline]
    fn default() -> Self {
        Self::from_fn(|_| Default::default())
    }
}

pub type Vector2<T = f32> = Vector<T, 2>;
pub type Vector3<T = f32> = Vector<T, 3>;
pub type Vector4<T = f32> = Vector<T, 4>;

impl_field_access! {
    Vector<{ 2 }> => Xy,
    Vector<{ 3 }> => Xyz,
    Vector<{ 4 }> => Xyzw,
}

impl<T: One + Zero, const N: usize> Vector<T, N> {
    /// The unit vector along the first axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::vector::Vector3;
    /// let vector = Vector3::<i32>::X;
    /// assert_eq!((vector.x, vector.y, vector.z), (1, 0, 0));
    /// ```
    pub const X: Self = Vector::unit_n::<0>();

    /// The unit vector along the second axis. Not defined for vectors shorter than 2.
    pub const Y: Self = Vector::unit_n::<1>();

    /// The unit vector along the third axis. Not defined for vectors shorter than 3.
    pub const Z: Self = Vector::unit_n::<2>();

    /// The unit vector along the fourth axis. Not defined for vectors shorter than 4.
    pub const W: Self = Vector::unit_n::<3>();

    /// Returns a vector which is `1` in the dimension `DIM` and `0` everywhere else.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::vector::Vector;
    /// let vector = Vector::<i32, 5>::unit_n::<2>();
    /// assert_eq!(vector.to_array(), [0, 0, 1, 0, 0]);
    /// ```
    ///
    /// Asking for a dimension the vector does not have fails to compile:
    ///
    /// ```compile_fail
    /// use gaussian::vector::Vector;
    ///
    /// let _ = Vector::<i32, 3>::unit_n::<3>();
    /// ```
    #[must_use]
    #[inline]
    pub const fn unit_n<const DIM: usize>() -> Self {
        const_assert_larger!(N, DIM);

        let mut data = [const { MaybeUninit::new(T::ZERO) }; N];
        data[DIM] = MaybeUninit::new(T::ONE);
        Vector {
            data: unsafe { array_assume_init(data) },
        }
    }
}

impl<T, const N: usize> Vector<T, N> {
    pub const LENGTH: usize = N;

    /// Returns a new vector holding the elements of `array`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::vector::Vector;
    /// let vector = Vector::new([1, 2, 3]);
    /// assert_eq!(vector.y, 2);
    /// ```
    #[must_use]
    #[inline]
    pub const fn new(array: [T; N]) -> Self {
        Self { data: array }
    }

    #[must_use]
    #[inline]
    pub fn from_fn<F: FnMut(usize) -> T>(f: F) -> Self {
        Self::new(array::from_fn(f))
    }

    #[must_use]
    #[inline]
    pub const fn uninit() -> Vector<MaybeUninit<T>, N> {
        Vector {
            data: [const { MaybeUninit::uninit() }; N],
        }
    }

    #[inline]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Vector<U, N> {
        Vector {
            data: self.data.map(f),
        }
    }

    #[inline]
    pub fn zip_map<U, Ret, F: FnMut(T, U) -> Ret>(self, rhs: Vector<U, N>, f: F) -> Vector<Ret, N> {
        Vector {
            data: zip_map(self.data, rhs.data, f),
        }
    }

    /// The sum of the products of the corresponding elements of `self` and `rhs`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::vector::Vector;
    /// let dot = Vector::new([1, 2, 3]).dot(Vector::new([4, 5, 6]));
    /// assert_eq!(dot, 32);
    /// ```
    #[must_use]
    #[inline]
    pub fn dot<U>(self, rhs: Vector<U, N>) -> T::Output
    where
        T: Mul<U>,
        T::Output: Zero + ClosedAdd,
    {
        sum(self.into_iter().zip(rhs).map(|(x, y)| x * y))
    }

    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    #[must_use]
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    #[must_use]
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[must_use]
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    #[must_use]
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[must_use]
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[must_use]
    #[inline]
    pub fn to_array(self) -> [T; N] {
        self.data
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T, const N: usize> Vector<MaybeUninit<T>, N> {
    /// # Safety
    ///
    /// Every element of the vector must have been written to.
    #[must_use]
    #[inline]
    pub const unsafe fn assume_init(self) -> Vector<T, N> {
        Vector {
            data: unsafe { array_assume_init(self.data) },
        }
    }
}

impl<T: Copy, const N: usize> Vector<T, N> {
    /// Creates a vector with every element set to `value`.
    #[must_use]
    #[inline]
    pub const fn splat(value: T) -> Self {
        Vector { data: [value; N] }
    }

    /// Drops the trailing elements, keeping the first `N_NEW`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::vector::Vector;
    /// let homogeneous = Vector::new([1, 2, 3, 1]);
    /// assert_eq!(homogeneous.truncate::<3>().to_array(), [1, 2, 3]);
    /// ```
    #[must_use]
    #[inline]
    pub fn truncate<const N_NEW: usize>(self) -> Vector<T, N_NEW> {
        Vector::new(truncate(self.data))
    }

    /// Appends copies of `value` until the vector is `N_NEW` elements long.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::vector::Vector;
    /// let point = Vector::new([1, 2, 3]);
    /// assert_eq!(point.extend::<4>(1).to_array(), [1, 2, 3, 1]);
    /// ```
    #[must_use]
    #[inline]
    pub fn extend<const N_NEW: usize>(self, value: T) -> Vector<T, N_NEW> {
        Vector::new(extend(self.data, value))
    }
}

impl<T: Copy + ClosedMul + ClosedAdd + Zero, const N: usize> Vector<T, N> {
    #[must_use]
    #[inline]
    pub fn len_squared(self) -> T {
        self.dot(self)
    }
}

impl<T: Copy + ClosedMul + ClosedAdd + Zero + Sqrt, const N: usize> Vector<T, N> {
    #[must_use]
    #[inline]
    pub fn len(self) -> T {
        self.len_squared().sqrt()
    }
}

impl<T, const N: usize> Vector<T, N>
where
    T: Copy + ClosedMul + ClosedAdd + ClosedDiv + Zero + Sqrt + PartialEq,
{
    /// Returns the unit vector pointing in the same direction, or `None` if the vector has no
    /// length.
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

    /// Returns the unit vector pointing in the same direction. The zero vector stays zero.
    #[must_use]
    #[inline]
    pub fn normalized(self) -> Self {
        self.normalized_checked().unwrap_or(Zero::ZERO)
    }

    #[inline]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }
}

impl<T: Copy + ClosedMul + ClosedSub + ClosedNeg> Vector3<T> {
    /// The right-handed cross product of `self` and `rhs`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gaussian::vector::Vector3;
    /// assert_eq!(Vector3::<i32>::X.cross(Vector3::Y), Vector3::Z);
    /// ```
    #[must_use]
    #[inline]
    pub fn cross(self, rhs: Self) -> Vector3<T> {
        let [x0, y0, z0] = self.data;
        let [x1, y1, z1] = rhs.data;

        let x = (y0 * z1) - (z0 * y1);
        let y = (x0 * z1) - (z0 * x1);
        let z = (x0 * y1) - (y0 * x1);

        Vector3::new([x, y.neg(), z])
    }
}

impl<T: Zero, const N: usize> Zero for Vector<T, N> {
    const ZERO: Self = Self::new(Zero::ZERO);
}

impl<T: Neg, const N: usize> Neg for Vector<T, N> {
    type Output = Vector<T::Output, N>;
    #[inline]
    fn neg(self) -> Self::Output {
        self.map(Neg::neg)
    }
}

impl<T: Mul + Copy, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Vector<T::Output, N>;
    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        self.map(|elem| elem * rhs)
    }
}

impl<T: MulAssign<U>, U: Copy, const N: usize> MulAssign<U> for Vector<T, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: U) {
        for elem in &mut self.data {
            elem.mul_assign(rhs);
        }
    }
}

impl<T: Div<U>, U: Copy, const N: usize> Div<U> for Vector<T, N> {
    type Output = Vector<T::Output, N>;
    #[inline]
    fn div(self, rhs: U) -> Self::Output {
        self.map(|elem| elem / rhs)
    }
}

impl<T: DivAssign<U>, U: Copy, const N: usize> DivAssign<U> for Vector<T, N> {
    #[inline]
    fn div_assign(&mut self, rhs: U) {
        for elem in &mut self.data {
            elem.div_assign(rhs);
        }
    }
}

impl<T: Add<U>, U, const N: usize> Add<Vector<U, N>> for Vector<T, N> {
    type Output = Vector<T::Output, N>;
    #[inline]
    fn add(self, rhs: Vector<U, N>) -> Self::Output {
        self.zip_map(rhs, Add::add)
    }
}

impl<T: AddAssign<U>, U, const N: usize> AddAssign<Vector<U, N>> for Vector<T, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Vector<U, N>) {
        for (l, r) in self.data.iter_mut().zip(rhs) {
            l.add_assign(r);
        }
    }
}

impl<T: Sub<U>, U, const N: usize> Sub<Vector<U, N>> for Vector<T, N> {
    type Output = Vector<T::Output, N>;
    #[inline]
    fn sub(self, rhs: Vector<U, N>) -> Self::Output {
        self.zip_map(rhs, Sub::sub)
    }
}

impl<T: SubAssign<U>, U, const N: usize> SubAssign<Vector<U, N>> for Vector<T, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector<U, N>) {
        for (l, r) in self.data.iter_mut().zip(rhs) {
            l.sub_assign(r);
        }
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;
    #[track_caller]
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T, const N: usize> AsRef<[T; N]> for Vector<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T; N] {
        &self.data
    }
}

impl<T, const N: usize> AsMut<[T; N]> for Vector<T, N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T; N] {
        &mut self.data
    }
}

impl<T, const N: usize> AsRef<[T]> for Vector<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T, const N: usize> AsMut<[T]> for Vector<T, N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T, const N: usize> Borrow<[T]> for Vector<T, N> {
    #[inline]
    fn borrow(&self) -> &[T] {
        &self.data
    }
}

impl<T, const N: usize> BorrowMut<[T]> for Vector<T, N> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline]
    fn from(value: Vector<T, N>) -> Self {
        value.data
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(value: [T; N]) -> Self {
        Self { data: value }
    }
}

impl<T, const N: usize> IntoIterator for Vector<T, N> {
    type IntoIter = IntoIter<T, N>;
    type Item = T;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Vector<T, N> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut Vector<T, N> {
    type IntoIter = IterMut<'a, T>;
    type Item = &'a mut T;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

macro_rules! impl_mint_vector_conversions {
    ( $( $mint_type:ident => $len:literal { $($field:ident),+ } ),* $(,)? ) => {
        $(
            #[cfg(feature = "mint")]
            impl<T> From<mint::$mint_type<T>> for Vector<T, $len> {
                #[inline]
                fn from(mint::$mint_type { $($field),+ }: mint::$mint_type<T>) -> Self {
                    Self::new([$($field),+])
                }
            }

            #[cfg(feature = "mint")]
            impl<T> From<Vector<T, $len>> for mint::$mint_type<T> {
                #[inline]
                fn from(value: Vector<T, $len>) -> Self {
                    From::from(value.to_array())
                }
            }

            #[cfg(feature = "mint")]
            impl<T> mint::IntoMint for Vector<T, $len> {
                type MintType = mint::$mint_type<T>;
            }
        )*
    };
}

impl_mint_vector_conversions! {
    Vector2 => 2 { x, y },
    Vector3 => 3 { x, y, z },
    Vector4 => 4 { x, y, z, w },
}

impl_eq_mint! {
    (Vector2, Vector<2>),
    (Vector3, Vector<3>),
    (Vector4, Vector<4>),
}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Vector<T, N> {}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Vector<T, N> {}

#[cfg(feature = "approx")]
impl<T: approx::AbsDiffEq, const N: usize> approx::AbsDiffEq for Vector<T, N>
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
impl<T: approx::RelativeEq, const N: usize> approx::RelativeEq for Vector<T, N>
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
impl<T: approx::UlpsEq, const N: usize> approx::UlpsEq for Vector<T, N>
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

#[cfg(feature = "serde")]
impl<T: Serialize, const N: usize> Serialize for Vector<T, N> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            let mut struct_serializer = serializer.serialize_tuple_struct("Vector", N)?;
            for elem in self.as_slice() {
                struct_serializer.serialize_field(elem)?;
            }
            struct_serializer.end()
        } else {
            serializer.collect_seq(self.iter())
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for Vector<T, N> {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExpectedVectorData<const N: usize>;

        impl<const N: usize> de::Expected for ExpectedVectorData<N> {
            #[inline]
            fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "an array of {N} elements")
            }
        }

        struct Visitor<T, const N: usize>(PhantomData<Vector<T, N>>);

        impl<'de, T: Deserialize<'de>, const N: usize> de::Visitor<'de> for Visitor<T, N> {
            type Value = Vector<T, N>;

            #[inline]
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                de::Expected::fmt(&ExpectedVectorData::<N>, formatter)
            }

            #[inline]
            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut ret_val = Vector::<T, N>::uninit();

                let mut i = 0;
                while let Some(item) = seq.next_element::<T>()? {
                    let slot = match ret_val.get_mut(i) {
                        Some(slot) => slot,
                        None => return Err(A::Error::invalid_length(i + 1, &ExpectedVectorData::<N>)),
                    };

                    slot.write(item);
                    i += 1;
                }

                if i < N {
                    return Err(A::Error::invalid_length(i, &ExpectedVectorData::<N>));
                }

                unsafe { Ok(Vector::assume_init(ret_val)) }
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_tuple_struct("Vector", N, Visitor::<T, N>(PhantomData))
        } else {
            deserializer.deserialize_seq(Visitor::<T, N>(PhantomData))
        }
    }
}
