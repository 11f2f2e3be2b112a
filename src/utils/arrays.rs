// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::const_assert_smaller_or_equal;
use core::{
    array,
    mem::{self, ManuallyDrop, MaybeUninit},
    ptr,
};

/// Zips two arrays together and applies the function `f` to each memberwise element, returning a fixed
/// size array of the results.
///
/// Each element of both arrays is moved into `f` exactly once.
#[must_use]
#[inline]
pub fn zip_map<T, U, Res, F, const N: usize>(lhs: [T; N], rhs: [U; N], mut f: F) -> [Res; N]
where
    F: FnMut(T, U) -> Res,
{
    let (lhs, rhs) = (ManuallyDrop::new(lhs), ManuallyDrop::new(rhs));
    let mut result = [const { MaybeUninit::<Res>::uninit() }; N];

    for i in 0..N {
        unsafe {
            let slot = result.get_unchecked_mut(i);
            let lhs = ptr::read(lhs.get_unchecked(i));
            let rhs = ptr::read(rhs.get_unchecked(i));

            slot.write(f(lhs, rhs));
        }
    }

    unsafe { array_assume_init(result) }
}

/// Copies the first `NEW_LEN` elements of `array` into a shorter array.
///
/// Fails to compile if `NEW_LEN` is larger than the length of `array`.
///
/// # Examples
///
/// ```
/// # use gaussian::utils::truncate;
/// let array = [1, 2, 3, 4];
/// assert_eq!(truncate::<3, _, 4>(array), [1, 2, 3]);
/// ```
#[must_use]
#[inline]
pub fn truncate<const NEW_LEN: usize, T: Copy, const OLD_LEN: usize>(
    array: [T; OLD_LEN],
) -> [T; NEW_LEN] {
    const_assert_smaller_or_equal!(NEW_LEN, OLD_LEN);
    array::from_fn(|i| array[i])
}

/// Copies `array` into a longer array, filling the new trailing slots with `value`.
///
/// # Examples
///
/// ```
/// # use gaussian::utils::extend;
/// assert_eq!(extend::<4, _, 3>([1, 2, 3], 9), [1, 2, 3, 9]);
/// ```
#[must_use]
#[inline]
pub fn extend<const NEW_LEN: usize, T: Copy, const OLD_LEN: usize>(
    array: [T; OLD_LEN],
    value: T,
) -> [T; NEW_LEN] {
    const_assert_smaller_or_equal!(OLD_LEN, NEW_LEN);
    array::from_fn(|i| if i < OLD_LEN { array[i] } else { value })
}

/// Builds an array from the results of `f`, called with each index in order, stopping at the
/// first error.
///
/// Elements produced before the error are dropped.
#[inline]
pub(crate) fn try_array_from_fn<T, E, F, const N: usize>(mut f: F) -> Result<[T; N], E>
where
    F: FnMut(usize) -> Result<T, E>,
{
    struct Guard<'a, T, const N: usize> {
        array: &'a mut [MaybeUninit<T>; N],
        initialized: usize,
    }

    impl<T, const N: usize> Drop for Guard<'_, T, N> {
        fn drop(&mut self) {
            for slot in &mut self.array[..self.initialized] {
                unsafe { slot.assume_init_drop() };
            }
        }
    }

    let mut array = [const { MaybeUninit::<T>::uninit() }; N];
    let mut guard = Guard {
        array: &mut array,
        initialized: 0,
    };

    while guard.initialized < N {
        let value = f(guard.initialized)?;
        guard.array[guard.initialized].write(value);
        guard.initialized += 1;
    }

    mem::forget(guard);
    Ok(unsafe { array_assume_init(array) })
}

#[must_use]
#[inline]
pub(crate) const unsafe fn array_assume_init<T, const N: usize>(
    array: [MaybeUninit<T>; N],
) -> [T; N] {
    let mut result = MaybeUninit::<[T; N]>::uninit();

    unsafe {
        ptr::copy_nonoverlapping::<[T; N]>(array.as_ptr().cast(), result.as_mut_ptr().cast(), 1);
        MaybeUninit::assume_init(result)
    }
}
