// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named-component views over fixed-length vectors.
//!
//! A [`Vector2`], [`Vector3`] or [`Vector4`] dereferences to one of these structs, which is what
//! makes `vector.x` and friends available.
//!
//! [`Vector2`]: crate::vector::Vector2
//! [`Vector3`]: crate::vector::Vector3
//! [`Vector4`]: crate::vector::Vector4

use crate::utils::num::Zero;

macro_rules! decl_fields {
    (
        $(
            $(#[$meta:meta])*
            $ty_name:ident <{ $dim:expr }> {
                $( $field:ident ),+
                $(,)?
            }
        )*
    ) => {
        $(
            $(#[$meta])*
            #[repr(C)]
            #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
            pub struct $ty_name <T> {
                $( pub $field : T ),+
            }

            impl<T> $ty_name<T> {
                #[must_use]
                #[inline]
                pub const fn new( $( $field : T ),+ ) -> Self {
                    Self {
                        $($field),+
                    }
                }

                #[must_use]
                #[inline]
                pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> $ty_name<U> {
                    $ty_name {
                        $( $field: f(self.$field) ),+
                    }
                }
            }

            impl<T: Copy> $ty_name<T> {
                #[must_use]
                #[inline]
                pub const fn splat(value: T) -> Self {
                    Self {
                        $( $field: value ),+
                    }
                }
            }

            impl<T: Zero> Zero for $ty_name<T> {
                const ZERO: Self = Self {
                    $( $field : Zero::ZERO ),+
                };
            }

            impl<T> From<$ty_name<T>> for [T; $dim] {
                #[inline]
                fn from($ty_name { $( $field ),+}: $ty_name<T>) -> Self {
                    [ $($field),+ ]
                }
            }

            impl<T> From<[T; $dim]> for $ty_name<T> {
                #[inline]
                fn from([ $( $field ),+ ]: [T ; $dim]) -> Self {
                    Self {
                        $($field),+
                    }
                }
            }

            #[cfg(feature = "bytemuck")]
            unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for $ty_name<T> {}

            #[cfg(feature = "bytemuck")]
            unsafe impl<T: bytemuck::Pod> bytemuck::Pod for $ty_name<T> {}
        )*
    };
}

decl_fields! {
    /// The `x` and `y` components of a two dimensional vector.
    Xy <{ 2 }> { x, y }

    /// The `x`, `y` and `z` components of a three dimensional vector.
    Xyz <{ 3 }> { x, y, z }

    /// The `x`, `y`, `z` and `w` components of a four dimensional vector. The `w` component is
    /// the homogeneous coordinate when the vector is multiplied by a 4x4 transform.
    Xyzw <{ 4 }> { x, y, z, w }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_round_trip_through_arrays() {
        let xyz = Xyz::new(1, 2, 3);
        let array: [i32; 3] = xyz.into();
        assert_eq!(array, [1, 2, 3]);
        assert_eq!(Xyz::from(array), xyz);

        assert_eq!(Xyzw::splat(7).map(|v| v * 2), Xyzw::new(14, 14, 14, 14));
        assert_eq!(Xy::<f32>::ZERO, Xy::new(0.0, 0.0));
    }
}
