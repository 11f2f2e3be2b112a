// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spherical coordinates.

use crate::{
    utils::num::{ClosedMul, Float, One, Zero},
    vector::Vector3,
};

/// A point given by its distance from the origin and two angles in radians.
///
/// `theta` is the polar angle measured from the positive z axis, and `phi` is the azimuth in the
/// xy plane measured from the positive x axis. Convert to a [`Vector3`] to do arithmetic.
///
/// # Examples
///
/// ```
/// # use gaussian::{spherical::Spherical, vector::Vector3};
/// let spherical = Spherical::from(Vector3::new([0.0_f64, 0.0, 2.0]));
/// assert_eq!(spherical, Spherical::new(2.0, 0.0, 0.0));
/// assert_eq!(spherical.to_cartesian(), Vector3::new([0.0, 0.0, 2.0]));
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Spherical<T = f32> {
    pub radius: T,
    pub theta: T,
    pub phi: T,
}

pub type Sphericalf = Spherical<f32>;
pub type Sphericald = Spherical<f64>;

impl<T> Spherical<T> {
    #[must_use]
    #[inline]
    pub const fn new(radius: T, theta: T, phi: T) -> Self {
        Self { radius, theta, phi }
    }

    /// Converts each component with `From`.
    #[must_use]
    #[inline]
    pub fn cast<U: From<T>>(self) -> Spherical<U> {
        Spherical::new(self.radius.into(), self.theta.into(), self.phi.into())
    }

    /// Returns a pointer to `radius`, which is followed by `theta` and `phi`.
    #[must_use]
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        &self.radius
    }

    #[must_use]
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        &mut self.radius
    }

    /// Sets the distance from the origin, keeping the direction.
    #[inline]
    pub fn resize(&mut self, len: T) {
        self.radius = len;
    }
}

impl<T: Copy> Spherical<T> {
    #[must_use]
    #[inline]
    pub fn len(&self) -> T {
        self.radius
    }
}

impl<T: Copy + ClosedMul> Spherical<T> {
    #[must_use]
    #[inline]
    pub fn len_squared(&self) -> T {
        self.radius * self.radius
    }
}

impl<T: One> Spherical<T> {
    /// Sets the radius to one.
    #[inline]
    pub fn normalize(&mut self) {
        self.radius = T::ONE;
    }

    #[must_use]
    #[inline]
    pub fn normalized(self) -> Self {
        Self::new(T::ONE, self.theta, self.phi)
    }
}

impl<T: Float> Spherical<T> {
    /// Converts back to cartesian coordinates.
    #[must_use]
    #[inline]
    pub fn to_cartesian(self) -> Vector3<T> {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        Vector3::new([
            self.radius * sin_theta * cos_phi,
            self.radius * sin_theta * sin_phi,
            self.radius * cos_theta,
        ])
    }
}

/// Converts a cartesian point. The origin maps to all-zero coordinates.
impl<T: Float> From<Vector3<T>> for Spherical<T> {
    #[inline]
    fn from(value: Vector3<T>) -> Self {
        let radius = value.len();
        if radius > T::ZERO {
            Self::new(radius, (value.z / radius).acos(), value.y.atan2(value.x))
        } else {
            Self::new(T::ZERO, T::ZERO, T::ZERO)
        }
    }
}

impl<T: Float> From<Spherical<T>> for Vector3<T> {
    #[inline]
    fn from(value: Spherical<T>) -> Self {
        value.to_cartesian()
    }
}

impl<T: Zero> Zero for Spherical<T> {
    const ZERO: Self = Self::new(T::ZERO, T::ZERO, T::ZERO);
}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Spherical<T> {}

#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Spherical<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius() {
        let mut spherical = Spherical::new(3, 1, 2);
        assert_eq!(spherical.len(), 3);
        assert_eq!(spherical.len_squared(), 9);

        spherical.resize(5);
        assert_eq!(spherical, Spherical::new(5, 1, 2));
        assert_eq!(spherical.normalized(), Spherical::new(1, 1, 2));

        spherical.normalize();
        assert_eq!(spherical.radius, 1);
        assert_eq!(Spherical::<i32>::default(), Spherical::ZERO);
    }

    #[test]
    fn test_cast_and_ptr() {
        let spherical = Spherical::new(1.5_f32, 0.5, 0.25);
        assert_eq!(spherical.cast::<f64>(), Spherical::new(1.5, 0.5, 0.25));

        let elements = unsafe { core::slice::from_raw_parts(spherical.as_ptr(), 3) };
        assert_eq!(elements, [1.5, 0.5, 0.25]);
    }

    #[cfg(any(feature = "std", feature = "libm"))]
    #[test]
    fn test_cartesian_round_trip() {
        use approx::assert_abs_diff_eq;
        use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

        let origin = Spherical::from(Vector3::<f64>::splat(0.0));
        assert_eq!(origin, Spherical::new(0.0, 0.0, 0.0));

        let spherical = Spherical::from(Vector3::new([0.0_f64, 2.0, 0.0]));
        assert_eq!(spherical.radius, 2.0);
        assert_abs_diff_eq!(spherical.theta, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(spherical.phi, FRAC_PI_2, epsilon = 1e-12);

        let spherical = Spherical::from(Vector3::new([1.0_f64, 1.0, 0.0]));
        assert_abs_diff_eq!(spherical.phi, FRAC_PI_4, epsilon = 1e-12);

        let mut rng = fastrand::Rng::with_seed(0x5ffe);
        for _ in 0..64 {
            let point = Vector3::new([
                rng.f64() * 20.0 - 10.0,
                rng.f64() * 20.0 - 10.0,
                rng.f64() * 20.0 - 10.0,
            ]);
            let back = Vector3::from(Spherical::from(point));
            for i in 0..3 {
                assert_abs_diff_eq!(back[i], point[i], epsilon = 1e-9);
            }
        }
    }
}
