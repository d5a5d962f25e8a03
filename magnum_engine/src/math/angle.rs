/// Strongly-typed angles.
///
/// `Deg` and `Rad` are distinct types: arithmetic is only defined between
/// values of the same unit, and the only bridge between them is the
/// explicit `From` conversion. APIs taking an angle accept
/// `impl Into<Rad<T>>`, so either unit can be passed.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use super::scalar::{Real, Scalar};

/// Angle in degrees
#[derive(Debug, Clone, Copy, Default)]
pub struct Deg<T: Real = f32>(pub T);

/// Angle in radians
#[derive(Debug, Clone, Copy, Default)]
pub struct Rad<T: Real = f32>(pub T);

macro_rules! impl_angle {
    ($unit:ident, $suffix:literal) => {
        impl<T: Real> $unit<T> {
            /// Zero angle
            pub fn zero() -> Self {
                Self(T::zero())
            }

            /// Underlying value
            #[inline]
            pub fn value(self) -> T {
                self.0
            }
        }

        impl<T: Real> PartialEq for $unit<T> {
            fn eq(&self, other: &Self) -> bool {
                self.0.fuzzy_eq(other.0)
            }
        }

        impl<T: Real> PartialOrd for $unit<T> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                self.0.partial_cmp(&other.0)
            }
        }

        impl<T: Real> Add for $unit<T> {
            type Output = Self;
            fn add(self, other: Self) -> Self {
                Self(self.0 + other.0)
            }
        }

        impl<T: Real> AddAssign for $unit<T> {
            fn add_assign(&mut self, other: Self) {
                self.0 = self.0 + other.0;
            }
        }

        impl<T: Real> Sub for $unit<T> {
            type Output = Self;
            fn sub(self, other: Self) -> Self {
                Self(self.0 - other.0)
            }
        }

        impl<T: Real> SubAssign for $unit<T> {
            fn sub_assign(&mut self, other: Self) {
                self.0 = self.0 - other.0;
            }
        }

        impl<T: Real> Neg for $unit<T> {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl<T: Real> Mul<T> for $unit<T> {
            type Output = Self;
            fn mul(self, scalar: T) -> Self {
                Self(self.0 * scalar)
            }
        }

        impl<T: Real> Div<T> for $unit<T> {
            type Output = Self;
            fn div(self, scalar: T) -> Self {
                Self(self.0 / scalar)
            }
        }

        /// Ratio of two angles
        impl<T: Real> Div for $unit<T> {
            type Output = T;
            fn div(self, other: Self) -> T {
                self.0 / other.0
            }
        }

        impl<T: Real + fmt::Display> fmt::Display for $unit<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", self.0, $suffix)
            }
        }
    };
}

impl_angle!(Deg, "°");
impl_angle!(Rad, " rad");

impl<T: Real> From<Deg<T>> for Rad<T> {
    fn from(deg: Deg<T>) -> Self {
        Rad(deg.0 * T::PI() / T::from_f64(180.0))
    }
}

impl<T: Real> From<Rad<T>> for Deg<T> {
    fn from(rad: Rad<T>) -> Self {
        Deg(rad.0 * T::from_f64(180.0) / T::PI())
    }
}

impl<T: Real> Rad<T> {
    /// Sine and cosine of the angle
    #[inline]
    pub fn sin_cos(self) -> (T, T) {
        self.0.sin_cos()
    }
}

#[cfg(test)]
#[path = "angle_tests.rs"]
mod tests;
