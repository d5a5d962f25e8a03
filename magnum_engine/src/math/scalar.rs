/// Scalar traits for the math types.
///
/// `Scalar` covers every numeric type a vector or matrix can hold and
/// provides the fuzzy comparison used by all `PartialEq` impls. `Real`
/// narrows it to floating-point types, which are the only ones supporting
/// lengths, normalization, trigonometry and inversion.

use std::fmt::Debug;
use num_traits::{Float, FloatConst, Num, NumCast};

/// Numeric type usable as a vector/matrix component
pub trait Scalar: Num + NumCast + Copy + PartialOrd + Debug + Default + 'static {
    /// Approximate equality
    ///
    /// Exact for integers. For floats, values are equal when their
    /// difference is below the type epsilon relative to their magnitude
    /// (absolute when either value is zero).
    fn fuzzy_eq(self, other: Self) -> bool;

    /// Approximate comparison with zero
    fn fuzzy_zero(self) -> bool {
        self.fuzzy_eq(Self::zero())
    }
}

/// Floating-point scalar
pub trait Real: Scalar + Float + FloatConst {
    /// Epsilon used by fuzzy comparison and normalization checks
    fn comparison_epsilon() -> Self;

    /// Convert a literal
    fn from_f64(value: f64) -> Self;

    /// `0.5`
    fn half() -> Self {
        Self::from_f64(0.5)
    }

    /// `2`
    fn two() -> Self {
        Self::one() + Self::one()
    }
}

macro_rules! impl_integer_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn fuzzy_eq(self, other: Self) -> bool {
                self == other
            }
        }
    )*};
}

impl_integer_scalar!(i32, i64, u32);

macro_rules! impl_real_scalar {
    ($t:ty, $epsilon:expr) => {
        impl Scalar for $t {
            fn fuzzy_eq(self, other: Self) -> bool {
                // Shortcut, also handles infinities
                if self == other {
                    return true;
                }

                let difference = (self - other).abs();
                if self == 0.0 || other == 0.0 || difference < $epsilon {
                    return difference < $epsilon;
                }

                difference / (self.abs() + other.abs()) < $epsilon
            }
        }

        impl Real for $t {
            #[inline]
            fn comparison_epsilon() -> Self {
                $epsilon
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    };
}

impl_real_scalar!(f32, 1.0e-5);
impl_real_scalar!(f64, 1.0e-14);

/// Whether a squared length is within tolerance of one
#[inline]
pub(crate) fn is_normalized_squared<T: Real>(length_squared: T) -> bool {
    (length_squared - T::one()).abs() < T::two() * T::comparison_epsilon()
}

#[cfg(test)]
#[path = "scalar_tests.rs"]
mod tests;
