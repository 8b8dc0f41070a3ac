//! Numeric element type for Hermite tensors.

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Field element the recurrence is evaluated in.
///
/// Implemented for `f64` and `Complex64`. The `sqrt(i)` weights are real and
/// get lifted into the element type with [`FockScalar::from_real`].
pub trait FockScalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Embed a real number.
    fn from_real(x: f64) -> Self;

    /// Principal square root.
    fn sqrt(self) -> Self;

    fn exp(self) -> Self;

    /// Magnitude, used for finiteness checks and tolerances.
    fn modulus(self) -> f64;

    fn is_finite(self) -> bool;
}

impl FockScalar for f64 {
    #[inline]
    fn from_real(x: f64) -> Self {
        x
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }

    #[inline]
    fn modulus(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl FockScalar for Complex64 {
    #[inline]
    fn from_real(x: f64) -> Self {
        Complex64::new(x, 0.0)
    }

    #[inline]
    fn sqrt(self) -> Self {
        Complex64::sqrt(self)
    }

    #[inline]
    fn exp(self) -> Self {
        Complex64::exp(self)
    }

    #[inline]
    fn modulus(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn is_finite(self) -> bool {
        Complex64::is_finite(self)
    }
}
