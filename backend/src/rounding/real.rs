//! Floating-point widths the engine operates on

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::op::Precision;

/// IEEE-754 binary floating-point type (`f32` or `f64`)
pub trait Real:
    Copy
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    const PRECISION: Precision;

    /// `self * a + b` with a single rounding
    fn fused_mul_add(self, a: Self, b: Self) -> Self;

    /// Smallest representable value greater than `self`
    ///
    /// NaN and +∞ map to themselves; ±0 maps to the smallest positive
    /// subnormal.
    fn next_up(self) -> Self;

    /// Largest representable value less than `self`
    fn next_down(self) -> Self;

    fn is_nan(self) -> bool;

    fn is_finite(self) -> bool;

    /// Widen to `f64` (exact)
    fn to_f64(self) -> f64;

    /// Raw bits as an operand-hash word
    ///
    /// Doubles use their 64 bits; floats are left-aligned so their bits land
    /// in the high half of the word.
    fn pack_word(self) -> u64;
}

macro_rules! impl_real {
    ($t:ty, $precision:expr, $word:expr) => {
        impl Real for $t {
            const PRECISION: Precision = $precision;

            #[inline]
            fn fused_mul_add(self, a: Self, b: Self) -> Self {
                <$t>::mul_add(self, a, b)
            }

            fn next_up(self) -> Self {
                if <$t>::is_nan(self) || self == <$t>::INFINITY {
                    return self;
                }
                if self == 0.0 {
                    return <$t>::from_bits(1);
                }
                let bits = self.to_bits();
                if self > 0.0 {
                    <$t>::from_bits(bits + 1)
                } else {
                    <$t>::from_bits(bits - 1)
                }
            }

            #[inline]
            fn next_down(self) -> Self {
                -<$t as Real>::next_up(-self)
            }

            #[inline]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn pack_word(self) -> u64 {
                ($word)(self.to_bits())
            }
        }
    };
}

impl_real!(f32, Precision::Float, |bits: u32| (bits as u64) << 32);
impl_real!(f64, Precision::Double, |bits: u64| bits);
