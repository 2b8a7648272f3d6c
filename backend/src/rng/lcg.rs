//! Linear congruential generator (low-overhead strategy)
//!
//! The classic `rand()` recurrence from the C standard:
//! `next = next * 1103515245 + 12345`, with 15 bits of output per step.
//!
//! Statistical quality is poor, but a step is a single multiply-add, which is
//! what matters when every floating-point operation of the target program
//! draws a random bit.

use serde::{Deserialize, Serialize};

use super::generator::RawGenerator;

/// 32-bit linear congruential generator producing values in `[0, 32767]`
///
/// # Example
/// ```
/// use stochastic_fp_core::rng::{Lcg32, RawGenerator};
///
/// let mut gen = Lcg32::new(12345);
/// let value = gen.next_raw();
/// assert!(value <= Lcg32::MAX);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lcg32 {
    /// Internal state (32-bit)
    next: u32,
}

impl Lcg32 {
    /// Largest value `next_raw` can return (2^15 - 1)
    pub const MAX: u64 = 32767;

    /// Create a new generator from the low 32 bits of `seed`
    pub fn new(seed: u64) -> Self {
        Self { next: seed as u32 }
    }
}

impl RawGenerator for Lcg32 {
    fn reseed(&mut self, seed: u64) {
        self.next = seed as u32;
    }

    fn next_raw(&mut self) -> u64 {
        self.next = self.next.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        ((self.next / 65_536) % 32_768) as u64
    }

    fn max_value(&self) -> u64 {
        Self::MAX
    }

    fn bits_per_word(&self) -> u32 {
        14
    }

    fn next_double(&mut self) -> f64 {
        // max + 1 keeps the result strictly below 1.0
        self.next_raw() as f64 / (Self::MAX + 1) as f64
    }
}
