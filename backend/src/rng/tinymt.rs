//! TinyMT64 random number generator (high-quality strategy)
//!
//! TinyMT is a small-state member of the Mersenne Twister family with a
//! period of 2^127 - 1. This is the 64-bit output variant with the reference
//! parameter set.
//!
//! # Determinism
//!
//! Same seed → same sequence. The first outputs for seed 1 match the
//! reference check values published with the algorithm.

use serde::{Deserialize, Serialize};

use super::generator::RawGenerator;

const MAT1: u32 = 0xfa05_1f40;
const MAT2: u32 = 0xffd0_fff4;
const TMAT: u64 = 0x58d0_2ffe_ffbf_ffbc;

const SH0: u32 = 12;
const SH1: u32 = 11;
const SH8: u32 = 8;
const MASK: u64 = 0x7fff_ffff_ffff_ffff;
const MIN_LOOP: usize = 8;

/// TinyMT64 generator state
///
/// # Example
/// ```
/// use stochastic_fp_core::rng::{RawGenerator, TinyMt64};
///
/// let mut gen = TinyMt64::new(1);
/// assert_eq!(gen.next_raw(), 15503804787016557143);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TinyMt64 {
    status: [u64; 2],
}

impl TinyMt64 {
    /// Reported maximum for scaling purposes (2^31 - 1)
    pub const MAX: u64 = 2_147_483_647;

    /// Create a generator seeded with `seed`
    pub fn new(seed: u64) -> Self {
        let mut gen = Self { status: [0, 0] };
        gen.init(seed);
        gen
    }

    fn init(&mut self, seed: u64) {
        self.status[0] = seed ^ ((MAT1 as u64) << 32);
        self.status[1] = (MAT2 as u64) ^ TMAT;
        for i in 1..MIN_LOOP {
            let prev = self.status[(i - 1) & 1];
            self.status[i & 1] ^= (i as u64)
                .wrapping_add(6_364_136_223_846_793_005u64.wrapping_mul(prev ^ (prev >> 62)));
        }
        // Period certification: the all-zero state is a fixed point
        if (self.status[0] & MASK) == 0 && self.status[1] == 0 {
            self.status = [b'T' as u64, b'M' as u64];
        }
    }

    fn next_state(&mut self) {
        self.status[0] &= MASK;
        let mut x = self.status[0] ^ self.status[1];
        x ^= x << SH0;
        x ^= x >> 32;
        x ^= x << 32;
        x ^= x << SH1;
        self.status[0] = self.status[1];
        self.status[1] = x;
        if x & 1 != 0 {
            self.status[0] ^= MAT1 as u64;
            self.status[1] ^= (MAT2 as u64) << 32;
        }
    }

    fn temper(&self) -> u64 {
        let mut x = self.status[0].wrapping_add(self.status[1]);
        x ^= self.status[0] >> SH8;
        if x & 1 != 0 {
            x ^= TMAT;
        }
        x
    }
}

impl RawGenerator for TinyMt64 {
    fn reseed(&mut self, seed: u64) {
        self.init(seed);
    }

    fn next_raw(&mut self) -> u64 {
        self.next_state();
        self.temper()
    }

    fn max_value(&self) -> u64 {
        Self::MAX
    }

    fn bits_per_word(&self) -> u32 {
        63
    }

    /// Double in the open interval (0, 1)
    fn next_double(&mut self) -> f64 {
        self.next_state();
        // 52 random mantissa bits over [1, 2) with the lowest bit forced set
        let bits = (self.temper() >> 12) | 0x3ff0_0000_0000_0001;
        f64::from_bits(bits) - 1.0
    }
}
