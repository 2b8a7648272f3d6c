//! Seeded random state shared by every rounding decision
//!
//! # Draw paths
//!
//! - **Stateful**: `next_bool`, `next_uint`, `next_double` advance the
//!   generator. Results depend on how many draws happened before.
//! - **Deterministic**: `next_bool_deterministic`, `next_double_deterministic`
//!   hash the operand pack with the seed parameters. They borrow the state
//!   immutably, so identical operands always give the identical draw and the
//!   calls are safe from any number of threads.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::generator::{Generator, GeneratorKind, RawGenerator};
use super::hash::{mixing_hash, multiply_shift, OperandPack};

/// Random state: generator, bit cache and seed parameters
///
/// # Example
/// ```
/// use stochastic_fp_core::rng::{GeneratorKind, RandomState};
///
/// let mut a = RandomState::new(GeneratorKind::TinyMt, 12345);
/// let mut b = RandomState::new(GeneratorKind::TinyMt, 12345);
/// for _ in 0..100 {
///     assert_eq!(a.next_bool(), b.next_bool());
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomState {
    seed: u64,
    generator: Generator,
    /// Cached random word handed out bit by bit
    current: u64,
    /// Bits of `current` already consumed
    count: u32,
    /// `[b, a1, a2, a3]`, all odd
    seed_params: [u64; 4],
}

impl RandomState {
    /// Create a state using `kind` and seed it with `seed`
    pub fn new(kind: GeneratorKind, seed: u64) -> Self {
        let mut state = Self {
            seed,
            generator: Generator::new(kind, seed),
            current: 0,
            count: 0,
            seed_params: [1; 4],
        };
        state.set_seed(seed);
        state
    }

    /// Create a state seeded from the wall clock and the process id
    ///
    /// The chosen seed is logged so the run can be replayed with
    /// [`RandomState::new`].
    pub fn from_auto_seed(kind: GeneratorKind) -> Self {
        let seed = auto_seed();
        info!(seed, "First seed : {}", seed);
        Self::new(kind, seed)
    }

    /// Reset the state from `seed`
    ///
    /// Reinitializes the generator, zeroes the bit counter, derives the four
    /// odd seed parameters and loads the first cached word. The same seed
    /// always reproduces the same subsequent draws.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.count = 0;
        self.generator.reseed(seed);
        for param in self.seed_params.iter_mut() {
            *param = self.generator.next_raw() | 1;
        }
        debug!(
            b = self.seed_params[0],
            a1 = self.seed_params[1],
            a2 = self.seed_params[2],
            a3 = self.seed_params[3],
            "derived seed parameters"
        );
        self.current = self.generator.next_raw();
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generator_kind(&self) -> GeneratorKind {
        self.generator.kind()
    }

    /// The four derived seed parameters `[b, a1, a2, a3]`
    pub fn seed_params(&self) -> [u64; 4] {
        self.seed_params
    }

    /// Number of bits of the cached word already handed out
    pub fn consumed_bits(&self) -> u32 {
        self.count
    }

    /// One generator step
    pub fn next_raw(&mut self) -> u64 {
        self.generator.next_raw()
    }

    /// One random bit from the cached word, refilling it when exhausted
    pub fn next_bool(&mut self) -> bool {
        if self.count == self.generator.bits_per_word() {
            self.current = self.generator.next_raw();
            self.count = 0;
        }
        let bit = (self.current >> self.count) & 1 == 1;
        self.count += 1;
        bit
    }

    pub fn next_uint(&mut self) -> u32 {
        self.generator.next_raw() as u32
    }

    /// Uniform double in [0, 1)
    pub fn next_double(&mut self) -> f64 {
        self.generator.next_double()
    }

    /// Top bit of the operand hash
    pub fn next_bool_deterministic(&self, pack: &OperandPack) -> bool {
        self.operand_hash(pack) >> 63 == 1
    }

    /// Ratio in [0, 1] derived from the operand hash
    pub fn next_double_deterministic(&self, pack: &OperandPack) -> f64 {
        let hash = self.operand_hash(pack);
        match self.generator {
            Generator::Lcg(_) => (hash >> 32) as f64 / u32::MAX as f64,
            Generator::TinyMt(_) => hash as f64 / u64::MAX as f64,
        }
    }

    fn operand_hash(&self, pack: &OperandPack) -> u64 {
        match self.generator {
            Generator::Lcg(_) => multiply_shift(&self.seed_params, pack),
            Generator::TinyMt(_) => mixing_hash(&self.seed_params, pack),
        }
    }
}

/// Wall-clock microseconds plus the process id
pub fn auto_seed() -> u64 {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_micros() as u64)
        .unwrap_or(0);
    micros + std::process::id() as u64
}
