//! Generator strategies behind a single interface
//!
//! Two strategies are available and are chosen when the random state is
//! built, never at compile time:
//!
//! - [`GeneratorKind::Lcg`]: 32-bit linear congruential generator, 15-bit
//!   outputs, multiply-shift operand hashing.
//! - [`GeneratorKind::TinyMt`]: TinyMT64, 64-bit outputs, mixing operand hash.

use serde::{Deserialize, Serialize};

use super::lcg::Lcg32;
use super::tinymt::TinyMt64;

/// A seeded source of raw random words
pub trait RawGenerator {
    /// Reinitialize from `seed`
    fn reseed(&mut self, seed: u64);

    /// Advance one step and return the raw output word
    fn next_raw(&mut self) -> u64;

    /// Maximum value used to scale raw outputs
    fn max_value(&self) -> u64;

    /// How many bits of one raw word may be handed out as booleans
    fn bits_per_word(&self) -> u32;

    /// Uniform double in [0, 1)
    fn next_double(&mut self) -> f64 {
        self.next_raw() as f64 / (self.max_value() as f64 + 1.0)
    }
}

/// Which generator strategy a [`RandomState`](super::RandomState) uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Fast, low-quality linear congruential generator
    Lcg,
    /// TinyMT64
    #[default]
    TinyMt,
}

/// Concrete generator selected by [`GeneratorKind`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Generator {
    Lcg(Lcg32),
    TinyMt(TinyMt64),
}

impl Generator {
    /// Build a generator of the given kind, seeded with `seed`
    pub fn new(kind: GeneratorKind, seed: u64) -> Self {
        match kind {
            GeneratorKind::Lcg => Generator::Lcg(Lcg32::new(seed)),
            GeneratorKind::TinyMt => Generator::TinyMt(TinyMt64::new(seed)),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Lcg(_) => GeneratorKind::Lcg,
            Generator::TinyMt(_) => GeneratorKind::TinyMt,
        }
    }
}

impl RawGenerator for Generator {
    fn reseed(&mut self, seed: u64) {
        match self {
            Generator::Lcg(g) => g.reseed(seed),
            Generator::TinyMt(g) => g.reseed(seed),
        }
    }

    fn next_raw(&mut self) -> u64 {
        match self {
            Generator::Lcg(g) => g.next_raw(),
            Generator::TinyMt(g) => g.next_raw(),
        }
    }

    fn max_value(&self) -> u64 {
        match self {
            Generator::Lcg(g) => g.max_value(),
            Generator::TinyMt(g) => g.max_value(),
        }
    }

    fn bits_per_word(&self) -> u32 {
        match self {
            Generator::Lcg(g) => g.bits_per_word(),
            Generator::TinyMt(g) => g.bits_per_word(),
        }
    }

    fn next_double(&mut self) -> f64 {
        match self {
            Generator::Lcg(g) => g.next_double(),
            Generator::TinyMt(g) => g.next_double(),
        }
    }
}
