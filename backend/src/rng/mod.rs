//! Pseudo-random source for rounding decisions
//!
//! Two generator strategies behind one interface, a bit-caching random state
//! and the operand-hash path used by the deterministic rounding modes.
//! CRITICAL: every random rounding decision MUST draw from this module.

mod generator;
mod hash;
mod lcg;
mod state;
mod tinymt;

pub use generator::{Generator, GeneratorKind, RawGenerator};
pub use hash::OperandPack;
pub use lcg::Lcg32;
pub use state::{auto_seed, RandomState};
pub use tinymt::TinyMt64;
