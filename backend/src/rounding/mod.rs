//! Rounding-mode operator engine
//!
//! - **mode**: the closed set of rounding modes
//! - **op**: operator and width tags
//! - **real**: the `f32`/`f64` abstraction the engine is generic over
//! - **eft**: error-free transformations (nearest result + rounding error)
//! - **engine**: mode-driven resolution between the two IEEE candidates

pub mod eft;
mod engine;
mod mode;
mod op;
mod real;

pub use eft::Exact;
pub use engine::{resolve, round_binary, round_cast, round_fma, BinaryOp, FmaOp};
pub use mode::RoundingMode;
pub use op::{Operator, Precision};
pub use real::Real;
