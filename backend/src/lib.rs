//! Stochastic Floating-Point Core - Rust Engine
//!
//! Replaces IEEE-754 round-to-nearest with randomized rounding policies so
//! that repeated runs of a numerical program scatter their results and reveal
//! accumulated rounding error (CESTAC-style sensitivity analysis).
//!
//! # Architecture
//!
//! - **rng**: Seeded generators and the operand-hash deterministic draw
//! - **rounding**: Error-free transformations and mode-driven resolution
//! - **context**: Caller-owned backend context, configuration, entry points
//!
//! # Critical Invariants
//!
//! 1. `NEAREST` is bit-identical to native IEEE arithmetic
//! 2. Perturbed results are always one of the two IEEE candidates
//! 3. `*_DET` modes depend only on the seed and the operand bits
//! 4. NaN, ±∞, ±0 and subnormals follow IEEE in every mode
//!
//! # Example
//!
//! ```
//! use stochastic_fp_core::{BackendConfig, BackendContext, RoundingMode};
//!
//! let mut ctx = BackendContext::new(BackendConfig {
//!     rounding_mode: RoundingMode::Random,
//!     seed: Some(12345),
//!     ..Default::default()
//! });
//!
//! let mut sum = 0.0f64;
//! for _ in 0..10 {
//!     sum = ctx.add(sum, 0.1);
//! }
//! assert!((sum - 1.0).abs() < 1e-14);
//! ```

// Module declarations
pub mod context;
pub mod rng;
pub mod rounding;

// Re-exports for convenience
pub use context::{
    init, init_with, BackendConfig, BackendContext, BackendError, DebugCallback,
    EnabledOperators, OpCountSummary, OperatorTable,
};
pub use rng::{GeneratorKind, OperandPack, RandomState};
pub use rounding::{Operator, Precision, Real, RoundingMode};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn stochastic_fp_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::backend::PyBackend>()?;
    Ok(())
}
