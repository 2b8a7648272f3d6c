//! Backend context
//!
//! The caller-owned handle threaded through every arithmetic call. It holds
//! the configuration, the random state, the optional debug hook and the
//! operation counters. There is no global instance: independent contexts
//! (for example one per thread) never share random state.
//!
//! # Example
//!
//! ```
//! use stochastic_fp_core::{BackendConfig, BackendContext, RoundingMode};
//!
//! let mut ctx = BackendContext::new(BackendConfig {
//!     rounding_mode: RoundingMode::AverageDet,
//!     seed: Some(12345),
//!     ..Default::default()
//! });
//!
//! let first = ctx.add(0.1f64, 0.2);
//! let again = ctx.add(0.1f64, 0.2);
//! assert_eq!(first.to_bits(), again.to_bits());
//!
//! let summary = ctx.finalize();
//! assert_eq!(summary.total(), 2);
//! ```

use std::fmt;

use tracing::info;

use super::config::BackendConfig;
use super::counters::{OpCountSummary, OpCounters};
use crate::rng::RandomState;
use crate::rounding::{
    round_binary, round_cast, round_fma, BinaryOp, FmaOp, Operator, Precision, Real, RoundingMode,
};

/// Trace hook invoked on every operation
///
/// Arguments: operand count, operator name, operand values widened to `f64`,
/// and the result widened to `f64`.
///
/// The operand slice and the result reference point at a snapshot taken after
/// rounding, not at the caller's storage. Reading them shows exactly the
/// value the arithmetic call returns; there is nothing to write back.
pub type DebugCallback = Box<dyn FnMut(usize, &str, &[f64], &f64) + Send>;

/// Caller-owned backend state
pub struct BackendContext {
    config: BackendConfig,
    rng: RandomState,
    debug_callback: Option<DebugCallback>,
    counters: OpCounters,
}

impl fmt::Debug for BackendContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendContext")
            .field("config", &self.config)
            .field("rng", &self.rng)
            .field("debug_callback", &self.debug_callback.is_some())
            .field("counters", &self.counters)
            .finish()
    }
}

impl BackendContext {
    /// Create a context from `config`
    ///
    /// With `config.seed == None` the random state is seeded from the wall
    /// clock and the process id; the chosen seed is written back into the
    /// config so [`BackendContext::config`] always reports the seed in use.
    pub fn new(mut config: BackendConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => RandomState::new(config.generator, seed),
            None => RandomState::from_auto_seed(config.generator),
        };
        config.seed = Some(rng.seed());
        info!(
            mode = %config.rounding_mode,
            seed = rng.seed(),
            generator = ?config.generator,
            "backend initialized"
        );
        Self {
            config,
            rng,
            debug_callback: None,
            counters: OpCounters::new(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.config.rounding_mode
    }

    /// Set the active rounding mode
    pub fn configure(&mut self, mode: RoundingMode) {
        if mode != self.config.rounding_mode {
            info!(from = %self.config.rounding_mode, to = %mode, "rounding mode changed");
        }
        self.config.rounding_mode = mode;
    }

    /// Reseed the random state
    pub fn set_seed(&mut self, seed: u64) {
        info!(seed, "seed set");
        self.rng.set_seed(seed);
        self.config.seed = Some(seed);
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Install or replace the debug callback
    pub fn set_debug_callback<F>(&mut self, callback: F)
    where
        F: FnMut(usize, &str, &[f64], &f64) + Send + 'static,
    {
        self.debug_callback = Some(Box::new(callback));
    }

    pub fn clear_debug_callback(&mut self) {
        self.debug_callback = None;
    }

    /// Enable or disable perturbation of one operator
    pub fn set_operator_enabled(&mut self, op: Operator, enabled: bool) {
        self.config.enabled_operators.set(op, enabled);
    }

    pub fn random_state(&self) -> &RandomState {
        &self.rng
    }

    pub fn counters(&self) -> &OpCounters {
        &self.counters
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// `a op b` under the active rounding mode
    pub fn binary<T: Real>(&mut self, op: BinaryOp, a: T, b: T) -> T {
        let operator = op.operator();
        let (mode, instrumented) = self.mode_for(operator);
        let res = round_binary(op, a, b, mode, &mut self.rng);
        self.after_op(
            operator,
            T::PRECISION,
            instrumented,
            &[a.to_f64(), b.to_f64()],
            res.to_f64(),
        );
        res
    }

    /// Fused `a * b ± c` under the active rounding mode
    ///
    /// # Panics
    /// Panics when the crate is built without the `fma` feature.
    pub fn fused<T: Real>(&mut self, op: FmaOp, a: T, b: T, c: T) -> T {
        let operator = op.operator();
        let (mode, instrumented) = self.mode_for(operator);
        let res = round_fma(op, a, b, c, mode, &mut self.rng);
        self.after_op(
            operator,
            T::PRECISION,
            instrumented,
            &[a.to_f64(), b.to_f64(), c.to_f64()],
            res.to_f64(),
        );
        res
    }

    /// Narrowing conversion double → float under the active rounding mode
    pub fn cast(&mut self, a: f64) -> f32 {
        let (mode, instrumented) = self.mode_for(Operator::Cast);
        let res = round_cast(a, mode, &mut self.rng);
        self.after_op(Operator::Cast, Precision::Double, instrumented, &[a], res as f64);
        res
    }

    pub fn add<T: Real>(&mut self, a: T, b: T) -> T {
        self.binary(BinaryOp::Add, a, b)
    }

    pub fn sub<T: Real>(&mut self, a: T, b: T) -> T {
        self.binary(BinaryOp::Sub, a, b)
    }

    pub fn mul<T: Real>(&mut self, a: T, b: T) -> T {
        self.binary(BinaryOp::Mul, a, b)
    }

    pub fn div<T: Real>(&mut self, a: T, b: T) -> T {
        self.binary(BinaryOp::Div, a, b)
    }

    pub fn madd<T: Real>(&mut self, a: T, b: T, c: T) -> T {
        self.fused(FmaOp::MAdd, a, b, c)
    }

    pub fn msub<T: Real>(&mut self, a: T, b: T, c: T) -> T {
        self.fused(FmaOp::MSub, a, b, c)
    }

    /// Release the context and return the call-count summary
    pub fn finalize(self) -> OpCountSummary {
        let summary = self.counters.summary();
        for entry in &summary.entries {
            info!(
                operator = entry.operator.name(),
                precision = ?entry.precision,
                instrumented = entry.instrumented,
                total = entry.total,
                "operation count"
            );
        }
        info!(seed = self.rng.seed(), total = summary.total(), "backend finalized");
        summary
    }

    fn mode_for(&self, op: Operator) -> (RoundingMode, bool) {
        if self.config.enabled_operators.is_enabled(op) {
            (self.config.rounding_mode, true)
        } else {
            (RoundingMode::Nearest, false)
        }
    }

    fn after_op(
        &mut self,
        op: Operator,
        precision: Precision,
        instrumented: bool,
        operands: &[f64],
        result: f64,
    ) {
        if self.config.count_ops {
            self.counters.record(op, precision, instrumented);
        }
        if let Some(callback) = self.debug_callback.as_mut() {
            callback(operands.len(), op.name(), operands, &result);
        }
    }
}
