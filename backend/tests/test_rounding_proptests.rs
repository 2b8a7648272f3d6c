//! Property-based tests for the rounding engine.
//!
//! Key invariants:
//! - NEAREST is bit-identical to native arithmetic for any input
//! - Every perturbed result is one of the two IEEE candidates
//! - Deterministic modes ignore the context's history
//! - Exactly representable results are returned unchanged

use proptest::prelude::*;
use stochastic_fp_core::rounding::eft;
use stochastic_fp_core::{BackendConfig, BackendContext, RoundingMode};

const PERTURBING: [RoundingMode; 4] = [
    RoundingMode::Average,
    RoundingMode::AverageDet,
    RoundingMode::Random,
    RoundingMode::RandomDet,
];

fn context(mode: RoundingMode, seed: u64) -> BackendContext {
    BackendContext::new(BackendConfig {
        rounding_mode: mode,
        seed: Some(seed),
        ..Default::default()
    })
}

fn same_f64(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

fn same_f32(a: f32, b: f32) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

fn finite_f64() -> impl Strategy<Value = f64> {
    prop_oneof![-1e100f64..1e100, -1.0f64..1.0, 1e-3f64..1e3]
}

fn nonzero_f64() -> impl Strategy<Value = f64> {
    prop_oneof![1e-100f64..1e100, -1e100f64..-1e-100]
}

fn finite_f32() -> impl Strategy<Value = f32> {
    prop_oneof![-1e30f32..1e30, -1.0f32..1.0]
}

fn mode() -> impl Strategy<Value = RoundingMode> {
    prop::sample::select(PERTURBING.to_vec())
}

proptest! {
    /// NEAREST add/sub/mul/div match native f64 arithmetic bit for bit.
    #[test]
    fn nearest_matches_native_f64(a in any::<f64>(), b in any::<f64>()) {
        let mut ctx = context(RoundingMode::Nearest, 1);
        prop_assert!(same_f64(ctx.add(a, b), a + b));
        prop_assert!(same_f64(ctx.sub(a, b), a - b));
        prop_assert!(same_f64(ctx.mul(a, b), a * b));
        prop_assert!(same_f64(ctx.div(a, b), a / b));
    }

    /// NEAREST add/sub/mul/div match native f32 arithmetic bit for bit.
    #[test]
    fn nearest_matches_native_f32(a in any::<f32>(), b in any::<f32>()) {
        let mut ctx = context(RoundingMode::Nearest, 1);
        prop_assert!(same_f32(ctx.add(a, b), a + b));
        prop_assert!(same_f32(ctx.sub(a, b), a - b));
        prop_assert!(same_f32(ctx.mul(a, b), a * b));
        prop_assert!(same_f32(ctx.div(a, b), a / b));
    }

    /// NEAREST cast matches `as f32` for any double.
    #[test]
    fn nearest_cast_matches_native(a in any::<f64>()) {
        let mut ctx = context(RoundingMode::Nearest, 1);
        prop_assert!(same_f32(ctx.cast(a), a as f32));
    }

    /// Perturbed f64 results are always one of the two candidates.
    #[test]
    fn perturbed_f64_is_candidate(
        mode in mode(),
        seed in any::<u64>(),
        a in finite_f64(),
        b in finite_f64(),
        d in nonzero_f64(),
    ) {
        let mut ctx = context(mode, seed);

        let (down, up) = eft::add(a, b).candidates();
        let res = ctx.add(a, b);
        prop_assert!(res.to_bits() == down.to_bits() || res.to_bits() == up.to_bits());

        let (down, up) = eft::mul(a, b).candidates();
        let res = ctx.mul(a, b);
        prop_assert!(res.to_bits() == down.to_bits() || res.to_bits() == up.to_bits());

        let (down, up) = eft::div(a, d).candidates();
        let res = ctx.div(a, d);
        prop_assert!(res.to_bits() == down.to_bits() || res.to_bits() == up.to_bits());
    }

    /// Perturbed f32 results are always one of the two candidates.
    #[test]
    fn perturbed_f32_is_candidate(
        mode in mode(),
        seed in any::<u64>(),
        a in finite_f32(),
        b in finite_f32(),
    ) {
        let mut ctx = context(mode, seed);

        let (down, up) = eft::sub(a, b).candidates();
        let res = ctx.sub(a, b);
        prop_assert!(res.to_bits() == down.to_bits() || res.to_bits() == up.to_bits());

        let (down, up) = eft::mul(a, b).candidates();
        let res = ctx.mul(a, b);
        prop_assert!(res.to_bits() == down.to_bits() || res.to_bits() == up.to_bits());
    }

    /// Perturbed casts are floats bracketing the input.
    #[test]
    fn perturbed_cast_brackets_input(mode in mode(), seed in any::<u64>(), a in -1e30f64..1e30) {
        let mut ctx = context(mode, seed);
        let res = ctx.cast(a) as f64;
        let (down, up) = eft::cast(a).candidates();
        prop_assert!(res == down as f64 || res == up as f64);
        prop_assert!(down as f64 <= a && a <= up as f64);
    }

    /// Deterministic modes give the same result regardless of earlier calls.
    #[test]
    fn deterministic_ignores_history(
        det_random in any::<bool>(),
        seed in any::<u64>(),
        history in prop::collection::vec((finite_f64(), finite_f64()), 0..32),
        a in finite_f64(),
        b in finite_f64(),
    ) {
        let mode = if det_random { RoundingMode::RandomDet } else { RoundingMode::AverageDet };
        let mut fresh = context(mode, seed);
        let mut busy = context(mode, seed);
        for (x, y) in history {
            busy.add(x, y);
            busy.mul(x, y);
        }
        prop_assert_eq!(fresh.add(a, b).to_bits(), busy.add(a, b).to_bits());
        prop_assert_eq!(fresh.mul(a, b).to_bits(), busy.mul(a, b).to_bits());
        prop_assert_eq!(fresh.cast(a).to_bits(), busy.cast(a).to_bits());
    }

    /// Small integers add exactly, so no mode may perturb them.
    #[test]
    fn exact_results_untouched(
        mode in mode(),
        seed in any::<u64>(),
        a in -1_000_000i32..1_000_000,
        b in -1_000_000i32..1_000_000,
    ) {
        let mut ctx = context(mode, seed);
        prop_assert_eq!(ctx.add(a as f64, b as f64), (a + b) as f64);
        prop_assert_eq!(ctx.mul(a as f64, b as f64), a as f64 * b as f64);
    }
}
