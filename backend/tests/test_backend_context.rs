//! Backend Context Tests
//!
//! Critical invariants tested:
//! - Initialization defaults and explicit configuration
//! - Re-seeding reproduces a run
//! - The debug callback observes every operation without changing results
//! - Operation counters and the finalize summary
//! - Independent contexts never share random state

use std::sync::{Arc, Mutex};

use stochastic_fp_core::rng::GeneratorKind;
use stochastic_fp_core::{
    init, init_with, BackendConfig, BackendContext, BackendError, Operator, Precision,
    RoundingMode,
};

fn seeded(mode: RoundingMode, seed: u64) -> BackendContext {
    BackendContext::new(BackendConfig {
        rounding_mode: mode,
        seed: Some(seed),
        ..Default::default()
    })
}

/// A fixed workload touching every binary operator at both widths
fn workload(ctx: &mut BackendContext) -> Vec<u64> {
    let mut out = Vec::new();
    let mut acc = 0.0f64;
    let mut acc32 = 0.0f32;
    for i in 1..200 {
        let x = i as f64;
        let q = ctx.div(1.0, x);
        acc = ctx.add(acc, q);
        acc = ctx.mul(acc, 1.0001);
        acc = ctx.sub(acc, 1e-3);
        acc32 = ctx.add(acc32, 0.1f32);
        out.push(acc.to_bits());
        out.push(acc32.to_bits() as u64);
    }
    out
}

// ============================================================================
// Initialization and configuration
// ============================================================================

#[test]
fn test_init_defaults() {
    let (ctx, _table) = init();
    assert_eq!(ctx.rounding_mode(), RoundingMode::Nearest);
    assert_eq!(ctx.config().generator, GeneratorKind::TinyMt);
    assert!(ctx.config().count_ops);
    // Auto seed is recorded
    assert_eq!(ctx.config().seed, Some(ctx.seed()));
}

#[test]
fn test_init_with_config() {
    let (ctx, _table) = init_with(BackendConfig {
        rounding_mode: RoundingMode::RandomDet,
        seed: Some(42),
        generator: GeneratorKind::Lcg,
        ..Default::default()
    });
    assert_eq!(ctx.rounding_mode(), RoundingMode::RandomDet);
    assert_eq!(ctx.seed(), 42);
    assert_eq!(ctx.random_state().generator_kind(), GeneratorKind::Lcg);
}

#[test]
fn test_configure_switches_mode() {
    let mut ctx = seeded(RoundingMode::Nearest, 1);
    assert_eq!(ctx.div(1.0f64, 3.0), 1.0 / 3.0);

    ctx.configure(RoundingMode::Random);
    assert_eq!(ctx.rounding_mode(), RoundingMode::Random);
    let mut seen_up = false;
    for _ in 0..200 {
        seen_up |= ctx.div(1.0f64, 3.0) != 1.0 / 3.0;
    }
    assert!(seen_up);

    ctx.configure(RoundingMode::Nearest);
    for _ in 0..50 {
        assert_eq!(ctx.div(1.0f64, 3.0), 1.0 / 3.0);
    }
}

#[test]
fn test_set_seed_reproduces_run() {
    for mode in [RoundingMode::Random, RoundingMode::Average] {
        let mut ctx = seeded(mode, 1);
        let first = workload(&mut ctx);
        ctx.set_seed(1);
        let second = workload(&mut ctx);
        assert_eq!(first, second, "{}", mode);
        assert_eq!(ctx.config().seed, Some(1));
    }
}

#[test]
fn test_different_seeds_scatter() {
    let mut a = seeded(RoundingMode::Random, 1);
    let mut b = seeded(RoundingMode::Random, 2);
    assert_ne!(workload(&mut a), workload(&mut b));
}

#[test]
fn test_independent_contexts() {
    let mut a = seeded(RoundingMode::Random, 9);
    let mut b = seeded(RoundingMode::Random, 9);
    let mut reference = seeded(RoundingMode::Random, 9);

    // Interleaving calls on a and b must not make them share a stream
    let mut interleaved_a = Vec::new();
    for i in 1..100 {
        interleaved_a.push(a.div(1.0f64, i as f64).to_bits());
        b.div(1.0f64, i as f64);
        b.div(1.0f64, i as f64);
    }
    let expected: Vec<u64> = (1..100).map(|i| reference.div(1.0f64, i as f64).to_bits()).collect();
    assert_eq!(interleaved_a, expected);
}

#[test]
fn test_config_json_round_trip_and_fingerprint() {
    let config = BackendConfig::from_json(
        r#"{"rounding_mode": "AVERAGE", "seed": 7, "generator": "lcg", "count_ops": false}"#,
    )
    .unwrap();
    assert_eq!(config.rounding_mode, RoundingMode::Average);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.generator, GeneratorKind::Lcg);
    assert!(!config.count_ops);

    let reparsed = BackendConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, config);
    assert_eq!(reparsed.fingerprint().unwrap(), config.fingerprint().unwrap());

    let other = BackendConfig {
        seed: Some(8),
        ..config.clone()
    };
    assert_ne!(other.fingerprint().unwrap(), config.fingerprint().unwrap());
    assert_eq!(config.fingerprint().unwrap().len(), 64);
}

#[test]
fn test_config_rejects_unknown_mode() {
    let err = BackendConfig::from_json(r#"{"rounding_mode": "UPWARD"}"#).unwrap_err();
    assert!(matches!(err, BackendError::InvalidConfig(_)));

    let err = "UPWARD".parse::<RoundingMode>().unwrap_err();
    assert!(matches!(err, BackendError::UnknownRoundingMode(_)));
}

// ============================================================================
// Debug callback
// ============================================================================

#[test]
fn test_callback_does_not_change_results() {
    let mut plain = seeded(RoundingMode::Random, 5);
    let expected = workload(&mut plain);

    let mut traced = seeded(RoundingMode::Random, 5);
    let calls = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&calls);
    traced.set_debug_callback(move |_, _, _, _| {
        *sink.lock().unwrap() += 1;
    });
    assert_eq!(workload(&mut traced), expected);
    // 5 operations per iteration
    assert_eq!(*calls.lock().unwrap(), 199 * 5);
}

#[test]
fn test_callback_replace_and_clear() {
    let mut ctx = seeded(RoundingMode::Nearest, 5);
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&first);
    ctx.set_debug_callback(move |_, name, _, _| sink.lock().unwrap().push(name.to_string()));
    ctx.add(1.0f64, 1.0);

    let sink = Arc::clone(&second);
    ctx.set_debug_callback(move |_, name, _, _| sink.lock().unwrap().push(name.to_string()));
    ctx.mul(2.0f32, 2.0);

    ctx.clear_debug_callback();
    ctx.sub(1.0f64, 1.0);

    assert_eq!(*first.lock().unwrap(), vec!["add".to_string()]);
    assert_eq!(*second.lock().unwrap(), vec!["mul".to_string()]);
}

#[test]
fn test_callback_receives_operands_and_result() {
    let mut ctx = seeded(RoundingMode::Nearest, 5);
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    ctx.set_debug_callback(move |n, name, operands, result| {
        sink.lock()
            .unwrap()
            .push((n, name.to_string(), operands.to_vec(), *result));
    });

    ctx.div(1.0f32, 4.0);
    ctx.sub(5.0f64, 2.0);

    let log = log.lock().unwrap();
    assert_eq!(log[0], (2, "div".to_string(), vec![1.0, 4.0], 0.25));
    assert_eq!(log[1], (2, "sub".to_string(), vec![5.0, 2.0], 3.0));
}

#[test]
fn test_callback_result_is_widened_returned_value() {
    let mut ctx = seeded(RoundingMode::Random, 5);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    ctx.set_debug_callback(move |_, _, _, result| sink.lock().unwrap().push(*result));

    let returned: Vec<f32> = (1..100).map(|i| ctx.div(1.0f32, i as f32)).collect();
    let cast = ctx.cast(0.1);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), returned.len() + 1);
    for (widened, res) in seen.iter().zip(&returned) {
        assert_eq!(*widened, *res as f64);
    }
    assert_eq!(seen[returned.len()], cast as f64);
}

// ============================================================================
// Counters and finalize
// ============================================================================

#[test]
fn test_finalize_counts() {
    let mut ctx = seeded(RoundingMode::Average, 3);
    for _ in 0..10 {
        ctx.add(0.1f64, 0.2);
    }
    for _ in 0..4 {
        ctx.mul(0.1f32, 0.3);
    }
    ctx.cast(0.1);

    let summary = ctx.finalize();
    assert_eq!(summary.total(), 15);

    let add = summary.get(Operator::Add, Precision::Double).unwrap();
    assert_eq!((add.total, add.instrumented), (10, 10));
    let mul = summary.get(Operator::Mul, Precision::Float).unwrap();
    assert_eq!((mul.total, mul.instrumented), (4, 4));
    assert!(summary.get(Operator::Add, Precision::Float).is_none());
    assert!(summary.get(Operator::Cast, Precision::Double).is_some());
}

#[test]
fn test_disabled_operator_counted_as_not_instrumented() {
    let mut ctx = seeded(RoundingMode::Random, 3);
    ctx.set_operator_enabled(Operator::Add, false);
    for _ in 0..100 {
        assert_eq!(ctx.add(0.1f64, 0.2), 0.1 + 0.2);
    }
    ctx.mul(0.1f64, 0.3);

    let summary = ctx.finalize();
    let add = summary.get(Operator::Add, Precision::Double).unwrap();
    assert_eq!((add.total, add.instrumented), (100, 0));
    let mul = summary.get(Operator::Mul, Precision::Double).unwrap();
    assert_eq!(mul.instrumented, 1);
}

#[test]
fn test_operator_table_dispatch() {
    let (mut ctx, table) = init_with(BackendConfig {
        rounding_mode: RoundingMode::Nearest,
        seed: Some(11),
        ..Default::default()
    });

    let mut d = 0.0f64;
    (table.div_double)(1.0, 3.0, &mut d, &mut ctx);
    assert_eq!(d, 1.0 / 3.0);

    let mut f = 0.0f32;
    (table.sub_float)(1.0, 0.25, &mut f, &mut ctx);
    assert_eq!(f, 0.75);

    let mut c = 0.0f32;
    (table.cast_double_to_float)(0.5, &mut c, &mut ctx);
    assert_eq!(c, 0.5);

    assert_eq!(ctx.finalize().total(), 3);
}
