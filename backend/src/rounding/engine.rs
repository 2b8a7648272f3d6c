//! Rounding-mode operator engine
//!
//! For every operation the engine computes the IEEE round-to-nearest result
//! and its rounding error, then lets the rounding mode pick between the two
//! IEEE candidates that bracket the exact value:
//!
//! ```text
//! operands ──► error-free transform ──► (nearest, error)
//!                                            │
//!            NEAREST / exact / NaN / ∞ ──────┼──► nearest
//!                                            ▼
//!                          candidates (down, up)
//!                                            │
//!   RANDOM      : next_bool                   │
//!   RANDOM_DET  : next_bool_deterministic     ├──► down or up
//!   AVERAGE     : next_double < position      │
//!   AVERAGE_DET : hashed double < position    │
//! ```
//!
//! Perturbation never produces anything but one of the two candidates.

use crate::rng::{OperandPack, RandomState};

use super::eft::{self, Exact};
use super::mode::RoundingMode;
use super::op::{operation_tag, Operator, Precision};
use super::real::Real;

/// Two-operand arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn operator(&self) -> Operator {
        match self {
            BinaryOp::Add => Operator::Add,
            BinaryOp::Sub => Operator::Sub,
            BinaryOp::Mul => Operator::Mul,
            BinaryOp::Div => Operator::Div,
        }
    }

    fn nearest<T: Real>(&self, a: T, b: T) -> T {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }
    }

    fn exact<T: Real>(&self, a: T, b: T) -> Exact<T> {
        match self {
            BinaryOp::Add => eft::add(a, b),
            BinaryOp::Sub => eft::sub(a, b),
            BinaryOp::Mul => eft::mul(a, b),
            BinaryOp::Div => eft::div(a, b),
        }
    }
}

/// Fused three-operand arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FmaOp {
    /// `a * b + c`
    MAdd,
    /// `a * b - c`
    MSub,
}

impl FmaOp {
    pub fn operator(&self) -> Operator {
        match self {
            FmaOp::MAdd => Operator::MAdd,
            FmaOp::MSub => Operator::MSub,
        }
    }

    fn addend<T: Real>(&self, c: T) -> T {
        match self {
            FmaOp::MAdd => c,
            FmaOp::MSub => -c,
        }
    }
}

/// Pick the candidate the mode asks for
///
/// `pack` is only hashed by the deterministic modes.
pub fn resolve<T: Real>(
    exact: Exact<T>,
    mode: RoundingMode,
    rng: &mut RandomState,
    pack: &OperandPack,
) -> T {
    if exact.is_exact() {
        return exact.nearest;
    }
    let round_up = match mode {
        RoundingMode::Nearest => return exact.nearest,
        RoundingMode::Random => rng.next_bool(),
        RoundingMode::RandomDet => rng.next_bool_deterministic(pack),
        RoundingMode::Average => rng.next_double() < exact.position(),
        RoundingMode::AverageDet => rng.next_double_deterministic(pack) < exact.position(),
    };
    let (down, up) = exact.candidates();
    if round_up {
        up
    } else {
        down
    }
}

/// Rounded `a op b`
///
/// # Example
/// ```
/// use stochastic_fp_core::rng::{GeneratorKind, RandomState};
/// use stochastic_fp_core::rounding::{round_binary, BinaryOp};
/// use stochastic_fp_core::RoundingMode;
///
/// let mut rng = RandomState::new(GeneratorKind::TinyMt, 12345);
/// let sum = round_binary(BinaryOp::Add, 0.1f64, 0.2, RoundingMode::Random, &mut rng);
/// assert!(sum == 0.3 || sum == 0.30000000000000004);
/// ```
pub fn round_binary<T: Real>(
    op: BinaryOp,
    a: T,
    b: T,
    mode: RoundingMode,
    rng: &mut RandomState,
) -> T {
    if !mode.perturbs() {
        return op.nearest(a, b);
    }
    let pack = OperandPack::new(
        operation_tag(op.operator(), T::PRECISION),
        &[a.pack_word(), b.pack_word()],
    );
    resolve(op.exact(a, b), mode, rng, &pack)
}

/// Rounded fused `a * b ± c`, computed as one operation before perturbation
///
/// # Panics
/// Panics when the crate is built without the `fma` feature: a separately
/// rounded multiply-add would silently change results.
pub fn round_fma<T: Real>(
    op: FmaOp,
    a: T,
    b: T,
    c: T,
    mode: RoundingMode,
    rng: &mut RandomState,
) -> T {
    require_fma_support();
    let addend = op.addend(c);
    if !mode.perturbs() {
        return a.fused_mul_add(b, addend);
    }
    let pack = OperandPack::new(
        operation_tag(op.operator(), T::PRECISION),
        &[a.pack_word(), b.pack_word(), c.pack_word()],
    );
    resolve(eft::fma(a, b, addend), mode, rng, &pack)
}

/// Rounded narrowing conversion, resolved at float precision from the full
/// double input
pub fn round_cast(a: f64, mode: RoundingMode, rng: &mut RandomState) -> f32 {
    if !mode.perturbs() {
        return a as f32;
    }
    let pack = OperandPack::new(operation_tag(Operator::Cast, Precision::Double), &[a.pack_word()]);
    resolve(eft::cast(a), mode, rng, &pack)
}

#[cfg(feature = "fma")]
#[inline]
fn require_fma_support() {}

#[cfg(not(feature = "fma"))]
fn require_fma_support() {
    panic!(
        "fused multiply-add requested but FMA support is not compiled in \
         (enable the `fma` feature)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GeneratorKind;

    fn rng() -> RandomState {
        RandomState::new(GeneratorKind::TinyMt, 2024)
    }

    #[test]
    fn test_nearest_does_not_draw() {
        let mut state = rng();
        let mut untouched = rng();
        for _ in 0..100 {
            round_binary(BinaryOp::Div, 1.0f64, 3.0, RoundingMode::Nearest, &mut state);
        }
        for _ in 0..64 {
            assert_eq!(state.next_bool(), untouched.next_bool());
        }
    }

    #[test]
    fn test_exact_results_never_perturbed() {
        let mut state = rng();
        for mode in RoundingMode::ALL {
            for _ in 0..50 {
                assert_eq!(round_binary(BinaryOp::Add, 1.0f64, 2.0, mode, &mut state), 3.0);
                assert_eq!(round_binary(BinaryOp::Mul, 1.5f32, 2.0, mode, &mut state), 3.0);
            }
        }
    }

    #[test]
    fn test_random_hits_both_candidates() {
        let mut state = rng();
        let mut seen_down = false;
        let mut seen_up = false;
        for _ in 0..200 {
            let r = round_binary(BinaryOp::Div, 1.0f64, 3.0, RoundingMode::Random, &mut state);
            let nearest = 1.0f64 / 3.0;
            if r == nearest {
                seen_down = true;
            } else {
                assert_eq!(r, Real::next_up(nearest));
                seen_up = true;
            }
        }
        assert!(seen_down && seen_up);
    }

    #[test]
    #[cfg(feature = "fma")]
    fn test_msub_negates_addend() {
        let mut state = rng();
        let r = round_fma(FmaOp::MSub, 2.0f64, 3.0, 1.0, RoundingMode::Nearest, &mut state);
        assert_eq!(r, 5.0);
    }

    #[test]
    fn test_cast_candidates_are_floats_around_input() {
        let mut state = rng();
        let x = 0.1f64;
        let nearest = x as f32;
        for _ in 0..100 {
            let r = round_cast(x, RoundingMode::Average, &mut state);
            assert!(r == nearest || r == Real::next_up(nearest) || r == Real::next_down(nearest));
            assert!((r as f64 - x).abs() < f32::EPSILON as f64);
        }
    }
}
