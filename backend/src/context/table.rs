//! Operator table: one callable entry point per operator and width
//!
//! The instrumentation layer dispatches through this table instead of
//! naming functions directly, so a backend can be plugged in at runtime.
//! Every entry writes its result through `res`.

use super::backend::BackendContext;
use super::config::BackendConfig;
use crate::rounding::Real;

pub type BinaryEntry<T> = fn(T, T, &mut T, &mut BackendContext);
pub type TernaryEntry<T> = fn(T, T, T, &mut T, &mut BackendContext);
pub type CastEntry = fn(f64, &mut f32, &mut BackendContext);

/// Entry points of a backend
#[derive(Debug, Clone, Copy)]
pub struct OperatorTable {
    pub add_float: BinaryEntry<f32>,
    pub add_double: BinaryEntry<f64>,
    pub sub_float: BinaryEntry<f32>,
    pub sub_double: BinaryEntry<f64>,
    pub mul_float: BinaryEntry<f32>,
    pub mul_double: BinaryEntry<f64>,
    pub div_float: BinaryEntry<f32>,
    pub div_double: BinaryEntry<f64>,
    pub madd_float: TernaryEntry<f32>,
    pub madd_double: TernaryEntry<f64>,
    pub msub_float: TernaryEntry<f32>,
    pub msub_double: TernaryEntry<f64>,
    pub cast_double_to_float: CastEntry,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self {
            add_float: add::<f32>,
            add_double: add::<f64>,
            sub_float: sub::<f32>,
            sub_double: sub::<f64>,
            mul_float: mul::<f32>,
            mul_double: mul::<f64>,
            div_float: div::<f32>,
            div_double: div::<f64>,
            madd_float: madd::<f32>,
            madd_double: madd::<f64>,
            msub_float: msub::<f32>,
            msub_double: msub::<f64>,
            cast_double_to_float,
        }
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh context with the default configuration, plus its entry points
///
/// # Example
/// ```
/// use stochastic_fp_core::{init, RoundingMode};
///
/// let (mut ctx, table) = init();
/// ctx.configure(RoundingMode::Nearest);
///
/// let mut res = 0.0f64;
/// (table.add_double)(0.1, 0.2, &mut res, &mut ctx);
/// assert_eq!(res, 0.1 + 0.2);
/// ```
pub fn init() -> (BackendContext, OperatorTable) {
    init_with(BackendConfig::default())
}

/// Context built from `config`, plus its entry points
pub fn init_with(config: BackendConfig) -> (BackendContext, OperatorTable) {
    (BackendContext::new(config), OperatorTable::new())
}

pub fn add<T: Real>(a: T, b: T, res: &mut T, ctx: &mut BackendContext) {
    *res = ctx.add(a, b);
}

pub fn sub<T: Real>(a: T, b: T, res: &mut T, ctx: &mut BackendContext) {
    *res = ctx.sub(a, b);
}

pub fn mul<T: Real>(a: T, b: T, res: &mut T, ctx: &mut BackendContext) {
    *res = ctx.mul(a, b);
}

pub fn div<T: Real>(a: T, b: T, res: &mut T, ctx: &mut BackendContext) {
    *res = ctx.div(a, b);
}

pub fn madd<T: Real>(a: T, b: T, c: T, res: &mut T, ctx: &mut BackendContext) {
    *res = ctx.madd(a, b, c);
}

pub fn msub<T: Real>(a: T, b: T, c: T, res: &mut T, ctx: &mut BackendContext) {
    *res = ctx.msub(a, b, c);
}

pub fn cast_double_to_float(a: f64, res: &mut f32, ctx: &mut BackendContext) {
    *res = ctx.cast(a);
}
