//! Operator and width tags

use serde::{Deserialize, Serialize};

/// Arithmetic operator handled by the engine
///
/// Comparisons, min and max are never perturbed and have no entry here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    /// Fused `a * b + c`
    MAdd,
    /// Fused `a * b - c`
    MSub,
    /// Narrowing conversion double → float
    Cast,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::MAdd,
        Operator::MSub,
        Operator::Cast,
    ];

    /// Name passed to the debug callback
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::Div => "div",
            Operator::MAdd => "madd",
            Operator::MSub => "msub",
            Operator::Cast => "cast",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Operator::Cast => 1,
            Operator::MAdd | Operator::MSub => 3,
            _ => 2,
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// Floating-point width of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// binary32
    Float,
    /// binary64
    Double,
}

impl Precision {
    pub const ALL: [Precision; 2] = [Precision::Float, Precision::Double];

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// Tag mixed into the operand hash so each operator/width pair draws
/// independently
pub(crate) fn operation_tag(op: Operator, precision: Precision) -> u64 {
    let id = ((op.index() as u64) << 1) | precision.index() as u64;
    (id + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}
