//! Backend configuration
//!
//! Everything the instrumentation layer hands to the core: rounding mode,
//! seed, generator strategy and which operators to perturb.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::BackendError;
use crate::rng::GeneratorKind;
use crate::rounding::{Operator, RoundingMode};

/// Per-operator enable flags
///
/// A disabled operator is evaluated with plain IEEE round-to-nearest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledOperators {
    pub add: bool,
    pub sub: bool,
    pub mul: bool,
    pub div: bool,
    pub madd: bool,
    pub msub: bool,
    pub cast: bool,
}

impl Default for EnabledOperators {
    fn default() -> Self {
        Self::all()
    }
}

impl EnabledOperators {
    pub fn all() -> Self {
        Self {
            add: true,
            sub: true,
            mul: true,
            div: true,
            madd: true,
            msub: true,
            cast: true,
        }
    }

    pub fn none() -> Self {
        Self {
            add: false,
            sub: false,
            mul: false,
            div: false,
            madd: false,
            msub: false,
            cast: false,
        }
    }

    pub fn is_enabled(&self, op: Operator) -> bool {
        match op {
            Operator::Add => self.add,
            Operator::Sub => self.sub,
            Operator::Mul => self.mul,
            Operator::Div => self.div,
            Operator::MAdd => self.madd,
            Operator::MSub => self.msub,
            Operator::Cast => self.cast,
        }
    }

    pub fn set(&mut self, op: Operator, enabled: bool) {
        let flag = match op {
            Operator::Add => &mut self.add,
            Operator::Sub => &mut self.sub,
            Operator::Mul => &mut self.mul,
            Operator::Div => &mut self.div,
            Operator::MAdd => &mut self.madd,
            Operator::MSub => &mut self.msub,
            Operator::Cast => &mut self.cast,
        };
        *flag = enabled;
    }
}

/// Complete backend configuration
///
/// # Fields
///
/// * `rounding_mode` - Active rounding policy
/// * `seed` - PRNG seed; `None` seeds from the wall clock and process id
/// * `generator` - Generator strategy for the random state
/// * `enabled_operators` - Which operators are perturbed
/// * `count_ops` - Whether per-operator call counts are kept
///
/// # Example
/// ```
/// use stochastic_fp_core::{BackendConfig, RoundingMode};
///
/// let json = r#"{"rounding_mode": "RANDOM_DET", "seed": 42}"#;
/// let config = BackendConfig::from_json(json).unwrap();
/// assert_eq!(config.rounding_mode, RoundingMode::RandomDet);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub rounding_mode: RoundingMode,
    pub seed: Option<u64>,
    pub generator: GeneratorKind,
    pub enabled_operators: EnabledOperators,
    pub count_ops: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            rounding_mode: RoundingMode::Nearest,
            seed: None,
            generator: GeneratorKind::TinyMt,
            enabled_operators: EnabledOperators::all(),
            count_ops: true,
        }
    }
}

impl BackendConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, BackendError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, BackendError> {
        Ok(serde_json::to_string(self)?)
    }

    /// SHA-256 of the canonical JSON form, hex encoded
    ///
    /// Two runs with the same fingerprint (and an explicit seed) are
    /// bit-for-bit reproducible.
    pub fn fingerprint(&self) -> Result<String, BackendError> {
        let json = self.to_json()?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}
