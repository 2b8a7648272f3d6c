//! Rounding modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::BackendError;

/// Policy that maps an exact result to a representable value
///
/// Identifiers are fixed: `NEAREST`, `AVERAGE`, `AVERAGE_DET`, `RANDOM`,
/// `RANDOM_DET`.
///
/// # Example
/// ```
/// use stochastic_fp_core::RoundingMode;
///
/// let mode: RoundingMode = "average_det".parse().unwrap();
/// assert_eq!(mode, RoundingMode::AverageDet);
/// assert_eq!(mode.to_string(), "AVERAGE_DET");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    /// IEEE-754 round to nearest, ties to even
    #[default]
    Nearest,
    /// Stochastic rounding weighted by the distance to each candidate
    Average,
    /// `Average` with the draw derived from the operands
    AverageDet,
    /// Uniform choice between the two candidates
    Random,
    /// `Random` with the draw derived from the operands
    RandomDet,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 5] = [
        RoundingMode::Nearest,
        RoundingMode::Average,
        RoundingMode::AverageDet,
        RoundingMode::Random,
        RoundingMode::RandomDet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::Nearest => "NEAREST",
            RoundingMode::Average => "AVERAGE",
            RoundingMode::AverageDet => "AVERAGE_DET",
            RoundingMode::Random => "RANDOM",
            RoundingMode::RandomDet => "RANDOM_DET",
        }
    }

    /// True for the modes whose draw is a pure function of the operands
    pub fn is_deterministic(&self) -> bool {
        matches!(self, RoundingMode::AverageDet | RoundingMode::RandomDet)
    }

    /// True for every mode except `Nearest`
    pub fn perturbs(&self) -> bool {
        !matches!(self, RoundingMode::Nearest)
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoundingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BackendError::UnknownRoundingMode(s.to_string()))
    }
}
