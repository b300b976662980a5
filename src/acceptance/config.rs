//! Acceptance configuration and the program-token names of the policies.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of Iterated Limited Threshold Acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThresholdConfig {
    /// Consecutive rejections before a worsening move may be accepted.
    pub max_iterations: usize,

    /// Largest soft-cost increase accepted once the counter is exhausted.
    pub threshold: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            threshold: 5,
        }
    }
}

impl ThresholdConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Which acceptance policy to run.
///
/// The string forms (`ILTA`, `AI`, `AEI`) are the acceptance tokens of an
/// evolved heuristic program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AcceptanceKind {
    #[default]
    IteratedLimitedThreshold,
    Improving,
    EqualOrImproving,
}

impl AcceptanceKind {
    pub const ALL: [Self; 3] = [
        Self::IteratedLimitedThreshold,
        Self::Improving,
        Self::EqualOrImproving,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::IteratedLimitedThreshold => "ILTA",
            Self::Improving => "AI",
            Self::EqualOrImproving => "AEI",
        }
    }
}

impl fmt::Display for AcceptanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A token that names no acceptance policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown acceptance policy `{0}`")]
pub struct UnknownAcceptance(pub String);

impl FromStr for AcceptanceKind {
    type Err = UnknownAcceptance;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.token() == s)
            .ok_or_else(|| UnknownAcceptance(s.to_string()))
    }
}
