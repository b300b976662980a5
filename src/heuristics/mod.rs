//! Low-level perturbation heuristics.
//!
//! The three operators are used directly as selector candidates and as the
//! terminals of evolved heuristic programs. [`LowLevelHeuristic`] names
//! them so that both uses share one closed, typed set.
//!
//! | Variant | Token | Effect |
//! |---|---|---|
//! | `SingleMove` | `single_move()` | relocate one lecture to a feasible cell |
//! | `SwapSlots` | `swap_slots()` | exchange two whole cells |
//! | `SwapLectures` | `swap_lectures()` | exchange or move one lecture between two cells |

mod operators;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::Schedule;

pub use operators::{single_move, swap_lectures, swap_slots};

/// A schedule-mutating operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LowLevelHeuristic {
    SingleMove,
    SwapSlots,
    SwapLectures,
}

impl LowLevelHeuristic {
    /// Every operator, in token order.
    pub const ALL: [Self; 3] = [Self::SingleMove, Self::SwapSlots, Self::SwapLectures];

    /// Applies the operator in place.
    pub fn apply<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        match self {
            Self::SingleMove => single_move(schedule, rng),
            Self::SwapSlots => swap_slots(schedule, rng),
            Self::SwapLectures => swap_lectures(schedule, rng),
        }
    }

    /// Program token of the operator.
    pub fn token(&self) -> &'static str {
        match self {
            Self::SingleMove => "single_move()",
            Self::SwapSlots => "swap_slots()",
            Self::SwapLectures => "swap_lectures()",
        }
    }
}

impl fmt::Display for LowLevelHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A token that names no low-level heuristic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown heuristic `{0}`")]
pub struct UnknownHeuristic(pub String);

impl FromStr for LowLevelHeuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.token() == s)
            .ok_or_else(|| UnknownHeuristic(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip() {
        for h in LowLevelHeuristic::ALL {
            assert_eq!(h.to_string().parse::<LowLevelHeuristic>(), Ok(h));
        }
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(
            "single_move".parse::<LowLevelHeuristic>(),
            Err(UnknownHeuristic("single_move".into()))
        );
    }
}
