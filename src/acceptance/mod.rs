//! Move acceptance.
//!
//! A [`MoveAcceptance`] compares the `(hard, soft)` cost of the current
//! schedule with that of a perturbed copy and decides whether the copy
//! becomes current. [`Acceptance`] dispatches over the three built-in
//! policies by [`AcceptanceKind`], which is how search configurations and
//! evolved programs name them.

mod config;
mod policies;

pub use config::{AcceptanceKind, ThresholdConfig, UnknownAcceptance};
pub use policies::{
    AcceptEqualOrImproving, AcceptImproving, IteratedLimitedThresholdAcceptance, MoveAcceptance,
};

use crate::evaluator::Violations;

/// One of the built-in acceptance policies, with its state.
#[derive(Debug, Clone)]
pub enum Acceptance {
    IteratedLimitedThreshold(IteratedLimitedThresholdAcceptance),
    Improving(AcceptImproving),
    EqualOrImproving(AcceptEqualOrImproving),
}

impl Acceptance {
    /// Creates a fresh policy instance; ILTA starts with a zero counter.
    pub fn new(kind: AcceptanceKind, thresholds: &ThresholdConfig) -> Self {
        match kind {
            AcceptanceKind::IteratedLimitedThreshold => Self::IteratedLimitedThreshold(
                IteratedLimitedThresholdAcceptance::from_config(thresholds),
            ),
            AcceptanceKind::Improving => Self::Improving(AcceptImproving),
            AcceptanceKind::EqualOrImproving => Self::EqualOrImproving(AcceptEqualOrImproving),
        }
    }

    pub fn kind(&self) -> AcceptanceKind {
        match self {
            Self::IteratedLimitedThreshold(_) => AcceptanceKind::IteratedLimitedThreshold,
            Self::Improving(_) => AcceptanceKind::Improving,
            Self::EqualOrImproving(_) => AcceptanceKind::EqualOrImproving,
        }
    }
}

impl MoveAcceptance for Acceptance {
    fn name(&self) -> &str {
        match self {
            Self::IteratedLimitedThreshold(a) => a.name(),
            Self::Improving(a) => a.name(),
            Self::EqualOrImproving(a) => a.name(),
        }
    }

    fn accept(&mut self, current: Violations, candidate: Violations) -> bool {
        match self {
            Self::IteratedLimitedThreshold(a) => a.accept(current, candidate),
            Self::Improving(a) => a.accept(current, candidate),
            Self::EqualOrImproving(a) => a.accept(current, candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{fixtures, Placement, Schedule};

    #[test]
    fn test_dispatch_matches_kind() {
        let thresholds = ThresholdConfig::default();
        for kind in AcceptanceKind::ALL {
            let acceptance = Acceptance::new(kind, &thresholds);
            assert_eq!(acceptance.kind(), kind);
            assert_eq!(acceptance.name(), kind.token());
        }
    }

    #[test]
    fn test_accept_schedules() {
        let empty = Schedule::new(fixtures::tiny());
        let mut placed = empty.clone();
        placed.place(0, 0, Placement::new(0, 0));
        placed.place(1, 0, Placement::new(1, 0));

        let mut ai = Acceptance::new(AcceptanceKind::Improving, &ThresholdConfig::default());
        assert!(ai.accept_schedules(&empty, &placed));
        assert!(!ai.accept_schedules(&placed, &empty));
    }
}
