//! Heuristic programs: the phenotypes of grammatical evolution.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::acceptance::{Acceptance, AcceptanceKind, MoveAcceptance, ThresholdConfig, UnknownAcceptance};
use crate::evaluator::{evaluate, Violations};
use crate::heuristics::{LowLevelHeuristic, UnknownHeuristic};
use crate::model::Schedule;

/// Failure to read a phenotype as a program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramParseError {
    #[error("empty program")]
    Empty,

    #[error(transparent)]
    Acceptance(#[from] UnknownAcceptance),

    #[error(transparent)]
    Heuristic(#[from] UnknownHeuristic),
}

/// An acceptance policy plus a sequence of heuristic calls.
///
/// Text form: `<acceptance-token> <heuristic-token>*`, e.g.
/// `ILTA swap_slots() single_move()`.
///
/// ```
/// use u_timetable::acceptance::AcceptanceKind;
/// use u_timetable::ge::HeuristicProgram;
/// use u_timetable::heuristics::LowLevelHeuristic;
///
/// let program: HeuristicProgram = "AEI single_move() swap_slots()".parse().unwrap();
/// assert_eq!(program.acceptance, AcceptanceKind::EqualOrImproving);
/// assert_eq!(
///     program.calls,
///     vec![LowLevelHeuristic::SingleMove, LowLevelHeuristic::SwapSlots]
/// );
/// assert_eq!(program.to_string(), "AEI single_move() swap_slots()");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeuristicProgram {
    pub acceptance: AcceptanceKind,
    pub calls: Vec<LowLevelHeuristic>,
}

impl HeuristicProgram {
    pub fn new(acceptance: AcceptanceKind, calls: Vec<LowLevelHeuristic>) -> Self {
        Self { acceptance, calls }
    }

    /// Applies every call in order, in place.
    pub fn perturb<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        for call in &self.calls {
            call.apply(schedule, rng);
        }
    }

    /// Runs the program once against `baseline`.
    ///
    /// A clone of `baseline` is perturbed, then a fresh instance of the
    /// program's acceptance policy decides between the clone and the
    /// baseline. Returns the retained schedule and its cost.
    pub fn evaluate<R: Rng>(
        &self,
        baseline: &Schedule,
        thresholds: &ThresholdConfig,
        rng: &mut R,
    ) -> (Schedule, Violations) {
        let mut candidate = baseline.clone();
        self.perturb(&mut candidate, rng);
        let current_cost = evaluate(baseline);
        let candidate_cost = evaluate(&candidate);
        let mut acceptance = Acceptance::new(self.acceptance, thresholds);
        if acceptance.accept(current_cost, candidate_cost) {
            (candidate, candidate_cost)
        } else {
            (baseline.clone(), current_cost)
        }
    }
}

impl fmt::Display for HeuristicProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.acceptance)?;
        for call in &self.calls {
            write!(f, " {call}")?;
        }
        Ok(())
    }
}

impl FromStr for HeuristicProgram {
    type Err = ProgramParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let acceptance = tokens
            .next()
            .ok_or(ProgramParseError::Empty)?
            .parse::<AcceptanceKind>()?;
        let calls = tokens
            .map(str::parse)
            .collect::<Result<Vec<LowLevelHeuristic>, _>>()?;
        Ok(Self { acceptance, calls })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{fixtures, Placement};
    use crate::random::create_rng;

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<HeuristicProgram>(), Err(ProgramParseError::Empty));
        assert!(matches!(
            "XYZ swap_slots()".parse::<HeuristicProgram>(),
            Err(ProgramParseError::Acceptance(_))
        ));
        assert!(matches!(
            "AI swap()".parse::<HeuristicProgram>(),
            Err(ProgramParseError::Heuristic(_))
        ));
    }

    #[test]
    fn test_acceptance_only_program() {
        let program: HeuristicProgram = "ILTA".parse().unwrap();
        assert!(program.calls.is_empty());
        assert_eq!(program.to_string(), "ILTA");
    }

    #[test]
    fn test_evaluate_never_worsens_under_ai() {
        let mut baseline = Schedule::new(fixtures::toy());
        baseline.place(0, 0, Placement::new(0, 0));
        baseline.place(1, 1, Placement::new(2, 2));
        baseline.place(2, 2, Placement::new(3, 1));
        let base_cost = evaluate(&baseline);

        let program: HeuristicProgram = "AI swap_slots() swap_lectures() single_move()".parse().unwrap();
        let mut rng = create_rng(4);
        for _ in 0..20 {
            let (retained, cost) = program.evaluate(&baseline, &ThresholdConfig::default(), &mut rng);
            assert!(cost <= base_cost);
            assert_eq!(evaluate(&retained), cost);
        }
        // the baseline itself is never touched
        assert_eq!(evaluate(&baseline), base_cost);
    }
}
