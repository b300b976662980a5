//! Moves the selection loop can play.

use std::fmt;

use rand::Rng;

use crate::ge::HeuristicProgram;
use crate::heuristics::LowLevelHeuristic;
use crate::model::Schedule;

/// An in-place schedule move with a printable name.
///
/// Implementors must leave the schedule structurally valid; whether the
/// move is kept is decided by the loop's acceptance policy.
pub trait Perturbation: fmt::Display {
    fn perturb<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R);
}

impl Perturbation for LowLevelHeuristic {
    fn perturb<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        self.apply(schedule, rng);
    }
}

/// Runs the program's calls only. Its acceptance token is ignored here:
/// the loop running it owns acceptance.
impl Perturbation for HeuristicProgram {
    fn perturb<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        HeuristicProgram::perturb(self, schedule, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acceptance::AcceptanceKind;
    use crate::model::{fixtures, Placement};
    use crate::random::create_rng;

    fn apply<P: Perturbation>(p: &P, schedule: &mut Schedule, seed: u64) {
        p.perturb(schedule, &mut create_rng(seed));
    }

    #[test]
    fn test_program_matches_its_calls() {
        let mut base = Schedule::new(fixtures::toy());
        base.place(0, 0, Placement::new(0, 0));
        base.place(1, 1, Placement::new(1, 1));
        base.place(3, 2, Placement::new(2, 2));

        let program = HeuristicProgram::new(
            AcceptanceKind::Improving,
            vec![LowLevelHeuristic::SwapSlots, LowLevelHeuristic::SingleMove],
        );
        let mut via_program = base.clone();
        apply(&program, &mut via_program, 9);

        let mut via_calls = base.clone();
        let mut rng = create_rng(9);
        LowLevelHeuristic::SwapSlots.apply(&mut via_calls, &mut rng);
        LowLevelHeuristic::SingleMove.apply(&mut via_calls, &mut rng);

        assert_eq!(via_program.to_string(), via_calls.to_string());
        assert_eq!(via_program.placement_count(), 3);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(LowLevelHeuristic::SwapLectures.to_string(), "swap_lectures()");
        let program: HeuristicProgram = "ILTA single_move()".parse().unwrap();
        assert_eq!(program.to_string(), "ILTA single_move()");
    }
}
