//! Constraint violation accounting.
//!
//! Stateless functions that re-derive hard- and soft-constraint counts
//! from a [`Schedule`] on every call. Evaluation never fails: an empty or
//! degenerate schedule simply reports its (large) counts.
//!
//! # Key Types
//!
//! - [`Violations`]: `(hard, soft)` pair ordered lexicographically, hard
//!   first. Smaller is better.
//! - [`HardBreakdown`] / [`SoftBreakdown`]: per-constraint counts
//! - [`SoftPolicy`]: which room-stability and working-day accounting the
//!   soft evaluator applies
//!
//! # Cost
//!
//! Hard counts are linear in the number of placements plus a pairwise scan
//! per slot. Curriculum compactness scans later periods of the day for
//! every placement, which dominates at `O(days × periods²)`.

mod hard;
mod policy;
mod soft;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::Schedule;

pub use hard::{
    conflict_violations, hard_breakdown, hard_violations, lecture_allocation_violations,
    room_occupancy_violations, teacher_violations, unavailability_violations, HardBreakdown,
};
pub use policy::{RoomStabilityPolicy, SoftPolicy, WorkingDaysPolicy};
pub use soft::{
    curriculum_compactness_violations, min_working_days_violations, room_capacity_violations,
    room_stability_violations, soft_breakdown, soft_violations, SoftBreakdown,
};

/// A `(hard, soft)` violation pair.
///
/// Field order makes the derived `Ord` lexicographic: any reduction in hard
/// violations beats any change in soft violations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Violations {
    pub hard: usize,
    pub soft: usize,
}

impl Violations {
    /// A perfect schedule.
    pub const ZERO: Self = Self { hard: 0, soft: 0 };

    /// Cost assigned to individuals that could not be evaluated.
    pub const WORST: Self = Self {
        hard: usize::MAX,
        soft: usize::MAX,
    };

    pub fn new(hard: usize, soft: usize) -> Self {
        Self { hard, soft }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Whether every hard constraint is satisfied.
    pub fn is_feasible(&self) -> bool {
        self.hard == 0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.hard, self.soft)
    }
}

/// Evaluates a schedule to its `(hard, soft)` pair.
pub fn evaluate(schedule: &Schedule) -> Violations {
    Violations::new(hard_violations(schedule), soft_violations(schedule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use crate::model::Placement;
    use proptest::prelude::*;

    #[test]
    fn test_lexicographic_order() {
        assert!(Violations::new(0, 100) < Violations::new(1, 0));
        assert!(Violations::new(2, 5) < Violations::new(2, 6));
        assert!(Violations::ZERO < Violations::WORST);
        assert_eq!(Violations::new(3, 4).to_string(), "(3, 4)");
    }

    #[test]
    fn test_feasibility_flags() {
        assert!(Violations::ZERO.is_zero());
        assert!(Violations::new(0, 7).is_feasible());
        assert!(!Violations::new(1, 0).is_feasible());
    }

    #[test]
    fn test_empty_schedule_is_defined() {
        let s = Schedule::new(fixtures::toy());
        let v = evaluate(&s);
        // every course is missing all of its lectures
        assert_eq!(v.hard, 4);
    }

    /// Random placements drawn as (day, period, course, room) indices for
    /// the toy instance.
    fn placements() -> impl Strategy<Value = Vec<(usize, usize, usize, usize)>> {
        prop::collection::vec((0..5usize, 0..4usize, 0..4usize, 0..3usize), 0..40)
    }

    proptest! {
        #[test]
        fn prop_evaluation_is_deterministic_under_clone(cells in placements()) {
            let mut s = Schedule::new(fixtures::toy());
            for (d, p, c, r) in cells {
                s.place(d, p, Placement::new(c, r));
            }
            let copy = s.clone();
            prop_assert_eq!(evaluate(&s), evaluate(&copy));
            prop_assert_eq!(evaluate(&s), evaluate(&s));
        }

        #[test]
        fn prop_mutating_clone_leaves_original(cells in placements(), extra in (0..5usize, 0..4usize, 0..4usize, 0..3usize)) {
            let mut s = Schedule::new(fixtures::toy());
            for (d, p, c, r) in cells {
                s.place(d, p, Placement::new(c, r));
            }
            let before = evaluate(&s);
            let mut copy = s.clone();
            copy.place(extra.0, extra.1, Placement::new(extra.2, extra.3));
            copy.swap_cells((0, 0), (4, 3));
            prop_assert_eq!(evaluate(&s), before);
        }

        #[test]
        fn prop_breakdowns_sum_to_totals(cells in placements()) {
            let mut s = Schedule::new(fixtures::toy());
            for (d, p, c, r) in cells {
                s.place(d, p, Placement::new(c, r));
            }
            prop_assert_eq!(hard_breakdown(&s).total(), hard_violations(&s));
            prop_assert_eq!(soft_breakdown(&s).total(), soft_violations(&s));
        }
    }
}
