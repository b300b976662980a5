//! Hard-constraint violation counts.
//!
//! Every count is re-derived from the grid; nothing is cached between
//! calls.

use crate::model::{Problem, Schedule, Slot};

/// Per-constraint hard violation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardBreakdown {
    /// Courses whose scheduled lecture count differs from the required one.
    pub lecture_allocation: usize,
    /// Curriculum-sharing course pairs taught in the same cell.
    pub conflicts: usize,
    /// Extra uses of a room within a cell.
    pub room_occupancy: usize,
    /// Extra lectures of a teacher within a cell.
    pub teacher_conflicts: usize,
    /// Unavailability records whose course occupies the forbidden cell.
    pub unavailability: usize,
}

impl HardBreakdown {
    pub fn total(&self) -> usize {
        self.lecture_allocation
            + self.conflicts
            + self.room_occupancy
            + self.teacher_conflicts
            + self.unavailability
    }
}

/// Computes every hard-constraint count of a schedule.
pub fn hard_breakdown(schedule: &Schedule) -> HardBreakdown {
    let problem = schedule.problem();
    let mut breakdown = HardBreakdown {
        lecture_allocation: lecture_allocation_violations(schedule),
        unavailability: unavailability_violations(schedule),
        ..HardBreakdown::default()
    };
    for (_, _, slot) in schedule.cells() {
        breakdown.conflicts += conflict_violations(problem, slot);
        breakdown.room_occupancy += room_occupancy_violations(slot);
        breakdown.teacher_conflicts += teacher_violations(problem, slot);
    }
    breakdown
}

/// Total number of hard-constraint violations.
pub fn hard_violations(schedule: &Schedule) -> usize {
    hard_breakdown(schedule).total()
}

/// One violation per course whose lecture count is not exactly the
/// required count.
pub fn lecture_allocation_violations(schedule: &Schedule) -> usize {
    let problem = schedule.problem();
    schedule
        .lecture_counts()
        .iter()
        .zip(problem.courses())
        .filter(|&(&count, course)| count != course.lectures)
        .count()
}

/// Number of placement pairs in the slot whose courses share a curriculum.
pub fn conflict_violations(problem: &Problem, slot: &Slot) -> usize {
    let p = slot.placements();
    let mut count = 0;
    for i in 0..p.len() {
        for j in (i + 1)..p.len() {
            if problem.shares_curriculum(p[i].course, p[j].course) {
                count += 1;
            }
        }
    }
    count
}

/// Placements minus distinct rooms in the slot.
pub fn room_occupancy_violations(slot: &Slot) -> usize {
    slot.len() - distinct(slot.iter().map(|p| p.room))
}

/// Placements minus distinct teachers in the slot.
pub fn teacher_violations(problem: &Problem, slot: &Slot) -> usize {
    slot.len() - distinct(slot.iter().map(|p| problem.teacher_of(p.course)))
}

/// One violation per unavailability record whose course sits in the
/// forbidden cell.
pub fn unavailability_violations(schedule: &Schedule) -> usize {
    let problem = schedule.problem();
    problem
        .unavailability()
        .iter()
        .filter(|record| {
            problem
                .course_index(&record.course)
                .is_some_and(|c| schedule.slot(record.day, record.period).contains_course(c))
        })
        .count()
}

fn distinct(values: impl Iterator<Item = usize>) -> usize {
    let mut v: Vec<usize> = values.collect();
    v.sort_unstable();
    v.dedup();
    v.len()
}
