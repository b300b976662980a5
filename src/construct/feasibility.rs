//! Cell feasibility, saturation degree and room choice.

use rand::Rng;

use crate::evaluator::soft_violations;
use crate::model::{Placement, Schedule};

/// How a lecture picks among its feasible cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlacementMode {
    /// Try every feasible cell and keep the one with the lowest resulting
    /// soft cost. The last cell reaching the minimum wins.
    #[default]
    MinSoftCost,
    /// Pick a feasible cell uniformly at random.
    Random,
}

/// Whether a lecture of `course` may be added to cell `(day, period)`
/// without breaking a hard constraint.
///
/// The cell must not already hold the course, must not be blocked for it,
/// must hold no curriculum-mate and no course of the same teacher, and
/// must have at least one unoccupied room.
pub fn is_feasible(schedule: &Schedule, course: usize, day: usize, period: usize) -> bool {
    let problem = schedule.problem();
    if problem.is_unavailable(course, day, period) {
        return false;
    }
    let slot = schedule.slot(day, period);
    let teacher = problem.teacher_of(course);
    slot.iter().all(|p| {
        p.course != course
            && !problem.shares_curriculum(course, p.course)
            && problem.teacher_of(p.course) != teacher
    }) && (0..problem.rooms().len()).any(|r| !slot.contains_room(r))
}

/// All feasible cells for `course`, in row-major order.
pub fn feasible_slots(schedule: &Schedule, course: usize) -> Vec<(usize, usize)> {
    let periods = schedule.periods_per_day();
    (0..schedule.cell_count())
        .map(|i| (i / periods, i % periods))
        .filter(|&(d, p)| is_feasible(schedule, course, d, p))
        .collect()
}

/// Number of cells still open to `course`.
///
/// Equals the grid size minus the infeasible cells, each infeasible cell
/// counted once. Low values mark courses that are hard to place.
pub fn saturation_degree(schedule: &Schedule, course: usize) -> usize {
    let periods = schedule.periods_per_day();
    (0..schedule.cell_count())
        .filter(|&i| is_feasible(schedule, course, i / periods, i % periods))
        .count()
}

/// Picks a room for a lecture of `course` in `(day, period)`.
///
/// In order of preference: the course's anchor room if it is free and
/// large enough; the smallest free room that fits; the largest free room;
/// the anchor room or the largest room even though it is taken. Returns
/// `None` only when the problem has no rooms.
pub fn choose_room(schedule: &Schedule, course: usize, day: usize, period: usize) -> Option<usize> {
    let problem = schedule.problem();
    let slot = schedule.slot(day, period);
    let students = problem.course(course).students;
    let fits = |r: usize| problem.room(r).capacity >= students;
    let free = |r: usize| !slot.contains_room(r);

    let anchor = schedule.anchor_room(course);
    if let Some(room) = anchor {
        if free(room) && fits(room) {
            return Some(room);
        }
    }
    let by_capacity = problem.rooms_by_capacity();
    by_capacity
        .iter()
        .copied()
        .find(|&r| free(r) && fits(r))
        .or_else(|| by_capacity.iter().rev().copied().find(|&r| free(r)))
        .or(anchor)
        .or_else(|| by_capacity.last().copied())
}

/// Places one lecture of `course` into a feasible cell chosen by `mode`.
///
/// Returns the chosen cell, or `None` when no cell is feasible (the
/// schedule is left untouched).
pub fn place_lecture<R: Rng>(
    schedule: &mut Schedule,
    course: usize,
    mode: PlacementMode,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let cells = feasible_slots(schedule, course);
    if cells.is_empty() {
        return None;
    }
    let (day, period) = match mode {
        PlacementMode::Random => cells[rng.random_range(0..cells.len())],
        PlacementMode::MinSoftCost => cheapest_cell(schedule, course, &cells)?,
    };
    let room = choose_room(schedule, course, day, period)?;
    schedule.place(day, period, Placement::new(course, room));
    Some((day, period))
}

/// Trial-places the course in every candidate cell and returns the cell
/// with the lowest soft cost.
fn cheapest_cell(
    schedule: &mut Schedule,
    course: usize,
    cells: &[(usize, usize)],
) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), usize)> = None;
    for &(day, period) in cells {
        let Some(room) = choose_room(schedule, course, day, period) else {
            continue;
        };
        let anchor = schedule.anchor_room(course);
        schedule.place(day, period, Placement::new(course, room));
        let cost = soft_violations(schedule);
        let slot = schedule.slot_mut(day, period);
        let last = slot.len() - 1;
        slot.remove(last);
        schedule.set_anchor_room(course, anchor);

        if best.is_none_or(|(_, c)| cost <= c) {
            best = Some(((day, period), cost));
        }
    }
    best.map(|(cell, _)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{fixtures, Course, Curriculum, Problem, Room};
    use crate::random::create_rng;
    use std::sync::Arc;

    fn problem() -> Arc<Problem> {
        Arc::new(
            Problem::builder("feas", 2, 2)
                .course(Course::new("a", "t1", 2, 1, 30))
                .course(Course::new("b", "t1", 1, 1, 10))
                .course(Course::new("c", "t2", 1, 1, 10))
                .course(Course::new("d", "t3", 1, 1, 10))
                .room(Room::new("small", 20))
                .room(Room::new("large", 40))
                .curriculum(Curriculum::new("q", ["a", "c"]))
                .unavailable("a", 1, 1)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_feasibility_rules() {
        let mut s = Schedule::new(problem());
        s.place(0, 0, Placement::new(0, 1));
        // same course
        assert!(!is_feasible(&s, 0, 0, 0));
        // same teacher as a
        assert!(!is_feasible(&s, 1, 0, 0));
        // curriculum-mate of a
        assert!(!is_feasible(&s, 2, 0, 0));
        // unrelated, one room still free
        assert!(is_feasible(&s, 3, 0, 0));
        // unavailability
        assert!(!is_feasible(&s, 0, 1, 1));
    }

    #[test]
    fn test_full_cell_is_infeasible() {
        let mut s = Schedule::new(problem());
        s.place(0, 1, Placement::new(2, 0));
        s.place(0, 1, Placement::new(1, 1));
        assert!(!is_feasible(&s, 3, 0, 1));
    }

    #[test]
    fn test_saturation_degree() {
        let mut s = Schedule::new(problem());
        assert_eq!(saturation_degree(&s, 0), 3);
        assert_eq!(saturation_degree(&s, 3), 4);
        s.place(1, 0, Placement::new(2, 0));
        assert_eq!(saturation_degree(&s, 0), 2);
        assert_eq!(feasible_slots(&s, 0), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_choose_room_preferences() {
        let mut s = Schedule::new(problem());
        // a has 30 students: only `large` fits
        assert_eq!(choose_room(&s, 0, 0, 0), Some(1));
        // d has 10 students: smallest fitting room
        assert_eq!(choose_room(&s, 3, 0, 0), Some(0));

        // anchor room wins when free and fitting
        s.place(1, 0, Placement::new(3, 1));
        assert_eq!(choose_room(&s, 3, 0, 0), Some(1));

        // no fitting room free: largest free room
        s.place(0, 1, Placement::new(2, 1));
        assert_eq!(choose_room(&s, 0, 0, 1), Some(0));

        // nothing free: anchor room
        s.place(0, 1, Placement::new(1, 0));
        assert_eq!(choose_room(&s, 3, 0, 1), Some(1));
    }

    #[test]
    fn test_place_lecture_random_and_cost_modes() {
        let problem = fixtures::toy();
        let mut rng = create_rng(3);
        for mode in [PlacementMode::Random, PlacementMode::MinSoftCost] {
            let mut s = Schedule::new(problem.clone());
            let cell = place_lecture(&mut s, 2, mode, &mut rng).unwrap();
            assert!(s.slot(cell.0, cell.1).contains_course(2));
            assert_eq!(s.placement_count(), 1);
        }
    }

    #[test]
    fn test_trial_placement_leaves_schedule_intact() {
        let problem = fixtures::toy();
        let mut s = Schedule::new(problem);
        let mut rng = create_rng(0);
        place_lecture(&mut s, 0, PlacementMode::MinSoftCost, &mut rng).unwrap();
        assert_eq!(s.placement_count(), 1);
        assert!(s.anchor_room(1).is_none());
    }

    #[test]
    fn test_place_lecture_without_feasible_cell() {
        let mut s = Schedule::new(fixtures::tiny());
        let mut rng = create_rng(1);
        s.place(0, 0, Placement::new(0, 0));
        s.place(1, 0, Placement::new(1, 0));
        assert_eq!(place_lecture(&mut s, 0, PlacementMode::Random, &mut rng), None);
        assert_eq!(s.placement_count(), 2);
    }

    /// Cell `place_lecture` must pick in `MinSoftCost` mode, found by
    /// placing into a fresh copy for every feasible cell.
    fn cheapest_by_copy(schedule: &Schedule, course: usize) -> Option<(usize, usize)> {
        let mut best: Option<((usize, usize), usize)> = None;
        for (day, period) in feasible_slots(schedule, course) {
            let room = choose_room(schedule, course, day, period).unwrap();
            let mut trial = schedule.clone();
            trial.place(day, period, Placement::new(course, room));
            let cost = soft_violations(&trial);
            if best.is_none_or(|(_, c)| cost <= c) {
                best = Some(((day, period), cost));
            }
        }
        best.map(|(cell, _)| cell)
    }

    #[test]
    fn test_min_soft_cost_picks_cheapest_cell() {
        let problem = fixtures::toy();
        let mut s = Schedule::new(problem.clone());
        let mut rng = create_rng(11);
        for course in 0..problem.courses().len() {
            for _ in 0..problem.course(course).lectures {
                let expected = cheapest_by_copy(&s, course);
                let before = s.clone();
                let chosen = place_lecture(&mut s, course, PlacementMode::MinSoftCost, &mut rng);
                assert_eq!(chosen, expected, "course {course}");
                let Some((day, period)) = chosen else { break };
                assert_eq!(s.placement_count(), before.placement_count() + 1);
                assert!(s.slot(day, period).contains_course(course));
            }
        }
    }

    #[test]
    fn test_min_soft_cost_tie_goes_to_last_cell() {
        let s = Schedule::new(fixtures::tiny());
        let mut t = s.clone();
        let mut rng = create_rng(0);
        assert_eq!(cheapest_by_copy(&s, 0), Some((1, 0)));
        assert_eq!(
            place_lecture(&mut t, 0, PlacementMode::MinSoftCost, &mut rng),
            Some((1, 0))
        );
    }
}
