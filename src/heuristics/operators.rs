//! Schedule-mutating operators.
//!
//! Operators work in place on a schedule the caller has already cloned.
//! They never check hard constraints beyond what `single_move` needs to
//! pick a cell; the evaluator and the acceptance criterion filter the
//! results.

use rand::Rng;

use crate::construct::{place_lecture, PlacementMode};
use crate::model::Schedule;

/// Moves one random lecture to a random feasible cell.
///
/// Picks an occupied cell, removes one of its lectures and re-places the
/// course through the builder's feasibility test and room policy. When
/// no cell is feasible the lecture is put back where it was.
pub fn single_move<R: Rng>(schedule: &mut Schedule, rng: &mut R) {
    let occupied = schedule.occupied_cells();
    if occupied.is_empty() {
        return;
    }
    let (day, period) = occupied[rng.random_range(0..occupied.len())];
    let slot = schedule.slot_mut(day, period);
    let index = rng.random_range(0..slot.len());
    let removed = slot.remove(index);

    if place_lecture(schedule, removed.course, PlacementMode::Random, rng).is_none() {
        schedule.slot_mut(day, period).insert(index, removed);
    }
}

/// Exchanges the full contents of two random cells.
pub fn swap_slots<R: Rng>(schedule: &mut Schedule, rng: &mut R) {
    let Some((a, b)) = two_cells(schedule, rng) else {
        return;
    };
    schedule.swap_cells(a, b);
}

/// Exchanges or moves one lecture between two random cells.
///
/// Two occupied cells trade one random lecture each. If only one cell is
/// occupied, one of its lectures moves to the empty cell. Two empty cells
/// are left alone.
pub fn swap_lectures<R: Rng>(schedule: &mut Schedule, rng: &mut R) {
    let Some((a, b)) = two_cells(schedule, rng) else {
        return;
    };
    let len_a = schedule.slot(a.0, a.1).len();
    let len_b = schedule.slot(b.0, b.1).len();
    match (len_a, len_b) {
        (0, 0) => {}
        (0, _) => {
            let moved = schedule.slot_mut(b.0, b.1).remove(rng.random_range(0..len_b));
            schedule.slot_mut(a.0, a.1).push(moved);
        }
        (_, 0) => {
            let moved = schedule.slot_mut(a.0, a.1).remove(rng.random_range(0..len_a));
            schedule.slot_mut(b.0, b.1).push(moved);
        }
        _ => {
            let i = rng.random_range(0..len_a);
            let j = rng.random_range(0..len_b);
            let from_b = schedule.slot(b.0, b.1).placements()[j];
            let from_a = schedule.slot_mut(a.0, a.1).replace(i, from_b);
            schedule.slot_mut(b.0, b.1).replace(j, from_a);
        }
    }
}

/// Two uniformly drawn cells, or `None` when both draws hit the same cell.
fn two_cells<R: Rng>(
    schedule: &Schedule,
    rng: &mut R,
) -> Option<((usize, usize), (usize, usize))> {
    let cells = schedule.cell_count();
    if cells == 0 {
        return None;
    }
    let a = rng.random_range(0..cells);
    let b = rng.random_range(0..cells);
    (a != b).then(|| (schedule.cell_at(a), schedule.cell_at(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{fixtures, Placement};
    use crate::random::create_rng;

    fn seeded() -> Schedule {
        let mut s = Schedule::new(fixtures::toy());
        s.place(0, 0, Placement::new(0, 0));
        s.place(0, 0, Placement::new(3, 1));
        s.place(1, 2, Placement::new(1, 2));
        s.place(3, 1, Placement::new(2, 1));
        s
    }

    #[test]
    fn test_operators_preserve_lecture_total() {
        let mut rng = create_rng(11);
        let mut s = seeded();
        for _ in 0..200 {
            single_move(&mut s, &mut rng);
            swap_slots(&mut s, &mut rng);
            swap_lectures(&mut s, &mut rng);
            assert_eq!(s.placement_count(), 4);
        }
        assert_eq!(s.lecture_counts(), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_operators_on_empty_schedule_are_noops() {
        let mut rng = create_rng(0);
        let mut s = Schedule::new(fixtures::toy());
        single_move(&mut s, &mut rng);
        swap_slots(&mut s, &mut rng);
        swap_lectures(&mut s, &mut rng);
        assert_eq!(s.placement_count(), 0);
    }

    #[test]
    fn test_single_move_restores_when_nothing_is_feasible() {
        let mut rng = create_rng(5);
        let mut s = Schedule::new(fixtures::tiny());
        s.place(0, 0, Placement::new(0, 0));
        s.place(1, 0, Placement::new(1, 0));
        let before = s.to_string();
        single_move(&mut s, &mut rng);
        // each course can only return to its own cell
        assert_eq!(s.to_string(), before);
    }

    #[test]
    fn test_swap_lectures_moves_into_empty_cell() {
        let mut s = Schedule::new(fixtures::tiny());
        s.place(0, 0, Placement::new(0, 0));
        let mut rng = create_rng(0);
        // two cells only: every non-degenerate draw touches both
        for _ in 0..10 {
            swap_lectures(&mut s, &mut rng);
            assert_eq!(s.placement_count(), 1);
            assert_eq!(s.occupied_cells().len(), 1);
        }
    }

    #[test]
    fn test_swap_slots_keeps_cell_contents_together() {
        let mut s = seeded();
        let mut rng = create_rng(2);
        for _ in 0..20 {
            swap_slots(&mut s, &mut rng);
        }
        let mut sizes: Vec<usize> = s
            .cells()
            .map(|(_, _, slot)| slot.len())
            .filter(|&n| n > 0)
            .collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 1, 2]);
    }
}
