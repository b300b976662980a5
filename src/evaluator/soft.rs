//! Soft-constraint violation counts.
//!
//! Room-stability and working-day accounting follow the problem's
//! [`SoftPolicy`](super::SoftPolicy).

use super::policy::{RoomStabilityPolicy, WorkingDaysPolicy};
use crate::model::Schedule;

/// Per-constraint soft violation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftBreakdown {
    /// Placements whose course has more students than the room seats.
    pub room_capacity: usize,
    /// Room changes, as counted by the active room-stability policy.
    pub room_stability: usize,
    /// Working-day shortfalls, as counted by the active policy.
    pub min_working_days: usize,
    /// Later periods of a day lacking a curriculum-mate of a placed lecture.
    pub curriculum_compactness: usize,
}

impl SoftBreakdown {
    pub fn total(&self) -> usize {
        self.room_capacity + self.room_stability + self.min_working_days + self.curriculum_compactness
    }
}

/// Computes every soft-constraint count of a schedule.
pub fn soft_breakdown(schedule: &Schedule) -> SoftBreakdown {
    let policy = schedule.problem().soft_policy();
    SoftBreakdown {
        room_capacity: room_capacity_violations(schedule),
        room_stability: room_stability_violations(schedule, policy.room_stability),
        min_working_days: min_working_days_violations(schedule, policy.working_days),
        curriculum_compactness: curriculum_compactness_violations(schedule),
    }
}

/// Total number of soft-constraint violations.
pub fn soft_violations(schedule: &Schedule) -> usize {
    soft_breakdown(schedule).total()
}

/// One violation per placement whose room is too small.
pub fn room_capacity_violations(schedule: &Schedule) -> usize {
    let problem = schedule.problem();
    schedule
        .cells()
        .flat_map(|(_, _, slot)| slot.iter())
        .filter(|p| problem.course(p.course).students > problem.room(p.room).capacity)
        .count()
}

pub fn room_stability_violations(schedule: &Schedule, policy: RoomStabilityPolicy) -> usize {
    let problem = schedule.problem();
    let n_courses = problem.courses().len();
    match policy {
        RoomStabilityPolicy::FirstRoom => {
            let mut first: Vec<Option<usize>> = vec![None; n_courses];
            let mut count = 0;
            for p in schedule.cells().flat_map(|(_, _, slot)| slot.iter()) {
                match first[p.course] {
                    None => first[p.course] = Some(p.room),
                    Some(room) if room != p.room => count += 1,
                    Some(_) => {}
                }
            }
            count
        }
        RoomStabilityPolicy::MostCommonRoom => {
            let n_rooms = problem.rooms().len();
            let mut uses = vec![0usize; n_courses * n_rooms];
            for p in schedule.cells().flat_map(|(_, _, slot)| slot.iter()) {
                uses[p.course * n_rooms + p.room] += 1;
            }
            (0..n_courses)
                .map(|c| {
                    let most = uses[c * n_rooms..(c + 1) * n_rooms]
                        .iter()
                        .copied()
                        .max()
                        .unwrap_or(0);
                    problem.course(c).lectures.saturating_sub(most)
                })
                .sum()
        }
    }
}

pub fn min_working_days_violations(schedule: &Schedule, policy: WorkingDaysPolicy) -> usize {
    let problem = schedule.problem();
    let n_courses = problem.courses().len();
    match policy {
        WorkingDaysPolicy::DaySpan => {
            let mut span: Vec<Option<(usize, usize)>> = vec![None; n_courses];
            for (day, _, slot) in schedule.cells() {
                for p in slot.iter() {
                    span[p.course] = Some(match span[p.course] {
                        None => (day, day),
                        Some((first, last)) => (first.min(day), last.max(day)),
                    });
                }
            }
            span.iter()
                .enumerate()
                .filter(|&(c, s)| {
                    let days = s.map_or(0, |(first, last)| last - first + 1);
                    days < problem.course(c).min_working_days
                })
                .count()
        }
        WorkingDaysPolicy::PairGap => {
            let mut days_of: Vec<Vec<usize>> = vec![Vec::new(); n_courses];
            for (day, _, slot) in schedule.cells() {
                for p in slot.iter() {
                    days_of[p.course].push(day);
                }
            }
            let mut count = 0;
            for (c, days) in days_of.iter().enumerate() {
                let min_gap = problem.course(c).min_working_days.saturating_sub(1);
                for (i, &x) in days.iter().enumerate() {
                    count += days[i + 1..]
                        .iter()
                        .filter(|&&a| a > x && a - x < min_gap)
                        .count();
                }
            }
            count
        }
    }
}

/// For each placed lecture, counts the later periods of the same day that
/// hold no course sharing a curriculum with it.
pub fn curriculum_compactness_violations(schedule: &Schedule) -> usize {
    let problem = schedule.problem();
    let periods = schedule.periods_per_day();
    let mut count = 0;
    for (day, period, slot) in schedule.cells() {
        for p in slot.iter() {
            count += (period + 1..periods)
                .filter(|&later| {
                    !schedule
                        .slot(day, later)
                        .iter()
                        .any(|o| problem.shares_curriculum(p.course, o.course))
                })
                .count();
        }
    }
    count
}
