//! Saturation-degree constructive builder with bounded restarts.

use std::cmp::Reverse;
use std::sync::Arc;

use rand::Rng;

use super::config::BuilderConfig;
use super::feasibility::{place_lecture, saturation_degree, PlacementMode};
use crate::evaluator::{evaluate, Violations};
use crate::model::{Problem, Schedule};

/// Outcome of a construction.
#[derive(Debug, Clone)]
pub struct Construction {
    /// The built schedule. Complete unless `complete` is `false`.
    pub schedule: Schedule,

    /// Number of grid wipes performed.
    pub restarts: usize,

    /// Whether every lecture was placed.
    ///
    /// `false` means the restart cap was reached and `schedule` is the
    /// lowest-cost deadlocked partial schedule.
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Placing,
    Restarting,
}

/// Greedy builder placing the most constrained course first.
///
/// At each step every course with unplaced lectures is ranked by
/// saturation degree (ascending), then by student count (descending), then
/// by index. The head course gets one lecture. The first pass places
/// lectures where they add the least soft cost; once a course has no
/// feasible cell left, the grid is wiped and every later pass places
/// lectures at random feasible cells.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_timetable::construct::{BuilderConfig, ConstructiveBuilder};
/// use u_timetable::evaluator::hard_violations;
/// use u_timetable::model::{Course, Problem, Room};
/// use u_timetable::random::create_rng;
///
/// let problem = Arc::new(
///     Problem::builder("toy", 2, 1)
///         .course(Course::new("c1", "t1", 1, 1, 10))
///         .course(Course::new("c2", "t2", 1, 1, 10))
///         .room(Room::new("r1", 20))
///         .build()
///         .unwrap(),
/// );
/// let builder = ConstructiveBuilder::new(BuilderConfig::default());
/// let built = builder.build(&problem, &mut create_rng(42));
/// assert!(built.complete);
/// assert_eq!(hard_violations(&built.schedule), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstructiveBuilder {
    config: BuilderConfig,
}

impl ConstructiveBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Builds a schedule for `problem`.
    pub fn build<R: Rng>(&self, problem: &Arc<Problem>, rng: &mut R) -> Construction {
        let mut schedule = Schedule::new(Arc::clone(problem));
        let mut remaining: Vec<usize> = problem.courses().iter().map(|c| c.lectures).collect();
        let mut mode = PlacementMode::MinSoftCost;
        let mut phase = Phase::Placing;
        let mut restarts = 0;
        let mut best_partial: Option<(Violations, Schedule)> = None;

        loop {
            match phase {
                Phase::Placing => {
                    let Some(course) = next_course(&schedule, &remaining) else {
                        tracing::debug!(restarts, "construction complete");
                        return Construction {
                            schedule,
                            restarts,
                            complete: true,
                        };
                    };
                    if place_lecture(&mut schedule, course, mode, rng).is_some() {
                        remaining[course] -= 1;
                    } else {
                        phase = Phase::Restarting;
                    }
                }
                Phase::Restarting => {
                    let cost = evaluate(&schedule);
                    if best_partial.as_ref().is_none_or(|(best, _)| cost < *best) {
                        best_partial = Some((cost, schedule.clone()));
                    }
                    if restarts >= self.config.max_restarts {
                        tracing::warn!(
                            restarts,
                            "restart limit reached; returning best partial schedule"
                        );
                        let schedule = best_partial.map_or(schedule, |(_, s)| s);
                        return Construction {
                            schedule,
                            restarts,
                            complete: false,
                        };
                    }
                    restarts += 1;
                    tracing::debug!(restarts, placed = schedule.placement_count(), "deadlock, restarting");
                    schedule.clear();
                    for (left, course) in remaining.iter_mut().zip(problem.courses()) {
                        *left = course.lectures;
                    }
                    mode = PlacementMode::Random;
                    phase = Phase::Placing;
                }
            }
        }
    }
}

/// The pending course with the lowest saturation degree; ties go to the
/// larger course, then the lower index.
fn next_course(schedule: &Schedule, remaining: &[usize]) -> Option<usize> {
    let problem = schedule.problem();
    remaining
        .iter()
        .enumerate()
        .filter(|&(_, &left)| left > 0)
        .map(|(c, _)| {
            (
                saturation_degree(schedule, c),
                Reverse(problem.course(c).students),
                c,
            )
        })
        .min()
        .map(|(_, _, c)| c)
}
