//! Selection hyper-heuristic loop.
//!
//! [`SearchRunner`] repeats select → perturb a copy → evaluate → accept
//! on a single current schedule, scoring each perturbation by whether its
//! moves are accepted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;

use super::config::SearchConfig;
use super::perturbation::Perturbation;
use crate::acceptance::{Acceptance, MoveAcceptance};
use crate::construct::ConstructiveBuilder;
use crate::error::{Error, Result};
use crate::evaluator::{evaluate, Violations};
use crate::heuristics::LowLevelHeuristic;
use crate::model::{Problem, Schedule};
use crate::random::rng_from;
use crate::selection::{HeuristicSelector, ScoredCandidate};

/// Result of a selection run.
#[derive(Debug, Clone)]
pub struct SearchResult<P> {
    /// Lowest-cost schedule seen during the run.
    pub best: Schedule,

    /// Cost of `best`.
    pub best_violations: Violations,

    /// Cost of the starting schedule.
    pub initial_violations: Violations,

    /// Perturbations played.
    pub iterations: usize,

    /// Perturbations whose result became the current schedule.
    pub accepted: usize,

    /// Accepted moves that also improved on the best cost.
    pub improvements: usize,

    /// Candidates with their final selector scores, in input order.
    pub scores: Vec<ScoredCandidate<P>>,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped on its time limit.
    pub timed_out: bool,

    /// Best cost at the start, every `history_interval` iterations, and at
    /// the end.
    pub cost_history: Vec<Violations>,

    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// Executes the selection hyper-heuristic.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_timetable::model::{Course, Problem, Room};
/// use u_timetable::search::{SearchConfig, SearchRunner};
///
/// let problem = Arc::new(
///     Problem::builder("toy", 2, 2)
///         .course(Course::new("c1", "t1", 2, 2, 10))
///         .course(Course::new("c2", "t1", 1, 1, 30))
///         .room(Room::new("r1", 40))
///         .build()
///         .unwrap(),
/// );
/// let config = SearchConfig::default().with_max_iterations(500).with_seed(42);
/// let result = SearchRunner::run(&problem, &config).unwrap();
/// assert!(result.best_violations.is_feasible());
/// assert!(result.best_violations <= result.initial_violations);
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Builds an initial schedule and improves it with the low-level
    /// heuristics.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `config` is invalid.
    pub fn run(
        problem: &Arc<Problem>,
        config: &SearchConfig,
    ) -> Result<SearchResult<LowLevelHeuristic>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Like [`run`](Self::run) with an optional cancellation flag, checked
    /// once per iteration.
    pub fn run_with_cancel(
        problem: &Arc<Problem>,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<LowLevelHeuristic>> {
        config.validate().map_err(Error::Config)?;
        let start = Instant::now();
        let mut rng = rng_from(config.seed);

        let construction = ConstructiveBuilder::new(config.builder.clone()).build(problem, &mut rng);
        tracing::debug!(
            restarts = construction.restarts,
            complete = construction.complete,
            "initial schedule built"
        );

        improve_with(
            construction.schedule,
            LowLevelHeuristic::ALL.to_vec(),
            config,
            cancel.as_deref(),
            &mut rng,
            start,
        )
    }

    /// Improves `initial` by selecting among `candidates`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `config` is invalid and
    /// [`Error::EmptyCandidateSet`] if `candidates` is empty.
    pub fn improve<P: Perturbation>(
        initial: Schedule,
        candidates: Vec<P>,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<P>> {
        config.validate().map_err(Error::Config)?;
        let start = Instant::now();
        let mut rng = rng_from(config.seed);
        improve_with(initial, candidates, config, cancel.as_deref(), &mut rng, start)
    }
}

/// The selection loop proper. `config` must already be valid.
pub(crate) fn improve_with<P: Perturbation, R: Rng>(
    initial: Schedule,
    candidates: Vec<P>,
    config: &SearchConfig,
    cancel: Option<&AtomicBool>,
    rng: &mut R,
    start: Instant,
) -> Result<SearchResult<P>> {
    let mut selector = HeuristicSelector::new(candidates)?;
    let mut acceptance = Acceptance::new(config.acceptance, &config.thresholds);

    let mut current_cost = evaluate(&initial);
    let initial_violations = current_cost;
    let mut best = initial.clone();
    let mut best_cost = current_cost;
    let mut current = initial;

    let mut cost_history = Vec::with_capacity(config.max_iterations / config.history_interval + 2);
    cost_history.push(best_cost);

    let mut iterations = 0;
    let mut accepted = 0;
    let mut improvements = 0;
    let mut cancelled = false;
    let mut timed_out = false;

    for iteration in 0..config.max_iterations {
        if best_cost.is_zero() {
            break;
        }
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            cancelled = true;
            break;
        }
        if config
            .time_limit_ms
            .is_some_and(|ms| start.elapsed() >= Duration::from_millis(ms))
        {
            timed_out = true;
            break;
        }

        let index = selector.select(rng);
        let mut candidate = current.clone();
        selector.candidate(index).perturb(&mut candidate, rng);
        let candidate_cost = evaluate(&candidate);

        if acceptance.accept(current_cost, candidate_cost) {
            selector.reward(index);
            accepted += 1;
            current = candidate;
            current_cost = candidate_cost;

            if current_cost < best_cost {
                best = current.clone();
                best_cost = current_cost;
                improvements += 1;
                tracing::debug!(
                    iteration,
                    best = %best_cost,
                    perturbation = %selector.candidate(index),
                    "new best schedule"
                );
            }
        } else {
            selector.penalize(index);
        }

        iterations = iteration + 1;
        if iterations % config.history_interval == 0 {
            cost_history.push(best_cost);
        }
    }

    if cost_history.last() != Some(&best_cost) {
        cost_history.push(best_cost);
    }

    let elapsed = start.elapsed();
    tracing::info!(
        iterations,
        accepted,
        improvements,
        initial = %initial_violations,
        best = %best_cost,
        acceptance = acceptance.name(),
        elapsed_ms = elapsed.as_millis() as u64,
        "selection search finished"
    );

    Ok(SearchResult {
        best,
        best_violations: best_cost,
        initial_violations,
        iterations,
        accepted,
        improvements,
        scores: selector.into_candidates(),
        cancelled,
        timed_out,
        cost_history,
        elapsed,
    })
}
