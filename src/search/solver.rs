//! Strategy-level entry point: construct, then search.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;

use super::config::{SolverConfig, Strategy};
use super::runner::{improve_with, SearchResult};
use crate::construct::ConstructiveBuilder;
use crate::error::{Error, Result};
use crate::evaluator::{evaluate, Violations};
use crate::ge::{GeResult, GeRunner, Grammar, HeuristicProgram};
use crate::heuristics::LowLevelHeuristic;
use crate::model::{Problem, Schedule};
use crate::random::rng_from;

/// Outcome of [`Solver::solve`].
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub strategy: Strategy,

    /// Best schedule found by any stage.
    pub best: Schedule,

    /// Cost of `best`.
    pub best_violations: Violations,

    /// Cost of the constructed schedule.
    pub initial_violations: Violations,

    /// Builder restarts before the initial schedule.
    pub restarts: usize,

    /// Whether construction placed every lecture.
    pub construction_complete: bool,

    /// Best evolved program (`Generation` and `Hybrid`).
    pub best_program: Option<HeuristicProgram>,

    /// GE statistics (`Generation` and `Hybrid`).
    pub evolution: Option<GeResult>,

    /// Selection-loop statistics over the low-level heuristics (`Selection`).
    pub selection: Option<SearchResult<LowLevelHeuristic>>,

    /// Selection-loop statistics over evolved programs (`Hybrid`).
    pub hybrid: Option<SearchResult<HeuristicProgram>>,

    /// Wall-clock time of the whole solve.
    pub elapsed: Duration,
}

/// Runs one of the [`Strategy`] pipelines on a problem.
///
/// One seed drives the whole pipeline: `search.seed` seeds construction
/// and the selection loop, and GE is seeded from the same stream unless
/// `ge.seed` is set.
///
/// # Usage
///
/// ```
/// use u_timetable::ge::GeConfig;
/// use u_timetable::model::parse_ctt;
/// use u_timetable::search::{SearchConfig, Solver, SolverConfig, Strategy};
/// use std::sync::Arc;
///
/// let text = "\
/// Name: Demo
/// Courses: 2
/// Rooms: 1
/// Days: 2
/// Periods_per_day: 2
/// Curricula: 1
/// Constraints: 0
///
/// COURSES:
/// c1 t1 2 2 20
/// c2 t2 1 1 20
///
/// ROOMS:
/// r1 30
///
/// CURRICULA:
/// q1 2 c1 c2
///
/// UNAVAILABILITY_CONSTRAINTS:
///
/// END.
/// ";
/// let problem = Arc::new(parse_ctt(text).unwrap());
/// let config = SolverConfig::new(Strategy::Hybrid)
///     .with_search(SearchConfig::default().with_max_iterations(200).with_seed(5))
///     .with_ge(GeConfig::default().with_max_generations(5));
/// let result = Solver::solve(&problem, &config).unwrap();
/// assert!(result.best_violations <= result.initial_violations);
/// assert!(result.best_program.is_some());
/// ```
pub struct Solver;

impl Solver {
    /// Solves `problem` with the configured strategy.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `config` is invalid and
    /// [`Error::Grammar`] if a custom grammar does not parse.
    pub fn solve(problem: &Arc<Problem>, config: &SolverConfig) -> Result<SolveResult> {
        Self::solve_with_cancel(problem, config, None)
    }

    /// Like [`solve`](Self::solve) with a cancellation flag shared by every
    /// stage.
    pub fn solve_with_cancel(
        problem: &Arc<Problem>,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveResult> {
        config.validate().map_err(Error::Config)?;
        let grammar = match &config.grammar {
            Some(bnf) => Grammar::parse(bnf)?,
            None => Grammar::default(),
        };

        let start = Instant::now();
        let mut rng = rng_from(config.search.seed);
        let construction =
            ConstructiveBuilder::new(config.search.builder.clone()).build(problem, &mut rng);
        let initial = construction.schedule;
        let initial_violations = evaluate(&initial);
        tracing::debug!(
            restarts = construction.restarts,
            complete = construction.complete,
            cost = %initial_violations,
            "initial schedule built"
        );

        let mut result = SolveResult {
            strategy: config.strategy,
            best: initial.clone(),
            best_violations: initial_violations,
            initial_violations,
            restarts: construction.restarts,
            construction_complete: construction.complete,
            best_program: None,
            evolution: None,
            selection: None,
            hybrid: None,
            elapsed: Duration::ZERO,
        };

        match config.strategy {
            Strategy::Selection => {
                let search = improve_with(
                    initial,
                    LowLevelHeuristic::ALL.to_vec(),
                    &config.search,
                    cancel.as_deref(),
                    &mut rng,
                    Instant::now(),
                )?;
                result.offer(&search.best, search.best_violations);
                result.selection = Some(search);
            }
            Strategy::Generation | Strategy::Hybrid => {
                let mut ge_config = config.ge.clone();
                if ge_config.seed.is_none() {
                    ge_config.seed = Some(rng.random());
                }
                let evolution = GeRunner::run_with_cancel(&initial, &grammar, &ge_config, cancel.clone())?;
                if let Some(schedule) = &evolution.best.schedule {
                    result.offer(schedule, evolution.best_violations);
                }
                result.best_program = evolution.best_program().cloned();

                if config.strategy == Strategy::Hybrid {
                    let mut programs = evolution.top_programs(config.hybrid_programs);
                    if programs.is_empty() {
                        programs = single_call_programs(config);
                    }
                    let search = improve_with(
                        result.best.clone(),
                        programs,
                        &config.search,
                        cancel.as_deref(),
                        &mut rng,
                        Instant::now(),
                    )?;
                    result.offer(&search.best, search.best_violations);
                    result.hybrid = Some(search);
                }
                result.evolution = Some(evolution);
            }
        }

        result.elapsed = start.elapsed();
        tracing::info!(
            strategy = ?config.strategy,
            initial = %result.initial_violations,
            best = %result.best_violations,
            program = %result
                .best_program
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            elapsed_ms = result.elapsed.as_millis() as u64,
            "solve finished"
        );
        Ok(result)
    }
}

impl SolveResult {
    /// Keeps `schedule` if it beats the current best.
    fn offer(&mut self, schedule: &Schedule, cost: Violations) {
        if cost < self.best_violations {
            self.best = schedule.clone();
            self.best_violations = cost;
        }
    }
}

/// One program per low-level heuristic, for when GE yields no valid program.
fn single_call_programs(config: &SolverConfig) -> Vec<HeuristicProgram> {
    LowLevelHeuristic::ALL
        .iter()
        .map(|&h| HeuristicProgram::new(config.search.acceptance, vec![h]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ge::GeConfig;
    use crate::model::fixtures;
    use crate::search::SearchConfig;

    fn config(strategy: Strategy) -> SolverConfig {
        SolverConfig::new(strategy)
            .with_search(SearchConfig::default().with_max_iterations(300).with_seed(21))
            .with_ge(GeConfig::default().with_max_generations(8))
    }

    #[test]
    fn test_every_strategy_improves_or_keeps_initial() {
        for strategy in [Strategy::Selection, Strategy::Generation, Strategy::Hybrid] {
            let result = Solver::solve(&fixtures::toy(), &config(strategy)).unwrap();
            assert_eq!(result.strategy, strategy);
            assert!(result.best_violations <= result.initial_violations, "{strategy:?}");
            assert_eq!(evaluate(&result.best), result.best_violations, "{strategy:?}");
        }
    }

    #[test]
    fn test_stage_results_match_strategy() {
        let selection = Solver::solve(&fixtures::toy(), &config(Strategy::Selection)).unwrap();
        assert!(selection.selection.is_some());
        assert!(selection.evolution.is_none() && selection.hybrid.is_none());
        assert!(selection.best_program.is_none());

        let generation = Solver::solve(&fixtures::toy(), &config(Strategy::Generation)).unwrap();
        assert!(generation.evolution.is_some());
        assert!(generation.selection.is_none() && generation.hybrid.is_none());

        let hybrid = Solver::solve(&fixtures::toy(), &config(Strategy::Hybrid)).unwrap();
        let search = hybrid.hybrid.as_ref().unwrap();
        assert!(!search.scores.is_empty() && search.scores.len() <= 5);
        assert!(hybrid.best_violations <= search.best_violations);
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = Solver::solve(&fixtures::toy(), &config(Strategy::Hybrid)).unwrap();
        let b = Solver::solve(&fixtures::toy(), &config(Strategy::Hybrid)).unwrap();
        assert_eq!(a.best_violations, b.best_violations);
        assert_eq!(a.best.to_string(), b.best.to_string());
        assert_eq!(a.best_program, b.best_program);
    }

    #[test]
    fn test_bad_grammar_and_config() {
        let bad_grammar = config(Strategy::Generation).with_grammar("<start> ::= <missing>");
        assert!(matches!(
            Solver::solve(&fixtures::toy(), &bad_grammar),
            Err(Error::Grammar(_))
        ));

        let bad_config = config(Strategy::Hybrid).with_hybrid_programs(0);
        assert!(matches!(
            Solver::solve(&fixtures::toy(), &bad_config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_custom_grammar_restricts_programs() {
        let bnf = "<start> ::= AI <h>\n<h> ::= swap_slots() | swap_slots() <h>";
        let result = Solver::solve(&fixtures::toy(), &config(Strategy::Generation).with_grammar(bnf))
            .unwrap();
        if let Some(program) = &result.best_program {
            assert_eq!(program.acceptance, crate::acceptance::AcceptanceKind::Improving);
            assert!(program.calls.iter().all(|&c| c == LowLevelHeuristic::SwapSlots));
        }
    }
}
