//! GE generational loop.
//!
//! [`GeRunner`] evolves codon genotypes whose phenotypes are heuristic
//! programs: initialization → develop → tournament → crossover → mutation
//! → develop offspring → sort and truncate → repeat.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::chromosome::Chromosome;
use super::config::GeConfig;
use super::grammar::Grammar;
use super::mapper::Mapper;
use super::operators::{one_point_crossover, point_mutation, tournament};
use super::program::HeuristicProgram;
use crate::acceptance::ThresholdConfig;
use crate::error::{Error, Result};
use crate::evaluator::Violations;
use crate::model::Schedule;
use crate::random::{child_seeds, create_rng, rng_from};

/// Result of a GE run.
#[derive(Debug, Clone)]
pub struct GeResult {
    /// The best chromosome seen during the run.
    pub best: Chromosome,

    /// Cost of `best` (same as `best.violations`).
    pub best_violations: Violations,

    /// Generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped on its time limit.
    pub timed_out: bool,

    /// Best cost after initialization and after every generation.
    pub history: Vec<Violations>,

    /// Final population, best first.
    pub population: Vec<Chromosome>,

    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl GeResult {
    /// Program of the best chromosome, if it decoded to one.
    pub fn best_program(&self) -> Option<&HeuristicProgram> {
        self.best.program.as_ref()
    }

    /// Up to `k` distinct programs from the final population, best first.
    pub fn top_programs(&self, k: usize) -> Vec<HeuristicProgram> {
        let mut programs: Vec<HeuristicProgram> = Vec::with_capacity(k);
        for program in self.population.iter().filter_map(|c| c.program.as_ref()) {
            if programs.len() == k {
                break;
            }
            if !programs.contains(program) {
                programs.push(program.clone());
            }
        }
        programs
    }
}

/// Executes grammatical evolution of heuristic programs.
///
/// Fitness of a chromosome is the cost of the schedule its program
/// retains when run once against a baseline. Fresh chromosomes use the run
/// baseline; offspring use the schedule retained by their first parent.
///
/// # Usage
///
/// ```
/// use u_timetable::construct::ConstructiveBuilder;
/// use u_timetable::ge::{GeConfig, GeRunner, Grammar};
/// use u_timetable::model::{Course, Problem, Room};
/// use u_timetable::random::create_rng;
/// use std::sync::Arc;
///
/// let problem = Arc::new(
///     Problem::builder("toy", 2, 2)
///         .course(Course::new("c1", "t1", 2, 2, 10))
///         .course(Course::new("c2", "t2", 1, 1, 30))
///         .room(Room::new("r1", 20))
///         .room(Room::new("r2", 40))
///         .build()
///         .unwrap(),
/// );
/// let baseline = ConstructiveBuilder::default()
///     .build(&problem, &mut create_rng(1))
///     .schedule;
/// let config = GeConfig::default().with_max_generations(5).with_seed(1);
/// let result = GeRunner::run(&baseline, &Grammar::default(), &config).unwrap();
/// assert!(result.best_violations <= result.history[0]);
/// ```
pub struct GeRunner;

impl GeRunner {
    /// Runs GE from `baseline`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `config` is invalid.
    pub fn run(baseline: &Schedule, grammar: &Grammar, config: &GeConfig) -> Result<GeResult> {
        Self::run_with_cancel(baseline, grammar, config, None)
    }

    /// Runs GE with an optional cancellation flag, checked once per
    /// generation.
    pub fn run_with_cancel(
        baseline: &Schedule,
        grammar: &Grammar,
        config: &GeConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GeResult> {
        config.validate().map_err(Error::Config)?;
        let start = Instant::now();
        let mut rng = rng_from(config.seed);
        let mapper = Mapper::new(
            grammar,
            config.max_derivation_steps,
            config.min_codons,
            config.max_codons,
        );
        let develop = |jobs: Vec<(Chromosome, &Schedule)>, rng: &mut StdRng| {
            develop_all(jobs, &mapper, &config.thresholds, config.parallel, rng)
        };

        // 1. Initial population against the run baseline
        let fresh: Vec<(Chromosome, &Schedule)> = (0..config.population_size)
            .map(|_| {
                (
                    Chromosome::random(config.min_codons, config.max_codons, &mut rng),
                    baseline,
                )
            })
            .collect();
        let mut population = develop(fresh, &mut rng);
        population.sort_by_key(|c| c.violations);

        let mut best = population[0].clone();
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(best.violations);

        let mut generations = 0;
        let mut cancelled = false;
        let mut timed_out = false;

        // 2. Generational loop
        for generation in 0..config.max_generations {
            if best.violations.is_zero() {
                break;
            }
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
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

            let first = tournament(&population, config.tournament_size, &mut rng);
            let second = tournament(&population, config.tournament_size, &mut rng);
            let mut a = population[first].codons.clone();
            let mut b = population[second].codons.clone();

            if rng.random_bool(config.crossover_rate) {
                one_point_crossover(&mut a, &mut b, &mut rng);
            }
            for child in [&mut a, &mut b] {
                if rng.random_bool(config.mutation_rate) {
                    point_mutation(child, &mut rng);
                }
            }

            let jobs = vec![
                (Chromosome::new(a), retained(&population[first], baseline)),
                (Chromosome::new(b), retained(&population[second], baseline)),
            ];
            let children = develop(jobs, &mut rng);

            population.extend(children);
            population.sort_by_key(|c| c.violations);
            population.truncate(config.population_size);

            if population[0].violations < best.violations {
                best = population[0].clone();
                tracing::debug!(
                    generation,
                    best = %best.violations,
                    program = %best.phenotype,
                    "new best program"
                );
            }
            history.push(best.violations);
            generations = generation + 1;
        }

        let elapsed = start.elapsed();
        tracing::info!(
            generations,
            best = %best.violations,
            program = %best.phenotype,
            elapsed_ms = elapsed.as_millis() as u64,
            "grammatical evolution finished"
        );

        Ok(GeResult {
            best_violations: best.violations,
            best,
            generations,
            cancelled,
            timed_out,
            history,
            population,
            elapsed,
        })
    }
}

/// Baseline an offspring of `parent` is evaluated against.
fn retained<'a>(parent: &'a Chromosome, baseline: &'a Schedule) -> &'a Schedule {
    parent.schedule.as_ref().unwrap_or(baseline)
}

/// Develops every chromosome against its baseline, one child seed each,
/// preserving order.
fn develop_all(
    jobs: Vec<(Chromosome, &Schedule)>,
    mapper: &Mapper<'_>,
    thresholds: &ThresholdConfig,
    parallel: bool,
    rng: &mut StdRng,
) -> Vec<Chromosome> {
    let seeds = child_seeds(rng, jobs.len());

    #[cfg(feature = "parallel")]
    if parallel {
        return jobs
            .into_par_iter()
            .zip(seeds)
            .map(|((chromosome, baseline), seed)| {
                develop_one(chromosome, baseline, seed, mapper, thresholds)
            })
            .collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    jobs.into_iter()
        .zip(seeds)
        .map(|((chromosome, baseline), seed)| {
            develop_one(chromosome, baseline, seed, mapper, thresholds)
        })
        .collect()
}

fn develop_one(
    mut chromosome: Chromosome,
    baseline: &Schedule,
    seed: u64,
    mapper: &Mapper<'_>,
    thresholds: &ThresholdConfig,
) -> Chromosome {
    chromosome.develop(mapper, baseline, thresholds, &mut create_rng(seed));
    chromosome
}
