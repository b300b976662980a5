//! GE configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::acceptance::ThresholdConfig;

/// Configuration for grammatical evolution of heuristic programs.
///
/// # Examples
///
/// ```
/// use u_timetable::ge::GeConfig;
///
/// let config = GeConfig::default()
///     .with_population_size(30)
///     .with_max_generations(100)
///     .with_codon_range(20, 80)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeConfig {
    /// Number of chromosomes kept after each generation.
    pub population_size: usize,

    /// Chromosomes sampled (without replacement) per tournament.
    pub tournament_size: usize,

    /// Generation budget.
    pub max_generations: usize,

    /// Probability of one-point crossover for a parent pair (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability that a child has one codon overwritten (0.0–1.0).
    pub mutation_rate: f64,

    /// Shortest random genotype, also the shortest wrap extension.
    pub min_codons: usize,

    /// Longest random genotype, also the longest wrap extension.
    pub max_codons: usize,

    /// Non-terminal expansions allowed per derivation.
    ///
    /// Chromosomes needing more are scored [`Violations::WORST`](crate::evaluator::Violations::WORST).
    pub max_derivation_steps: usize,

    /// Parameters of `ILTA` when an evolved program selects it.
    pub thresholds: ThresholdConfig,

    /// Whether to develop offspring in parallel with rayon.
    ///
    /// Only honoured when the crate is built with the `parallel` feature.
    /// Results for a fixed seed are the same either way.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked at the start of
    /// each generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for GeConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            tournament_size: 3,
            max_generations: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            min_codons: 10,
            max_codons: 50,
            max_derivation_steps: 1_000,
            thresholds: ThresholdConfig::default(),
            parallel: false,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GeConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate, clamped to [0, 1].
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the genotype length bounds (inclusive).
    pub fn with_codon_range(mut self, min: usize, max: usize) -> Self {
        self.min_codons = min;
        self.max_codons = max;
        self
    }

    pub fn with_max_derivation_steps(mut self, n: usize) -> Self {
        self.max_derivation_steps = n;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err("tournament_size must be between 1 and population_size".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.min_codons == 0 || self.min_codons > self.max_codons {
            return Err("codon range must satisfy 1 <= min_codons <= max_codons".into());
        }
        if self.max_derivation_steps == 0 {
            return Err("max_derivation_steps must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}
