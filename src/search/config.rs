//! Search and solver configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::acceptance::{AcceptanceKind, ThresholdConfig};
use crate::construct::BuilderConfig;
use crate::ge::GeConfig;

/// Configuration for the selection hyper-heuristic loop.
///
/// # Examples
///
/// ```
/// use u_timetable::acceptance::AcceptanceKind;
/// use u_timetable::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_iterations(2_000)
///     .with_acceptance(AcceptanceKind::EqualOrImproving)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Perturbation budget.
    pub max_iterations: usize,

    /// Acceptance policy of the loop.
    pub acceptance: AcceptanceKind,

    /// ILTA parameters, used when `acceptance` is ILTA.
    pub thresholds: ThresholdConfig,

    /// Construction of the initial schedule.
    pub builder: BuilderConfig,

    /// Best cost is recorded every this many iterations.
    pub history_interval: usize,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked every iteration.
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            acceptance: AcceptanceKind::IteratedLimitedThreshold,
            thresholds: ThresholdConfig::default(),
            builder: BuilderConfig::default(),
            history_interval: 100,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl SearchConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_acceptance(mut self, kind: AcceptanceKind) -> Self {
        self.acceptance = kind;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_builder(mut self, builder: BuilderConfig) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
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
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if self.history_interval == 0 {
            return Err("history_interval must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        self.builder.validate()
    }
}

/// How the [`Solver`](super::Solver) combines the search components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Build, then run the selection loop over the low-level heuristics.
    #[default]
    Selection,

    /// Build, then evolve heuristic programs with GE from the built
    /// schedule.
    Generation,

    /// Build, evolve programs, then run the selection loop with the best
    /// distinct evolved programs as its candidates.
    Hybrid,
}

/// Configuration for the [`Solver`](super::Solver).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    pub strategy: Strategy,

    /// Construction and selection-loop settings.
    pub search: SearchConfig,

    /// Evolution settings, used by `Generation` and `Hybrid`.
    pub ge: GeConfig,

    /// BNF text of the program grammar; `None` uses
    /// [`DEFAULT_GRAMMAR`](crate::ge::DEFAULT_GRAMMAR).
    pub grammar: Option<String>,

    /// Evolved programs handed to the selection loop by `Hybrid`.
    pub hybrid_programs: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            search: SearchConfig::default(),
            ge: GeConfig::default(),
            grammar: None,
            hybrid_programs: 5,
        }
    }
}

impl SolverConfig {
    /// Default settings with the given strategy.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_ge(mut self, ge: GeConfig) -> Self {
        self.ge = ge;
        self
    }

    pub fn with_grammar(mut self, bnf: impl Into<String>) -> Self {
        self.grammar = Some(bnf.into());
        self
    }

    pub fn with_hybrid_programs(mut self, k: usize) -> Self {
        self.hybrid_programs = k;
        self
    }

    /// Validates the configurations of every component the strategy runs.
    pub fn validate(&self) -> Result<(), String> {
        self.search.validate()?;
        if matches!(self.strategy, Strategy::Generation | Strategy::Hybrid) {
            self.ge.validate()?;
        }
        if self.strategy == Strategy::Hybrid && self.hybrid_programs == 0 {
            return Err("hybrid_programs must be at least 1".into());
        }
        Ok(())
    }
}
