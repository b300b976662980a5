//! Hyper-heuristic search.
//!
//! The selection loop keeps one current schedule and repeatedly asks a
//! [`HeuristicSelector`](crate::selection::HeuristicSelector) which
//! [`Perturbation`] to play on a copy of it. The acceptance policy decides
//! whether the copy replaces the current schedule, and the selector score
//! of the played perturbation moves up or down accordingly.
//!
//! [`Solver`] chains construction with one of three strategies:
//!
//! - [`Strategy::Selection`]: select among the low-level heuristics
//! - [`Strategy::Generation`]: evolve heuristic programs with GE
//! - [`Strategy::Hybrid`]: evolve programs, then select among the best
//!   distinct ones

mod config;
mod perturbation;
mod runner;
mod solver;

pub use config::{SearchConfig, SolverConfig, Strategy};
pub use perturbation::Perturbation;
pub use runner::{SearchResult, SearchRunner};
pub use solver::{SolveResult, Solver};
