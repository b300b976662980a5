//! Grammatical evolution of heuristic programs.
//!
//! Instead of evolving schedules, GE evolves *programs*: an acceptance
//! policy plus a sequence of low-level heuristic calls. A genotype is a
//! sequence of codons in `[0, 256)`; the [`Mapper`] turns it into a
//! phenotype string by a leftmost derivation over a [`Grammar`], and the
//! phenotype parses into a [`HeuristicProgram`].
//!
//! # Key Types
//!
//! - [`Grammar`]: BNF production table; [`DEFAULT_GRAMMAR`] is the
//!   heuristic-program language
//! - [`Mapper`]: bounded derivation with wrap-by-extension
//! - [`Chromosome`]: genotype, phenotype, program, cost and retained schedule
//! - [`GeConfig`] / [`GeRunner`] / [`GeResult`]: the generational loop
//!
//! # References
//!
//! - O'Neill & Ryan (2001), "Grammatical Evolution"
//! - Sabar, Ayob, Kendall & Qu (2013), "Grammatical Evolution
//!   Hyper-Heuristic for Combinatorial Optimization Problems"

mod chromosome;
mod config;
mod grammar;
mod mapper;
pub mod operators;
mod program;
mod runner;

pub use chromosome::{random_codons, Chromosome};
pub use config::GeConfig;
pub use grammar::{Grammar, GrammarError, Symbol, DEFAULT_GRAMMAR};
pub use mapper::{Derivation, Mapper, MappingError};
pub use program::{HeuristicProgram, ProgramParseError};
pub use runner::{GeResult, GeRunner};
