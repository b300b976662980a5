//! Heuristic selection.
//!
//! [`HeuristicSelector`] is a greedy non-stationary bandit: it always plays
//! a highest-scoring arm and lets the caller move scores by ±1 after each
//! acceptance decision. Candidates are generic so the same selector
//! drives plain low-level heuristics and evolved heuristic programs.

mod selector;

pub use selector::{HeuristicSelector, ScoredCandidate};
