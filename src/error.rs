//! Crate-level error type.
//!
//! Only loading and configuration problems are user-visible. Deadlocks in
//! construction are recovered by the builder's restart policy, and the
//! search loops return their best-so-far result instead of failing on
//! budget exhaustion.

use crate::ge::GrammarError;
use crate::model::LoadError;

/// Errors returned by the public entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The problem instance could not be read or parsed.
    #[error("failed to load problem instance: {0}")]
    Load(#[from] LoadError),

    /// A grammar definition is malformed.
    #[error("invalid grammar: {0}")]
    Grammar(#[from] GrammarError),

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A heuristic selector was built without candidates.
    #[error("heuristic selector requires at least one candidate")]
    EmptyCandidateSet,
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
