//! Curriculum-based course timetabling by hyper-heuristic search.
//!
//! Assigns every lecture of every course to a (day, period, room) cell so
//! that hard constraints hold and soft-constraint cost is low. The crate
//! does not search schedules directly with a fixed metaheuristic; it
//! searches over *heuristics*:
//!
//! - **Model**: courses, rooms, curricula, unavailability, and the
//!   day × period grid of a [`Schedule`](model::Schedule); ITC-2007 `.ctt`
//!   loading.
//! - **Evaluator**: hard and soft violation counts, compared
//!   lexicographically as [`Violations`](evaluator::Violations).
//! - **Construct**: saturation-degree greedy builder with bounded restarts.
//! - **Heuristics**: the low-level moves `single_move`, `swap_slots` and
//!   `swap_lectures`.
//! - **Acceptance**: improving, equal-or-improving, and iterated limited
//!   threshold acceptance.
//! - **Selection**: greedy score-based choice among perturbations.
//! - **GE**: grammatical evolution of heuristic programs (an acceptance
//!   policy plus a sequence of moves).
//! - **Search**: the selection loop and the [`Solver`](search::Solver)
//!   that chains construction with selection, evolution, or both.
//!
//! # Architecture
//!
//! Everything is synchronous computation on owned schedules. The
//! [`Problem`](model::Problem) is read-only after loading and shared
//! through `Arc`; every evaluation works on its own `Schedule` clone, so the
//! optional `parallel` feature can fan GE evaluation out with rayon without
//! locks. All randomness flows from one seed per run.

pub mod acceptance;
pub mod construct;
pub mod error;
pub mod evaluator;
pub mod ge;
pub mod heuristics;
pub mod model;
pub mod random;
pub mod search;
pub mod selection;

pub use error::{Error, Result};
