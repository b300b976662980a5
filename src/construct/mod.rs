//! Initial schedule construction.
//!
//! A greedy saturation-degree builder: the course with the fewest feasible
//! cells is placed next. A deadlock (a pending course with no feasible
//! cell) wipes the grid and restarts in randomized placement mode, up to
//! [`BuilderConfig::max_restarts`] times.
//!
//! The feasibility and room-choice rules are also used by the
//! `single_move` perturbation to re-place a removed lecture.
//!
//! # References
//!
//! Brélaz (1979), "New methods to color the vertices of a graph"

mod builder;
mod config;
mod feasibility;

pub use builder::{Construction, ConstructiveBuilder};
pub use config::BuilderConfig;
pub use feasibility::{
    choose_room, feasible_slots, is_feasible, place_lecture, saturation_degree, PlacementMode,
};
