//! Domain model for Curriculum-Based Course Timetabling.
//!
//! # Key Types
//!
//! - [`Problem`]: immutable instance (courses, rooms, curricula,
//!   unavailability) with precomputed lookup tables
//! - [`Schedule`]: mutable `days × periods` grid of [`Slot`]s
//! - [`Placement`]: one lecture of a course in a room
//!
//! # Loading
//!
//! [`load_ctt`] / [`parse_ctt`] read the ITC-2007 track 3 text format.
//!
//! # References
//!
//! - Di Gaspero, McCollum & Schaerf (2007), "The Second International
//!   Timetabling Competition (ITC-2007): Curriculum-based Course
//!   Timetabling (Track 3)"

mod course;
mod loader;
mod problem;
mod schedule;

pub use course::{Course, Curriculum, Room, Unavailability};
pub use loader::{load_ctt, parse_ctt, LoadError};
pub use problem::{Problem, ProblemBuilder};
pub use schedule::{Placement, Schedule, Slot};
