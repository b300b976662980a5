//! Timetable grid: slots of (course, room) placements.
//!
//! A [`Schedule`] is a `days × periods_per_day` grid of [`Slot`]s stored
//! row-major, plus a per-course anchor room that biases room choice toward
//! stability. Cloning deep-copies the grid and shares the [`Problem`]
//! through its `Arc`.
//!
//! Schedules do not enforce any constraint: operators may create
//! duplicate rooms, clashes, or missing lectures, and the evaluator counts
//! them.
//!
//! With the `serde` feature a schedule is written together with its
//! problem. Reading one back checks the grid shape and every course and
//! room index against that problem.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::problem::Problem;

/// One lecture of a course held in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Course index in the problem.
    pub course: usize,
    /// Room index in the problem.
    pub room: usize,
}

impl Placement {
    pub fn new(course: usize, room: usize) -> Self {
        Self { course, room }
    }
}

/// The lectures held in one (day, period) cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Slot {
    placements: Vec<Placement>,
}

impl Slot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn contains_course(&self, course: usize) -> bool {
        self.placements.iter().any(|p| p.course == course)
    }

    pub fn contains_room(&self, room: usize) -> bool {
        self.placements.iter().any(|p| p.room == room)
    }

    pub fn push(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Removes and returns the placement at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Placement {
        self.placements.remove(index)
    }

    /// Inserts a placement at `index`, shifting later ones.
    pub fn insert(&mut self, index: usize, placement: Placement) {
        self.placements.insert(index, placement);
    }

    /// Replaces the placement at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, placement: Placement) -> Placement {
        std::mem::replace(&mut self.placements[index], placement)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }
}

/// A (possibly infeasible) timetable for a problem.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "ScheduleRecord", try_from = "ScheduleRecord")
)]
pub struct Schedule {
    problem: Arc<Problem>,
    grid: Vec<Slot>,
    anchor_rooms: Vec<Option<usize>>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new(problem: Arc<Problem>) -> Self {
        let cells = problem.cell_count();
        let courses = problem.courses().len();
        Self {
            problem,
            grid: vec![Slot::new(); cells],
            anchor_rooms: vec![None; courses],
        }
    }

    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    pub fn days(&self) -> usize {
        self.problem.days()
    }

    pub fn periods_per_day(&self) -> usize {
        self.problem.periods_per_day()
    }

    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    /// Row-major index of a cell.
    pub fn cell_index(&self, day: usize, period: usize) -> usize {
        day * self.problem.periods_per_day() + period
    }

    /// (day, period) of a row-major cell index.
    pub fn cell_at(&self, index: usize) -> (usize, usize) {
        let periods = self.problem.periods_per_day();
        (index / periods, index % periods)
    }

    pub fn slot(&self, day: usize, period: usize) -> &Slot {
        &self.grid[self.cell_index(day, period)]
    }

    pub fn slot_mut(&mut self, day: usize, period: usize) -> &mut Slot {
        let idx = self.cell_index(day, period);
        &mut self.grid[idx]
    }

    /// Iterates over `(day, period, slot)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Slot)> {
        let periods = self.problem.periods_per_day();
        self.grid
            .iter()
            .enumerate()
            .map(move |(i, slot)| (i / periods, i % periods, slot))
    }

    /// Cells holding at least one lecture, in row-major order.
    pub fn occupied_cells(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|(_, _, slot)| !slot.is_empty())
            .map(|(d, p, _)| (d, p))
            .collect()
    }

    /// Adds a lecture to a cell and records the room as the course's
    /// anchor if it has none yet.
    pub fn place(&mut self, day: usize, period: usize, placement: Placement) {
        if self.anchor_rooms[placement.course].is_none() {
            self.anchor_rooms[placement.course] = Some(placement.room);
        }
        self.slot_mut(day, period).push(placement);
    }

    /// Exchanges the full contents of two cells.
    pub fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = self.cell_index(a.0, a.1);
        let ib = self.cell_index(b.0, b.1);
        self.grid.swap(ia, ib);
    }

    /// Room the course was first placed in, if any.
    pub fn anchor_room(&self, course: usize) -> Option<usize> {
        self.anchor_rooms[course]
    }

    /// Overwrites the anchor room of a course. Used to undo a trial
    /// placement.
    pub(crate) fn set_anchor_room(&mut self, course: usize, room: Option<usize>) {
        self.anchor_rooms[course] = room;
    }

    /// Number of scheduled lectures of a course.
    pub fn lecture_count(&self, course: usize) -> usize {
        self.grid
            .iter()
            .flat_map(Slot::iter)
            .filter(|p| p.course == course)
            .count()
    }

    /// Number of scheduled lectures per course.
    pub fn lecture_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.problem.courses().len()];
        for p in self.grid.iter().flat_map(Slot::iter) {
            counts[p.course] += 1;
        }
        counts
    }

    /// Total number of placements in the grid.
    pub fn placement_count(&self) -> usize {
        self.grid.iter().map(Slot::len).sum()
    }

    /// Empties every cell and forgets all anchor rooms.
    pub fn clear(&mut self) {
        for slot in &mut self.grid {
            *slot = Slot::new();
        }
        self.anchor_rooms.fill(None);
    }
}

/// Serialized form of a [`Schedule`].
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct ScheduleRecord {
    problem: Problem,
    grid: Vec<Slot>,
    anchor_rooms: Vec<Option<usize>>,
}

#[cfg(feature = "serde")]
impl From<Schedule> for ScheduleRecord {
    fn from(schedule: Schedule) -> Self {
        Self {
            problem: Arc::unwrap_or_clone(schedule.problem),
            grid: schedule.grid,
            anchor_rooms: schedule.anchor_rooms,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<ScheduleRecord> for Schedule {
    type Error = super::loader::LoadError;

    fn try_from(record: ScheduleRecord) -> Result<Self, Self::Error> {
        use super::loader::LoadError;

        let problem = record.problem;
        if record.grid.len() != problem.cell_count() {
            return Err(LoadError::InvalidSchedule(format!(
                "grid has {} cells, problem has {}",
                record.grid.len(),
                problem.cell_count()
            )));
        }
        let courses = problem.courses().len();
        if record.anchor_rooms.len() != courses {
            return Err(LoadError::InvalidSchedule(format!(
                "{} anchor rooms for {courses} courses",
                record.anchor_rooms.len()
            )));
        }
        let rooms = problem.rooms().len();
        if let Some(p) = record
            .grid
            .iter()
            .flat_map(Slot::iter)
            .find(|p| p.course >= courses || p.room >= rooms)
        {
            return Err(LoadError::InvalidSchedule(format!(
                "placement of course {} in room {} is out of range",
                p.course, p.room
            )));
        }
        if let Some(room) = record.anchor_rooms.iter().flatten().find(|&&r| r >= rooms) {
            return Err(LoadError::InvalidSchedule(format!(
                "anchor room {room} is out of range"
            )));
        }
        Ok(Self {
            problem: Arc::new(problem),
            grid: record.grid,
            anchor_rooms: record.anchor_rooms,
        })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let periods = self.periods_per_day();
        for (i, slot) in self.grid.iter().enumerate() {
            let period = i % periods;
            if period > 0 {
                write!(f, " - ")?;
            }
            write!(f, "[")?;
            for (j, p) in slot.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(
                    f,
                    "{}@{}",
                    self.problem.course(p.course).id,
                    self.problem.room(p.room).id
                )?;
            }
            write!(f, "]")?;
            if period + 1 == periods {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
