//! The problem instance shared by every schedule.
//!
//! A [`Problem`] is built once (by the loader or a [`ProblemBuilder`]) and
//! then shared read-only through an `Arc`. Construction validates every
//! cross-reference and precomputes the lookup tables the evaluator and
//! the builder query in their inner loops:
//!
//! - course id → index
//! - course → teacher index
//! - course × course curriculum-sharing matrix
//! - course × cell unavailability mask
//! - rooms ordered by ascending capacity

use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::course::{Course, Curriculum, Room, Unavailability};
use super::loader::LoadError;
use crate::evaluator::SoftPolicy;

/// A Curriculum-Based Course Timetabling instance.
///
/// With the `serde` feature the instance is written as its raw entities
/// and read back through [`ProblemBuilder`], so lookup tables are rebuilt
/// and every cross-reference is validated again.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "ProblemBuilder", try_from = "ProblemBuilder")
)]
pub struct Problem {
    name: String,
    days: usize,
    periods_per_day: usize,
    courses: Vec<Course>,
    rooms: Vec<Room>,
    curricula: Vec<Curriculum>,
    unavailability: Vec<Unavailability>,
    soft_policy: SoftPolicy,

    course_index: HashMap<String, usize>,
    teacher_of: Vec<usize>,
    mates: Vec<bool>,
    blocked: Vec<bool>,
    rooms_by_capacity: Vec<usize>,
}

impl Problem {
    /// Starts a builder for an instance with the given grid size.
    pub fn builder(name: impl Into<String>, days: usize, periods_per_day: usize) -> ProblemBuilder {
        ProblemBuilder::new(name, days, periods_per_day)
    }

    /// Creates a validated problem instance.
    ///
    /// # Errors
    /// Returns [`LoadError`] if the grid is empty, ids are duplicated, or a
    /// curriculum or unavailability record references an unknown course or
    /// a cell outside the grid.
    pub fn new(
        name: impl Into<String>,
        days: usize,
        periods_per_day: usize,
        courses: Vec<Course>,
        rooms: Vec<Room>,
        curricula: Vec<Curriculum>,
        unavailability: Vec<Unavailability>,
    ) -> Result<Self, LoadError> {
        if days == 0 || periods_per_day == 0 {
            return Err(LoadError::EmptyGrid);
        }

        let mut course_index = HashMap::with_capacity(courses.len());
        for (i, course) in courses.iter().enumerate() {
            if course_index.insert(course.id.clone(), i).is_some() {
                return Err(LoadError::DuplicateId {
                    kind: "course",
                    id: course.id.clone(),
                });
            }
        }

        let mut room_ids = HashSet::with_capacity(rooms.len());
        for room in &rooms {
            if !room_ids.insert(room.id.as_str()) {
                return Err(LoadError::DuplicateId {
                    kind: "room",
                    id: room.id.clone(),
                });
            }
        }

        let mut teacher_ids: HashMap<&str, usize> = HashMap::new();
        let teacher_of: Vec<usize> = courses
            .iter()
            .map(|c| {
                let next = teacher_ids.len();
                *teacher_ids.entry(c.teacher.as_str()).or_insert(next)
            })
            .collect();

        let n = courses.len();
        let mut mates = vec![false; n * n];
        for curriculum in &curricula {
            let mut members = Vec::with_capacity(curriculum.courses.len());
            for id in &curriculum.courses {
                let idx = *course_index
                    .get(id)
                    .ok_or_else(|| LoadError::UnknownCourse(id.clone()))?;
                members.push(idx);
            }
            for &a in &members {
                for &b in &members {
                    mates[a * n + b] = true;
                }
            }
        }

        let too_large = || LoadError::GridTooLarge {
            days,
            periods_per_day,
            courses: n,
        };
        let cells = days.checked_mul(periods_per_day).ok_or_else(too_large)?;
        let mut blocked = vec![false; n.checked_mul(cells).ok_or_else(too_large)?];
        for record in &unavailability {
            let idx = *course_index
                .get(&record.course)
                .ok_or_else(|| LoadError::UnknownCourse(record.course.clone()))?;
            if record.day >= days || record.period >= periods_per_day {
                return Err(LoadError::OutOfRange {
                    course: record.course.clone(),
                    day: record.day,
                    period: record.period,
                });
            }
            blocked[idx * cells + record.day * periods_per_day + record.period] = true;
        }

        let mut rooms_by_capacity: Vec<usize> = (0..rooms.len()).collect();
        rooms_by_capacity.sort_by_key(|&r| rooms[r].capacity);

        Ok(Self {
            name: name.into(),
            days,
            periods_per_day,
            courses,
            rooms,
            curricula,
            unavailability,
            soft_policy: SoftPolicy::default(),
            course_index,
            teacher_of,
            mates,
            blocked,
            rooms_by_capacity,
        })
    }

    /// Replaces the soft-cost accounting policy.
    pub fn with_soft_policy(mut self, policy: SoftPolicy) -> Self {
        self.soft_policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn periods_per_day(&self) -> usize {
        self.periods_per_day
    }

    /// Number of (day, period) cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.days * self.periods_per_day
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, index: usize) -> &Course {
        &self.courses[index]
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, index: usize) -> &Room {
        &self.rooms[index]
    }

    pub fn curricula(&self) -> &[Curriculum] {
        &self.curricula
    }

    pub fn unavailability(&self) -> &[Unavailability] {
        &self.unavailability
    }

    pub fn soft_policy(&self) -> SoftPolicy {
        self.soft_policy
    }

    /// Looks up a course index by id.
    pub fn course_index(&self, id: &str) -> Option<usize> {
        self.course_index.get(id).copied()
    }

    /// Dense teacher index of a course. Courses sharing a teacher share
    /// the index.
    pub fn teacher_of(&self, course: usize) -> usize {
        self.teacher_of[course]
    }

    /// Whether two courses belong to a common curriculum.
    ///
    /// A course shares a curriculum with itself iff it belongs to any
    /// curriculum.
    pub fn shares_curriculum(&self, a: usize, b: usize) -> bool {
        self.mates[a * self.courses.len() + b]
    }

    /// Whether `course` has an unavailability record for the cell.
    pub fn is_unavailable(&self, course: usize, day: usize, period: usize) -> bool {
        self.blocked[course * self.cell_count() + day * self.periods_per_day + period]
    }

    /// Room indices ordered by ascending capacity.
    pub fn rooms_by_capacity(&self) -> &[usize] {
        &self.rooms_by_capacity
    }

    /// Total number of lectures over all courses.
    pub fn total_lectures(&self) -> usize {
        self.courses.iter().map(|c| c.lectures).sum()
    }
}

/// Incremental constructor for [`Problem`], used by tests and callers
/// that assemble instances in code.
///
/// ```
/// use u_timetable::model::{Course, Problem, Room};
///
/// let problem = Problem::builder("toy", 2, 1)
///     .course(Course::new("c1", "t1", 1, 1, 10))
///     .course(Course::new("c2", "t2", 1, 1, 10))
///     .room(Room::new("r1", 20))
///     .build()
///     .unwrap();
/// assert_eq!(problem.cell_count(), 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProblemBuilder {
    name: String,
    days: usize,
    periods_per_day: usize,
    courses: Vec<Course>,
    rooms: Vec<Room>,
    #[cfg_attr(feature = "serde", serde(default))]
    curricula: Vec<Curriculum>,
    #[cfg_attr(feature = "serde", serde(default))]
    unavailability: Vec<Unavailability>,
    #[cfg_attr(feature = "serde", serde(default))]
    soft_policy: SoftPolicy,
}

impl ProblemBuilder {
    pub fn new(name: impl Into<String>, days: usize, periods_per_day: usize) -> Self {
        Self {
            name: name.into(),
            days,
            periods_per_day,
            courses: Vec::new(),
            rooms: Vec::new(),
            curricula: Vec::new(),
            unavailability: Vec::new(),
            soft_policy: SoftPolicy::default(),
        }
    }

    pub fn course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    pub fn room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn curriculum(mut self, curriculum: Curriculum) -> Self {
        self.curricula.push(curriculum);
        self
    }

    /// Forbids `course` at (`day`, `period`).
    pub fn unavailable(mut self, course: impl Into<String>, day: usize, period: usize) -> Self {
        self.unavailability
            .push(Unavailability::new(course, day, period));
        self
    }

    pub fn soft_policy(mut self, policy: SoftPolicy) -> Self {
        self.soft_policy = policy;
        self
    }

    /// Validates and builds the problem.
    pub fn build(self) -> Result<Problem, LoadError> {
        let policy = self.soft_policy;
        Problem::new(
            self.name,
            self.days,
            self.periods_per_day,
            self.courses,
            self.rooms,
            self.curricula,
            self.unavailability,
        )
        .map(|problem| problem.with_soft_policy(policy))
    }
}

impl From<Problem> for ProblemBuilder {
    fn from(problem: Problem) -> Self {
        Self {
            name: problem.name,
            days: problem.days,
            periods_per_day: problem.periods_per_day,
            courses: problem.courses,
            rooms: problem.rooms,
            curricula: problem.curricula,
            unavailability: problem.unavailability,
            soft_policy: problem.soft_policy,
        }
    }
}

impl TryFrom<ProblemBuilder> for Problem {
    type Error = LoadError;

    fn try_from(builder: ProblemBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::RoomStabilityPolicy;

    fn sample() -> Problem {
        Problem::builder("sample", 2, 3)
            .course(Course::new("a", "t1", 2, 2, 30))
            .course(Course::new("b", "t1", 1, 1, 10))
            .course(Course::new("c", "t2", 1, 1, 50))
            .room(Room::new("big", 60))
            .room(Room::new("small", 20))
            .curriculum(Curriculum::new("q", ["a", "c"]))
            .unavailable("b", 1, 2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_tables() {
        let p = sample();
        assert_eq!(p.course_index("b"), Some(1));
        assert_eq!(p.course_index("zzz"), None);
        assert_eq!(p.teacher_of(0), p.teacher_of(1));
        assert_ne!(p.teacher_of(0), p.teacher_of(2));
        assert!(p.shares_curriculum(0, 2));
        assert!(p.shares_curriculum(0, 0));
        assert!(!p.shares_curriculum(1, 1));
        assert!(!p.shares_curriculum(0, 1));
        assert!(p.is_unavailable(1, 1, 2));
        assert!(!p.is_unavailable(1, 0, 2));
        assert_eq!(p.rooms_by_capacity(), &[1, 0]);
        assert_eq!(p.total_lectures(), 4);
    }

    #[test]
    fn test_unknown_curriculum_member() {
        let err = Problem::builder("bad", 1, 1)
            .course(Course::new("a", "t", 1, 1, 1))
            .curriculum(Curriculum::new("q", ["a", "ghost"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, LoadError::UnknownCourse(id) if id == "ghost"));
    }

    #[test]
    fn test_unavailability_out_of_range() {
        let err = Problem::builder("bad", 2, 2)
            .course(Course::new("a", "t", 1, 1, 1))
            .unavailable("a", 2, 0)
            .build()
            .unwrap_err();
        assert!(matches!(err, LoadError::OutOfRange { day: 2, .. }));
    }

    #[test]
    fn test_duplicate_ids() {
        let err = Problem::builder("bad", 1, 1)
            .course(Course::new("a", "t", 1, 1, 1))
            .course(Course::new("a", "u", 1, 1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId { kind: "course", .. }));

        let err = Problem::builder("bad", 1, 1)
            .room(Room::new("r", 1))
            .room(Room::new("r", 2))
            .build()
            .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId { kind: "room", .. }));
    }

    #[test]
    fn test_empty_grid() {
        let err = Problem::builder("bad", 0, 4).build().unwrap_err();
        assert!(matches!(err, LoadError::EmptyGrid));
    }

    #[test]
    fn test_builder_round_trip_keeps_policy() {
        let policy = SoftPolicy::default().with_room_stability(RoomStabilityPolicy::MostCommonRoom);
        let p = sample().with_soft_policy(policy);
        let rebuilt = Problem::try_from(ProblemBuilder::from(p.clone())).unwrap();
        assert_eq!(rebuilt.soft_policy(), policy);
        assert_eq!(rebuilt.courses(), p.courses());
        assert_eq!(rebuilt.unavailability(), p.unavailability());
        assert!(rebuilt.is_unavailable(1, 1, 2));
        assert!(rebuilt.shares_curriculum(0, 2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_rebuilds_tables() {
        let p = sample();
        let json = serde_json::to_string(&p).unwrap();
        let back: Problem = serde_json::from_str(&json).unwrap();
        assert_eq!(serde_json::to_string(&back).unwrap(), json);
        assert_eq!(back.course_index("c"), Some(2));
        assert!(back.is_unavailable(1, 1, 2));
        assert_eq!(back.rooms_by_capacity(), &[1, 0]);

        // cross-references are validated on the way in
        let bad = json.replace(r#""courses":["a","c"]"#, r#""courses":["a","zzz"]"#);
        assert!(serde_json::from_str::<Problem>(&bad).is_err());
    }

    #[test]
    fn test_oversized_grid() {
        let err = Problem::builder("huge", usize::MAX, 2).build().unwrap_err();
        assert!(matches!(err, LoadError::GridTooLarge { .. }));

        let err = Problem::builder("huge", usize::MAX / 2, 2)
            .course(Course::new("a", "t1", 1, 1, 10))
            .course(Course::new("b", "t2", 1, 1, 10))
            .build()
            .unwrap_err();
        assert!(matches!(err, LoadError::GridTooLarge { courses: 2, .. }));
    }
}
