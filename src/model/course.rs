//! Immutable problem entities: courses, rooms, curricula, unavailability.
//!
//! Entities are loaded once and never mutated. Schedules refer to courses
//! and rooms by their index in the owning [`Problem`](super::Problem).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A course that must be taught a fixed number of times per week.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Identifier of the teacher giving every lecture of this course.
    pub teacher: String,
    /// Number of lectures that must be scheduled.
    pub lectures: usize,
    /// Lectures should be spread over at least this many days.
    pub min_working_days: usize,
    /// Number of enrolled students.
    pub students: usize,
}

impl Course {
    /// Creates a course.
    pub fn new(
        id: impl Into<String>,
        teacher: impl Into<String>,
        lectures: usize,
        min_working_days: usize,
        students: usize,
    ) -> Self {
        Self {
            id: id.into(),
            teacher: teacher.into(),
            lectures,
            min_working_days,
            students,
        }
    }
}

/// A room with a seating capacity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Number of seats.
    pub capacity: usize,
}

impl Room {
    /// Creates a room.
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}

/// A group of courses attended by the same students.
///
/// No two courses of a curriculum may be taught in the same period.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Curriculum {
    /// Unique curriculum identifier.
    pub id: String,
    /// Member course identifiers, in file order.
    pub courses: Vec<String>,
}

impl Curriculum {
    /// Creates a curriculum from its member course ids.
    pub fn new<I, S>(id: impl Into<String>, courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `course_id` belongs to this curriculum.
    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c == course_id)
    }
}

/// A (day, period) in which a course must never be taught.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unavailability {
    /// Course the record applies to.
    pub course: String,
    /// Zero-based day index.
    pub day: usize,
    /// Zero-based period index within the day.
    pub period: usize,
}

impl Unavailability {
    /// Creates an unavailability record.
    pub fn new(course: impl Into<String>, day: usize, period: usize) -> Self {
        Self {
            course: course.into(),
            day,
            period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curriculum_contains() {
        let q = Curriculum::new("q1", ["a", "b"]);
        assert!(q.contains("a"));
        assert!(!q.contains("c"));
    }

    #[test]
    fn test_course_fields() {
        let c = Course::new("SceCosC", "Ocra", 3, 3, 30);
        assert_eq!(c.id, "SceCosC");
        assert_eq!(c.teacher, "Ocra");
        assert_eq!(c.lectures, 3);
        assert_eq!(c.min_working_days, 3);
        assert_eq!(c.students, 30);
    }
}
