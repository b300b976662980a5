//! Soft-cost accounting policies.
//!
//! Two accounting schemes exist for room stability and for minimum working
//! days. A [`SoftPolicy`] names one scheme for each; the evaluator applies
//! exactly the configured pair and never mixes them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How room-stability deviations are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoomStabilityPolicy {
    /// One violation per lecture held in a room other than the room of
    /// the course's first lecture (row-major grid order).
    #[default]
    FirstRoom,

    /// `required lectures - lectures in the most used room`, per course.
    MostCommonRoom,
}

/// How minimum-working-days shortfalls are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WorkingDaysPolicy {
    /// One violation per course whose day span
    /// (`last_day - first_day + 1`) is below its minimum working days.
    #[default]
    DaySpan,

    /// One violation per pair of lectures on different days closer than
    /// `min_working_days - 1` days apart.
    PairGap,
}

/// The soft-cost accounting used by an evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SoftPolicy {
    pub room_stability: RoomStabilityPolicy,
    pub working_days: WorkingDaysPolicy,
}

impl SoftPolicy {
    pub fn with_room_stability(mut self, policy: RoomStabilityPolicy) -> Self {
        self.room_stability = policy;
        self
    }

    pub fn with_working_days(mut self, policy: WorkingDaysPolicy) -> Self {
        self.working_days = policy;
        self
    }
}
