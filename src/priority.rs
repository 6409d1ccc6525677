//! Task priorities, and their mapping to the iCal `PRIORITY` scale

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The priority of a task, on the internal 0-5 scale
///
/// RFC5545 uses a 0-9 scale instead, where 1 is the most important and 0 means "undefined". \
/// The two scales are not proportional, so the mapping between them is a fixed table (see [`Priority::to_ical`] and [`Priority::from_ical`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    Unset,
    Low,
    Medium,
    High,
    Urgent,
    DoNow,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Unset
    }
}

impl Priority {
    pub fn is_set(&self) -> bool {
        *self != Priority::Unset
    }

    /// The value of the iCal `PRIORITY` property, or `None` in case this property should be omitted
    pub fn to_ical(&self) -> Option<u8> {
        match self {
            Priority::Unset => None,
            Priority::Low => Some(9),
            Priority::Medium => Some(5),
            Priority::High => Some(3),
            Priority::Urgent => Some(2),
            Priority::DoNow => Some(1),
        }
    }

    /// Read an iCal `PRIORITY` value.
    ///
    /// Values that have no counterpart are rounded to the nearest one (ties go to the most important level).
    /// Values out of the 0-9 range are clamped.
    pub fn from_ical(value: i64) -> Self {
        match value {
            i64::MIN..=0 => Priority::Unset,
            1 => Priority::DoNow,
            2 => Priority::Urgent,
            3 | 4 => Priority::High,
            5 | 6 | 7 => Priority::Medium,
            8..=i64::MAX => Priority::Low,
        }
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> i64 {
        match priority {
            Priority::Unset => 0,
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
            Priority::DoNow => 5,
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::Unset),
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            4 => Ok(Priority::Urgent),
            5 => Ok(Priority::DoNow),
            other => Err(format!("Invalid task priority {}", other)),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}
