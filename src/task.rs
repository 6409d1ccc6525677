//! To-do tasks (iCal `VTODO` item)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::priority::Priority;

/// A label attached to a task
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The storage ID of this label. This is `None` for labels that have just been parsed from an iCal file
    pub id: Option<i64>,
    pub title: String,
}

impl Label {
    pub fn new<S: ToString>(title: S) -> Self {
        Self { id: None, title: title.to_string() }
    }

    pub fn with_id<S: ToString>(id: i64, title: S) -> Self {
        Self { id: Some(id), title: title.to_string() }
    }
}

/// A to-do task
///
/// Timestamps at or before the Unix epoch are considered unset, like `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The storage ID. This is 0 for tasks that have just been parsed from an iCal file
    pub id: i64,
    /// Persistent, globally unique identifier for the calendar component
    pub uid: String,
    pub title: String,
    pub description: String,

    pub done: bool,
    /// The time this task has been completed
    pub done_at: Option<DateTime<Utc>>,
    pub priority: Priority,

    pub created: Option<DateTime<Utc>>,
    /// The last time this task was modified
    pub updated: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    /// The recurrence interval, in seconds. 0 means this task does not repeat
    pub repeat_after: u64,

    pub labels: Vec<Label>,
}

impl Task {
    /// Create a new task, with only a title and a UID
    pub fn new<S: ToString, T: ToString>(title: S, uid: T) -> Self {
        Self {
            title: title.to_string(),
            uid: uid.to_string(),
            ..Default::default()
        }
    }

    pub fn label_titles(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.title.as_str()).collect()
    }
}

/// A comment on a task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskComment {
    pub id: i64,
    pub comment: String,
    /// The username of the author
    pub author: String,
    pub created: DateTime<Utc>,
}

/// A task, along with its comments
///
/// Comments are part of the data the web layer loads, but they have no counterpart in `VTODO` items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskWithComments {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default)]
    pub comments: Vec<TaskComment>,
}

impl From<Task> for TaskWithComments {
    fn from(task: Task) -> Self {
        Self { task, comments: Vec::new() }
    }
}
