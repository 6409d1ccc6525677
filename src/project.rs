//! Projects (i.e. task lists, exposed as CalDAV calendars)

use serde::{Deserialize, Serialize};

/// A project. Only its title is exposed to CalDAV clients, as the calendar display name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
}

impl Project {
    pub fn new<S: ToString>(id: i64, title: S) -> Self {
        Self { id, title: title.to_string() }
    }
}
