//! Access rights on shared projects
//!
//! A project can be shared with teams (or users). Each share grants a [`Right`], and rights are ordered:
//! `Admin` includes `Write`, which includes `Read`.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A right value that does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid right {0}")]
pub struct InvalidRight(pub i64);

/// The level of access granted on a project
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Right {
    /// See the project and its tasks
    Read,
    /// Create, edit and delete tasks
    Write,
    /// Manage the project itself, including its shares
    Admin,
}

impl Right {
    /// Whether this right is enough to do something that requires `required`
    pub fn includes(&self, required: Right) -> bool {
        *self >= required
    }

    /// The actual right of someone on a project, given whether they own it and the rights granted by its shares
    pub fn effective<I>(is_owner: bool, granted: I) -> Option<Right>
    where
        I: IntoIterator<Item = Right>,
    {
        if is_owner {
            return Some(Right::Admin);
        }
        granted.into_iter().max()
    }
}

impl From<Right> for i64 {
    fn from(right: Right) -> i64 {
        match right {
            Right::Read => 0,
            Right::Write => 1,
            Right::Admin => 2,
        }
    }
}

impl TryFrom<i64> for Right {
    type Error = InvalidRight;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Right::Read),
            1 => Ok(Right::Write),
            2 => Ok(Right::Admin),
            other => Err(InvalidRight(other)),
        }
    }
}

impl Display for Right {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Right::Read => write!(f, "read"),
            Right::Write => write!(f, "write"),
            Right::Admin => write!(f, "admin"),
        }
    }
}

/// What someone tries to do with a task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn required_right(&self) -> Right {
        match self {
            Action::Read => Right::Read,
            Action::Create | Action::Update | Action::Delete => Right::Write,
        }
    }

    /// Whether someone with `right` (or no right at all) may do this
    pub fn is_allowed(&self, right: Option<Right>) -> bool {
        match right {
            Some(right) => right.includes(self.required_right()),
            None => false,
        }
    }
}

/// A project shared with a team
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProject {
    pub team_id: i64,
    pub project_id: i64,
    pub right: Right,
}

impl TeamProject {
    /// Build a share from raw values, e.g. values sent by a client
    pub fn new(team_id: i64, project_id: i64, right: i64) -> Result<Self, InvalidRight> {
        Ok(Self { team_id, project_id, right: Right::try_from(right)? })
    }

    // Only admins of a project can manage its shares. Everyone with access to the project can see them.

    pub fn can_create(&self, caller_right: Option<Right>) -> bool {
        Self::is_admin(caller_right)
    }

    pub fn can_update(&self, caller_right: Option<Right>) -> bool {
        Self::is_admin(caller_right)
    }

    pub fn can_delete(&self, caller_right: Option<Right>) -> bool {
        Self::is_admin(caller_right)
    }

    pub fn can_read(&self, caller_right: Option<Right>) -> bool {
        Action::Read.is_allowed(caller_right)
    }

    fn is_admin(caller_right: Option<Right>) -> bool {
        let allowed = caller_right == Some(Right::Admin);
        if allowed == false {
            log::debug!("Tried to manage a project share without admin rights ({:?})", caller_right);
        }
        allowed
    }
}
