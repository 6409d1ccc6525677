//! This crate maps the tasks of a to-do application to and from CalDAV data.
//!
//! A CalDAV client reads and writes tasks as iCal `VTODO` items. The [`ical`] module translates between
//! these items and the internal [`Task`] records:
//! * [`ical::build_from`] renders a project and its tasks as a single `VCALENDAR` document
//! * [`ical::parse`] turns a `VTODO` sent by a client back into a [`Task`]
//!
//! Both directions are pure functions. The server-wide options they need (e.g. the time zone used to read
//! zone-less timestamps) are given explicitly as [`Settings`]. \
//! The [`rights`] module holds the access levels the sharing layer checks before it hands data to this crate.

pub mod ical;
pub mod rights;
pub mod settings;
pub use settings::Settings;

mod task;
pub use task::{Label, Task, TaskComment, TaskWithComments};
mod priority;
pub use priority::Priority;
mod project;
pub use project::Project;
