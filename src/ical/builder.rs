//! A module to build ICal files

use chrono::{DateTime, Utc};
use ics::components::Property;
use ics::properties::{Categories, Completed, Created, Description, DtEnd, DtStart, Due, LastModified, Method,
                      Priority, RRule, Status, Summary};
use ics::{ICalendar, ToDo};
use sha2::{Digest, Sha256};

use crate::ical::text;
use crate::ical::time::{format_date_time, format_recurrence, is_representable, is_set};
use crate::project::Project;
use crate::settings::Settings;
use crate::task::{Task, TaskWithComments};

/// How often clients should refresh a published calendar
const PUBLISHED_TTL: &str = "PT4H";

/// Create an iCal calendar that contains every task of a project.
///
/// The calendar starts with `VERSION`, `PRODID`, `METHOD`, `X-PUBLISHED-TTL` and `X-WR-CALNAME`, in this order.
/// Fields of every `VTODO` are always written in the same order, since some clients rely on it.
/// Lines end with CRLF and are folded at 75 octets.
/// Task comments are not exported.
pub fn build_from(project: &Project, tasks: &[TaskWithComments], settings: &Settings) -> String {
    let mut calendar = ICalendar::new("2.0", settings.product_id.as_str());
    calendar.push(Method::new("PUBLISH"));
    calendar.push(Property::new("X-PUBLISHED-TTL", PUBLISHED_TTL));
    calendar.push(Property::new("X-WR-CALNAME", text::escape(&project.title)));

    for task in tasks {
        calendar.add_todo(build_todo(&task.task));
    }
    log::trace!("Built a calendar with {} tasks for project {}", tasks.len(), project.id);

    calendar.to_string()
}

fn build_todo(task: &Task) -> ToDo<'static> {
    let updated = set_or_none(task.updated.as_ref());
    let s_timestamp = match updated.or_else(|| set_or_none(task.created.as_ref())) {
        Some(dt) => format_date_time(dt),
        None => {
            log::debug!("Task {:?} has no modification date", task.uid);
            format_date_time(&DateTime::<Utc>::from(std::time::UNIX_EPOCH))
        },
    };

    let uid = if task.uid.is_empty() {
        derived_uid(&s_timestamp, &task.title)
    } else {
        task.uid.clone()
    };

    let mut todo = ToDo::new(uid, s_timestamp);
    todo.push(Summary::new(text::escape(&task.title)));

    if let Some(start) = set_or_none(task.start_date.as_ref()) {
        todo.push(DtStart::new(format_date_time(start)));
    }
    if let Some(end) = set_or_none(task.end_date.as_ref()) {
        todo.push(DtEnd::new(format_date_time(end)));
    }
    if task.description.is_empty() == false {
        todo.push(Description::new(text::escape(&task.description)));
    }
    if let Some(done_at) = set_or_none(task.done_at.as_ref()) {
        todo.push(Completed::new(format_date_time(done_at)));
        todo.push(Status::completed());
    }
    if let Some(due) = set_or_none(task.due_date.as_ref()) {
        todo.push(Due::new(format_date_time(due)));
    }
    if let Some(created) = set_or_none(task.created.as_ref()) {
        todo.push(Created::new(format_date_time(created)));
    }
    if let Some(priority) = task.priority.to_ical() {
        todo.push(Priority::new(priority.to_string()));
    }
    if let Some(rule) = format_recurrence(task.repeat_after) {
        todo.push(RRule::new(rule));
    }
    if task.labels.is_empty() == false {
        todo.push(Categories::new(text::join_list(task.label_titles())));
    }
    if let Some(updated) = updated {
        todo.push(LastModified::new(format_date_time(updated)));
    }

    todo
}

/// The timestamp, if it is set and can be written as an iCal date-time
fn set_or_none(dt: Option<&DateTime<Utc>>) -> Option<&DateTime<Utc>> {
    match dt {
        Some(inner) if is_set(dt) && is_representable(inner) => dt,
        Some(inner) if is_set(dt) => {
            log::warn!("Date-time {} is out of the iCal range. Omitting it", inner);
            None
        },
        _ => None,
    }
}

/// A stable UID for tasks that do not have one yet
fn derived_uid(s_timestamp: &str, title: &str) -> String {
    let digest = Sha256::digest(title.as_bytes());
    format!("{}{}", s_timestamp, hex::encode(digest))
}
