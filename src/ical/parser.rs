//! A module to parse ICal files

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use ical::parser::ical::component::{IcalCalendar, IcalTodo};
use ical::property::Property;

use crate::ical::text;
use crate::ical::time::{parse_date_time, parse_recurrence};
use crate::priority::Priority;
use crate::settings::Settings;
use crate::task::{Label, Task};

/// Errors that prevent an iCal item from being parsed at all
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unable to parse iCal data: {0}")]
    Malformed(String),
    #[error("No VTODO found in iCal data")]
    MissingTodo,
    #[error("Only a single VTODO is supported")]
    MultipleItems,
}

/// Parse a `VTODO` into a [`crate::Task`]
///
/// `content` is either a whole `VCALENDAR`, or a bare `VTODO` block. \
/// Properties that are not supported are ignored, and invalid values of optional properties fall back to their default value. \
/// Trailing whitespace at the end of a content line is lost (the line reader strips it), so a `SUMMARY` or `DESCRIPTION`
/// ending with spaces comes back without them.
pub fn parse(content: &str, settings: &Settings) -> Result<Task, ParseError> {
    let wrapped;
    let content = if is_bare_todo(content) {
        wrapped = format!("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n{}\r\nEND:VCALENDAR\r\n", content.trim());
        wrapped.as_str()
    } else {
        content
    };

    let mut reader = ical::IcalParser::new(content.as_bytes());
    let calendar = match reader.next() {
        None => return Err(ParseError::Malformed("no calendar found".to_string())),
        Some(Err(err)) => return Err(ParseError::Malformed(err.to_string())),
        Some(Ok(calendar)) => calendar,
    };

    // Anything after the first calendar is either another item or garbage
    match reader.next() {
        None => {},
        Some(Ok(_)) => return Err(ParseError::MultipleItems),
        Some(Err(err)) => return Err(ParseError::Malformed(err.to_string())),
    }

    let todo = single_todo(&calendar)?;
    Ok(task_from_todo(todo, settings.time_zone))
}

fn is_bare_todo(content: &str) -> bool {
    match content.trim_start().lines().next() {
        Some(first_line) => first_line.trim_end().eq_ignore_ascii_case("BEGIN:VTODO"),
        None => false,
    }
}

fn single_todo(calendar: &IcalCalendar) -> Result<&IcalTodo, ParseError> {
    match calendar.todos.len() {
        0 => Err(ParseError::MissingTodo),
        1 => Ok(&calendar.todos[0]),
        _ => Err(ParseError::MultipleItems),
    }
}

fn task_from_todo(todo: &IcalTodo, server_tz: Tz) -> Task {
    let mut task = Task::default();
    let mut last_modified = None;
    let mut dtstamp = None;
    let mut status_completed = false;

    for prop in &todo.properties {
        let value = match &prop.value {
            Some(value) => value.as_str(),
            None => continue,
        };

        match prop.name.to_ascii_uppercase().as_str() {
            "UID" => task.uid = value.to_string(),
            "SUMMARY" => task.title = text::unescape(value),
            "DESCRIPTION" => task.description = text::unescape(value),
            "LAST-MODIFIED" => last_modified = parse_time_property(prop, value, server_tz),
            "DTSTAMP" => dtstamp = parse_time_property(prop, value, server_tz),
            "CREATED" => task.created = parse_time_property(prop, value, server_tz),
            "DTSTART" => task.start_date = parse_time_property(prop, value, server_tz),
            "DTEND" => task.end_date = parse_time_property(prop, value, server_tz),
            "DUE" => task.due_date = parse_time_property(prop, value, server_tz),
            "COMPLETED" => task.done_at = parse_time_property(prop, value, server_tz),
            "STATUS" => status_completed = value.trim().eq_ignore_ascii_case("COMPLETED"),
            "PRIORITY" => task.priority = parse_priority(value),
            "RRULE" => task.repeat_after = parse_recurrence(value),
            "CATEGORIES" => task.labels.extend(text::split_list(value).into_iter().map(Label::new)),
            other => log::debug!("Ignoring unsupported property {} in task {:?}", other, task.uid),
        }
    }

    task.updated = last_modified.or(dtstamp);
    task.done = status_completed || task.done_at.is_some();
    task
}

fn parse_priority(value: &str) -> Priority {
    match value.trim().parse::<i64>() {
        Ok(p) => Priority::from_ical(p),
        Err(_) => {
            log::warn!("Invalid priority {:?}. Ignoring it", value);
            Priority::Unset
        },
    }
}

fn parse_time_property(prop: &Property, value: &str, server_tz: Tz) -> Option<DateTime<Utc>> {
    parse_date_time(value, property_time_zone(prop, server_tz))
}

/// The zone given by the `TZID` parameter of a property, if it is a known one
fn property_time_zone(prop: &Property, server_tz: Tz) -> Tz {
    let tzid = prop.params.as_ref().and_then(|params| {
        params.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("TZID"))
            .and_then(|(_, values)| values.first())
    });

    match tzid {
        None => server_tz,
        Some(tzid) => match tzid.trim_matches('"').parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                log::debug!("Unknown time zone {:?}, using {} instead", tzid, server_tz);
                server_tz
            },
        },
    }
}
