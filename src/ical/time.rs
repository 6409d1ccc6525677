//! Conversion of iCal date-times and recurrence rules
//!
//! Date-times are always written in UTC (`20181201T011205Z`).
//! When reading, a date-time without the trailing `Z` is a local time. Third-party clients rely on this
//! asymmetry, so it is kept on purpose: such values are interpreted in the time zone configured on the server
//! (or in the zone given by a `TZID` parameter).

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const UTC_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const LOCAL_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_FORMAT: &str = "%Y%m%d";

/// The only frequency that can be expressed by a task recurrence interval
const SUPPORTED_FREQUENCY: &str = "SECONDLY";

/// Tells whether a timestamp is actually set.
/// Timestamps at or before the Unix epoch are sentinels for "no value".
pub fn is_set(dt: Option<&DateTime<Utc>>) -> bool {
    match dt {
        Some(dt) => dt.timestamp() > 0,
        None => false,
    }
}

/// Whether a timestamp fits in the 4-digit years of iCal date-times
pub fn is_representable(dt: &DateTime<Utc>) -> bool {
    dt.year() <= 9999
}

/// Format a timestamp as an iCal UTC date-time. See [`is_representable`] for the supported range.
pub fn format_date_time(dt: &DateTime<Utc>) -> String {
    dt.format(UTC_DATE_TIME_FORMAT).to_string()
}

/// Parse an iCal date-time (or date) value.
///
/// `tz` is used for values that are not in UTC. \
/// Unparseable values and sentinels (e.g. `00010101T000000`) return `None`.
pub fn parse_date_time(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();

    let parsed = if value.ends_with('Z') || value.ends_with('z') {
        NaiveDateTime::parse_from_str(&value[..value.len() - 1], LOCAL_DATE_TIME_FORMAT)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    } else if value.len() == 8 {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .and_then(|naive| from_local(&naive, tz))
    } else {
        NaiveDateTime::parse_from_str(value, LOCAL_DATE_TIME_FORMAT)
            .ok()
            .and_then(|naive| from_local(&naive, tz))
    };

    match parsed {
        None => {
            log::warn!("Invalid iCal date-time {:?}. Ignoring it", value);
            None
        },
        Some(dt) if is_set(Some(&dt)) => Some(dt),
        Some(_) => {
            log::debug!("Date-time {:?} is a sentinel for \"no value\"", value);
            None
        },
    }
}

fn from_local(naive: &NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        // A local time that happens twice when the clocks go back
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            log::warn!("Local time {} does not exist in time zone {}", naive, tz);
            None
        },
    }
}

/// The `RRULE` value for a task that repeats every `repeat_after` seconds
pub fn format_recurrence(repeat_after: u64) -> Option<String> {
    if repeat_after == 0 {
        return None;
    }
    Some(format!("FREQ={};INTERVAL={}", SUPPORTED_FREQUENCY, repeat_after))
}

/// Read an `RRULE` value into a recurrence interval, in seconds.
///
/// Only `FREQ=SECONDLY` rules, with an optional `INTERVAL`, are supported. Any other rule is ignored and returns 0.
pub fn parse_recurrence(rule: &str) -> u64 {
    let mut frequency = None;
    let mut interval: u64 = 1;

    for part in rule.trim().split(';').filter(|p| p.is_empty() == false) {
        let (key, value) = match part.split_once('=') {
            Some(kv) => kv,
            None => {
                log::warn!("Invalid recurrence rule {:?}. Ignoring it", rule);
                return 0;
            },
        };

        match key.trim().to_ascii_uppercase().as_str() {
            "FREQ" => frequency = Some(value.trim().to_ascii_uppercase()),
            "INTERVAL" => match value.trim().parse::<u64>() {
                Ok(n) if n > 0 => interval = n,
                _ => {
                    log::warn!("Invalid recurrence interval in {:?}. Ignoring the rule", rule);
                    return 0;
                },
            },
            other => {
                log::warn!("Unsupported recurrence rule part {} in {:?}. Ignoring the rule", other, rule);
                return 0;
            },
        }
    }

    match frequency.as_deref() {
        Some(SUPPORTED_FREQUENCY) => interval,
        other => {
            log::warn!("Unsupported recurrence frequency {:?}. Ignoring the rule", other);
            0
        },
    }
}
