//! Conversion between iCal `VTODO` items and [`Task`](crate::Task)s
//!
//! [`build_from`] writes calendars with the `ics` crate, and [`parse`] reads them with the `ical` crate.

mod parser;
pub use parser::{parse, ParseError};
mod builder;
pub use builder::build_from;

pub mod text;
pub mod time;
