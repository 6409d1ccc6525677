//! Support for the server configuration options this crate depends on

use std::error::Error;
use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The default PRODID written in generated calendars (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
pub const DEFAULT_PRODUCT_ID: &str = "-//Todo App//EN";

/// Server-wide options, given to every encoding or decoding call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The time zone used to interpret timestamps that do not carry one
    pub time_zone: Tz,
    /// The PRODID of generated calendars
    pub product_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_zone: Tz::UTC,
            product_id: DEFAULT_PRODUCT_ID.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing keys keep their default values.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let settings: Self = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(std::io::BufReader::new(file))?,
        };
        log::debug!("Loaded settings from {:?} (time zone {})", path, settings.time_zone);
        Ok(settings)
    }

    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_product_id<S: ToString>(mut self, product_id: S) -> Self {
        self.product_id = product_id.to_string();
        self
    }
}
