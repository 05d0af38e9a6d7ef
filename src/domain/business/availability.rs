//! Appointment availability configuration.
//!
//! Days and appointment types are stored as comma-delimited text in
//! `business_info` and exposed as ordered lists. A value that itself contains
//! the delimiter does not survive the round-trip.

use serde::{Deserialize, Serialize};

/// Delimiter used for the stored `appointment_days` / `appointment_types`.
pub const DELIMITER: char = ',';

/// Bookable days, opening hours and appointment types of a business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub days: Vec<String>,
    pub hours: String,
    pub types: Vec<String>,
}

/// Availability in its stored, delimited form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredAvailability {
    pub appointment_days: String,
    pub appointment_hours: String,
    pub appointment_types: String,
}

impl Availability {
    pub fn new(days: Vec<String>, hours: impl Into<String>, types: Vec<String>) -> Self {
        Self {
            days,
            hours: hours.into(),
            types,
        }
    }

    /// Rebuilds the list shape from stored columns; `None` reads as empty.
    pub fn from_stored(days: Option<&str>, hours: Option<&str>, types: Option<&str>) -> Self {
        Self {
            days: split_list(days.unwrap_or_default()),
            hours: hours.unwrap_or_default().to_string(),
            types: split_list(types.unwrap_or_default()),
        }
    }

    pub fn to_stored(&self) -> StoredAvailability {
        StoredAvailability {
            appointment_days: join_list(&self.days),
            appointment_hours: self.hours.clone(),
            appointment_types: join_list(&self.types),
        }
    }

    /// True when nothing is configured.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty() && self.hours.is_empty() && self.types.is_empty()
    }
}

/// Splits stored text on the delimiter. Empty text yields an empty list.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(DELIMITER).map(str::to_string).collect()
}

pub fn join_list(items: &[String]) -> String {
    let mut buf = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push(DELIMITER);
        }
        buf.push_str(item);
    }
    buf
}
