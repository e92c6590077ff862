//! Concrete booking instances on the calendar.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// One concrete instance of a (possibly recurring) booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingOccurrence {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl BookingOccurrence {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Parse an occurrence from two ISO-8601 instants (RFC 3339 with offset or `Z`).
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_instant(start)?,
            end: parse_instant(end)?,
        })
    }
}

pub(crate) fn parse_instant(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| BookingError::MalformedInput(format!("'{}': {}", value, e)))
}
