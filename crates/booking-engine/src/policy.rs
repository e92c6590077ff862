//! Rule parameters for booking validation.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};
use crate::resource::ResourceType;

const OFFICE_OPEN: NaiveTime = match NaiveTime::from_hms_opt(9, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

const OFFICE_CLOSE: NaiveTime = match NaiveTime::from_hms_opt(18, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

/// Parameters the validator's rules are evaluated against.
///
/// Defaults: meeting rooms and hot desks, 09:00 to 18:00, at most 8 hours,
/// at most 30 days ahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingPolicy {
    pub bookable_types: Vec<ResourceType>,
    /// Earliest allowed start time-of-day (inclusive).
    pub office_open: NaiveTime,
    /// Latest allowed end time-of-day (inclusive).
    pub office_close: NaiveTime,
    pub max_duration_minutes: i64,
    pub max_lead_days: i64,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            bookable_types: vec![ResourceType::MeetingRoom, ResourceType::Hotdesk],
            office_open: OFFICE_OPEN,
            office_close: OFFICE_CLOSE,
            max_duration_minutes: 8 * 60,
            max_lead_days: 30,
        }
    }
}

impl BookingPolicy {
    /// Reject parameter sets no booking could satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.office_open >= self.office_close {
            return Err(BookingError::InvalidPolicy(format!(
                "office_open {} must be before office_close {}",
                self.office_open, self.office_close
            )));
        }
        if self.max_duration_minutes <= 0 {
            return Err(BookingError::InvalidPolicy(
                "max_duration_minutes must be positive".to_string(),
            ));
        }
        if Duration::try_minutes(self.max_duration_minutes).is_none() {
            return Err(BookingError::InvalidPolicy(format!(
                "max_duration_minutes {} is out of range",
                self.max_duration_minutes
            )));
        }
        if self.max_lead_days < 0 {
            return Err(BookingError::InvalidPolicy(
                "max_lead_days must not be negative".to_string(),
            ));
        }
        if Duration::try_days(self.max_lead_days).is_none() {
            return Err(BookingError::InvalidPolicy(format!(
                "max_lead_days {} is out of range",
                self.max_lead_days
            )));
        }
        Ok(())
    }

    pub fn is_bookable(&self, kind: ResourceType) -> bool {
        self.bookable_types.contains(&kind)
    }

    /// Longest allowed booking; saturates for limits `validate` would reject.
    pub fn max_duration(&self) -> Duration {
        Duration::try_minutes(self.max_duration_minutes).unwrap_or(Duration::MAX)
    }

    /// Furthest allowed lead time; saturates for limits `validate` would reject.
    pub fn max_lead(&self) -> Duration {
        Duration::try_days(self.max_lead_days).unwrap_or(Duration::MAX)
    }
}
