//! Booking records as returned by the remote API, and their occurrences.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::occurrence::{parse_instant, BookingOccurrence};
use crate::recurrence::{expand_recurrence_between, expand_recurrence_with_exdates};

/// A `{ "dateTime": ... }` wrapper around an ISO-8601 instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDateTime {
    pub date_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingRecurrence {
    #[serde(default)]
    pub rrule: Option<String>,
    /// Starts of instances removed from the series, as ISO-8601 instants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exdates: Vec<String>,
}

/// An existing booking. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default)]
    pub resource_id: String,
    pub start: BookingDateTime,
    pub end: BookingDateTime,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub member: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub canceled: bool,
    #[serde(default)]
    pub tentative: bool,
    #[serde(default)]
    pub recurrence: Option<BookingRecurrence>,
    /// IANA timezone the recurrence is expanded in; UTC when absent.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Booking {
    fn rrule(&self) -> Option<&str> {
        self.recurrence
            .as_ref()
            .and_then(|r| r.rrule.as_deref())
            .filter(|r| !r.trim().is_empty())
    }

    fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or("UTC")
    }

    fn exdates(&self) -> Result<Vec<DateTime<FixedOffset>>> {
        self.recurrence
            .iter()
            .flat_map(|r| &r.exdates)
            .map(|d| parse_instant(d))
            .collect()
    }

    /// Concrete occurrences of this booking, at most `limit` of them, counted
    /// from its first start.
    ///
    /// Canceled bookings have none; one-off bookings have exactly one.
    pub fn occurrences(&self, limit: u16) -> Result<Vec<BookingOccurrence>> {
        if self.canceled || limit == 0 {
            return Ok(Vec::new());
        }
        let first = BookingOccurrence::parse(&self.start.date_time, &self.end.date_time)?;

        match self.rrule() {
            None => Ok(vec![first]),
            Some(rule) => expand_recurrence_with_exdates(
                rule,
                first.start,
                first.end - first.start,
                self.timezone(),
                limit,
                &self.exdates()?,
            ),
        }
    }

    /// Occurrences overlapping `[from, to)`, however long ago the series started.
    pub fn occurrences_between(
        &self,
        from: DateTime<FixedOffset>,
        to: DateTime<FixedOffset>,
    ) -> Result<Vec<BookingOccurrence>> {
        if self.canceled {
            return Ok(Vec::new());
        }
        let first = BookingOccurrence::parse(&self.start.date_time, &self.end.date_time)?;

        match self.rrule() {
            None if first.start < to && first.end > from => Ok(vec![first]),
            None => Ok(Vec::new()),
            Some(rule) => expand_recurrence_between(
                rule,
                first.start,
                first.end - first.start,
                self.timezone(),
                &self.exdates()?,
                from,
                to,
            ),
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.rrule().is_some()
    }
}

/// Flatten bookings into the occurrences that can land on `date`, skipping
/// canceled ones.
///
/// The range searched is padded by a day on each side, so every occurrence
/// starting on `date` on its own wall clock is included whatever its offset.
pub fn occurrences_from_bookings(
    bookings: &[Booking],
    date: NaiveDate,
) -> Result<Vec<BookingOccurrence>> {
    let (from, to) = padded_day(date);
    let mut occurrences = Vec::new();
    for booking in bookings {
        occurrences.extend(booking.occurrences_between(from, to)?);
    }
    Ok(occurrences)
}

fn padded_day(date: NaiveDate) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    let midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc().fixed_offset();
    let before = date.pred_opt().unwrap_or(date);
    let after = date.succ_opt().and_then(|d| d.succ_opt()).unwrap_or(date);
    (midnight(before), midnight(after))
}
