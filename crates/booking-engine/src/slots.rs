//! Free time slots for one resource on one day.
//!
//! The working window is cut into interval-sized slots labelled "HH:MM".
//! Every occurrence that starts on the target date is snapped outward to slot
//! boundaries (start down, end up), so a partial overlap blocks the whole slot.
//! Whatever is left uncovered is available.

use std::collections::HashSet;
use std::fmt;

use chrono::{FixedOffset, NaiveDate, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::error::{BookingError, Result};
use crate::occurrence::BookingOccurrence;

const SECS_PER_MINUTE: i64 = 60;

/// Working hours `[start_hour, end_hour)` cut into `interval_minutes` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    start_hour: u32,
    end_hour: u32,
    interval_minutes: u32,
}

impl Default for SlotWindow {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            interval_minutes: 60,
        }
    }
}

impl SlotWindow {
    pub fn new(start_hour: u32, end_hour: u32, interval_minutes: u32) -> Result<Self> {
        if interval_minutes == 0 {
            return Err(BookingError::InvalidWindow(
                "interval must be at least one minute".to_string(),
            ));
        }
        if end_hour > 24 {
            return Err(BookingError::InvalidWindow(format!(
                "end hour {} is past midnight",
                end_hour
            )));
        }
        if start_hour > end_hour {
            return Err(BookingError::InvalidWindow(format!(
                "start hour {} is after end hour {}",
                start_hour, end_hour
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
            interval_minutes,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    fn start_secs(&self) -> i64 {
        i64::from(self.start_hour) * 3600
    }

    fn end_secs(&self) -> i64 {
        i64::from(self.end_hour) * 3600
    }

    fn step_secs(&self) -> i64 {
        i64::from(self.interval_minutes) * SECS_PER_MINUTE
    }

    /// Every slot start in the window, as seconds after midnight.
    fn slot_starts(&self) -> impl Iterator<Item = i64> {
        let end = self.end_secs();
        let step = self.step_secs();
        std::iter::successors(Some(self.start_secs()), move |s| Some(s + step))
            .take_while(move |s| *s < end)
    }

    /// Slot starts covered by `occ`, snapped outward and clamped to the window.
    fn covered(&self, occ: &BookingOccurrence, date: NaiveDate) -> Vec<i64> {
        let midnight = date.and_time(NaiveTime::MIN);
        let offset: FixedOffset = *occ.start.offset();
        let start = (occ.start.naive_local() - midnight).num_seconds();
        let end = (occ.end.with_timezone(&offset).naive_local() - midnight).num_seconds();

        let origin = self.start_secs();
        let step = self.step_secs();
        let snapped_start = origin + (start - origin).div_euclid(step) * step;
        let snapped_end = origin + (end - origin + step - 1).div_euclid(step) * step;

        let first = snapped_start.max(origin);
        let last = snapped_end.min(self.end_secs());
        std::iter::successors(Some(first), move |s| Some(s + step))
            .take_while(move |s| *s < last)
            .collect()
    }
}

/// One free, interval-sized slot; displays and serializes as "HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    pub fn start(&self) -> NaiveTime {
        self.0
    }

    pub fn label(&self) -> String {
        self.to_string()
    }

    fn from_secs(secs: i64) -> Option<Self> {
        let secs = u32::try_from(secs).ok()?;
        NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).map(TimeSlot)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Compute the free slots on `date`, in window order.
///
/// Only occurrences whose start falls on `date` (on their own wall clock) are
/// considered. Overlapping occurrences need no merging: covered slots are
/// removed as a set.
pub fn compute_available_slots(
    occurrences: &[BookingOccurrence],
    date: NaiveDate,
    window: &SlotWindow,
) -> Vec<TimeSlot> {
    let busy: HashSet<i64> = occurrences
        .iter()
        .filter(|occ| occ.start.date_naive() == date)
        .flat_map(|occ| window.covered(occ, date))
        .collect();

    tracing::trace!(%date, busy = busy.len(), "computing available slots");

    window
        .slot_starts()
        .filter(|s| !busy.contains(s))
        .filter_map(TimeSlot::from_secs)
        .collect()
}

/// Like [`compute_available_slots`], for occurrences still in string form.
///
/// # Errors
/// Returns `BookingError::MalformedInput` for the first timestamp that is not
/// an ISO-8601 instant.
pub fn compute_available_slots_from_iso(
    occurrences: &[(&str, &str)],
    date: NaiveDate,
    window: &SlotWindow,
) -> Result<Vec<TimeSlot>> {
    let parsed = occurrences
        .iter()
        .map(|(start, end)| BookingOccurrence::parse(start, end))
        .collect::<Result<Vec<_>>>()?;
    Ok(compute_available_slots(&parsed, date, window))
}
