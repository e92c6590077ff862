//! Recurring-booking expansion -- turns an RRULE into concrete occurrences.
//!
//! Wraps the `rrule` crate (v0.13) and `chrono-tz`. Instances are generated on
//! the wall clock of the booking's timezone, so a weekly 09:00 booking stays at
//! 09:00 across DST changes.

use chrono::{DateTime, Duration, FixedOffset};
use rrule::RRuleSet;

use crate::error::{BookingError, Result};
use crate::occurrence::BookingOccurrence;

/// Upper bound on instances generated for rules without COUNT or UNTIL.
pub const DEFAULT_EXPANSION_LIMIT: u16 = 500;

/// Expand a recurrence rule into occurrences of `duration` each.
///
/// # Arguments
/// - `rrule` -- RFC 5545 rule, with or without a leading `RRULE:` (e.g. "FREQ=WEEKLY;BYDAY=MO")
/// - `dtstart` -- first instance; only its instant matters, the wall clock comes from `timezone`
/// - `duration` -- length of every instance
/// - `timezone` -- IANA timezone (e.g. "Europe/London")
/// - `limit` -- maximum number of instances to generate
///
/// # Errors
/// Returns `BookingError::InvalidRule` if the rule is empty or unparseable.
/// Returns `BookingError::InvalidTimezone` if the timezone is not a valid IANA identifier.
pub fn expand_recurrence(
    rrule: &str,
    dtstart: DateTime<FixedOffset>,
    duration: Duration,
    timezone: &str,
    limit: u16,
) -> Result<Vec<BookingOccurrence>> {
    expand_recurrence_with_exdates(rrule, dtstart, duration, timezone, limit, &[])
}

/// Like [`expand_recurrence`], skipping the instances that start at one of `exdates`
/// (RFC 5545 EXDATE).
///
/// `limit` counts instances before exclusion, so each exclusion date widens
/// the cap by one.
pub fn expand_recurrence_with_exdates(
    rrule: &str,
    dtstart: DateTime<FixedOffset>,
    duration: Duration,
    timezone: &str,
    limit: u16,
    exdates: &[DateTime<FixedOffset>],
) -> Result<Vec<BookingOccurrence>> {
    let rule = normalize_rule(rrule)?;
    if limit == 0 {
        return Ok(Vec::new());
    }

    let rrule_set = build_rrule_set(rule, dtstart, timezone, exdates)?;
    let buffer = u16::try_from(exdates.len()).unwrap_or(u16::MAX);
    let instances = rrule_set.all(limit.saturating_add(buffer));
    tracing::debug!(
        rule,
        timezone,
        count = instances.dates.len(),
        limited = instances.limited,
        "expanded recurring booking"
    );

    let mut occurrences = to_occurrences(instances.dates, duration);
    occurrences.truncate(usize::from(limit));
    Ok(occurrences)
}

/// Expand only the instances overlapping `[from, to)`.
///
/// The series is walked from its first instance, but nothing before
/// `from - duration` is collected, so a rule that started years ago still
/// yields the instances inside the range. At most [`DEFAULT_EXPANSION_LIMIT`]
/// instances are returned.
///
/// # Errors
/// Same as [`expand_recurrence`].
pub fn expand_recurrence_between(
    rrule: &str,
    dtstart: DateTime<FixedOffset>,
    duration: Duration,
    timezone: &str,
    exdates: &[DateTime<FixedOffset>],
    from: DateTime<FixedOffset>,
    to: DateTime<FixedOffset>,
) -> Result<Vec<BookingOccurrence>> {
    let rule = normalize_rule(rrule)?;
    let rrule_set = build_rrule_set(rule, dtstart, timezone, exdates)?;
    if from >= to {
        return Ok(Vec::new());
    }

    let utc = rrule::Tz::Tz(chrono_tz::Tz::UTC);
    let earliest = from.checked_sub_signed(duration).unwrap_or(from);
    let instances = rrule_set
        .after(earliest.with_timezone(&utc))
        .before(to.with_timezone(&utc))
        .all(DEFAULT_EXPANSION_LIMIT);
    tracing::debug!(
        rule,
        timezone,
        %from,
        %to,
        count = instances.dates.len(),
        "expanded recurring booking in range"
    );

    Ok(to_occurrences(instances.dates, duration)
        .into_iter()
        .filter(|occ| occ.start < to && occ.end > from)
        .collect())
}

fn normalize_rule(rrule: &str) -> Result<&str> {
    let rule = rrule.trim();
    let rule = rule
        .strip_prefix("RRULE:")
        .or_else(|| rule.strip_prefix("rrule:"))
        .unwrap_or(rule);
    if rule.is_empty() {
        return Err(BookingError::InvalidRule("empty RRULE string".to_string()));
    }
    Ok(rule)
}

fn build_rrule_set(
    rule: &str,
    dtstart: DateTime<FixedOffset>,
    timezone: &str,
    exdates: &[DateTime<FixedOffset>],
) -> Result<RRuleSet> {
    let tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| BookingError::InvalidTimezone(timezone.to_string()))?;

    // DTSTART and EXDATE must be written on the rule's own wall clock.
    let ical = |dt: &DateTime<FixedOffset>| {
        dt.with_timezone(&tz)
            .naive_local()
            .format("%Y%m%dT%H%M%S")
            .to_string()
    };

    let mut rrule_text = format!(
        "DTSTART;TZID={}:{}\nRRULE:{}",
        timezone,
        ical(&dtstart),
        rule
    );
    if !exdates.is_empty() {
        let excluded: Vec<String> = exdates.iter().map(ical).collect();
        rrule_text.push_str(&format!("\nEXDATE;TZID={}:{}", timezone, excluded.join(",")));
    }

    rrule_text
        .parse()
        .map_err(|e| BookingError::InvalidRule(format!("{}", e)))
}

fn to_occurrences(
    dates: Vec<DateTime<rrule::Tz>>,
    duration: Duration,
) -> Vec<BookingOccurrence> {
    dates
        .into_iter()
        .map(|dt| {
            let start = dt.fixed_offset();
            BookingOccurrence::new(start, start + duration)
        })
        .collect()
}
