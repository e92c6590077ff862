//! Booking-request validation.
//!
//! Rules run in a fixed order and the first violation wins:
//!
//! 1. resource bookability (the only rule that consults the [`ResourceLookup`])
//! 2. start strictly before end
//! 3. both endpoints on a weekday
//! 4. start not in the past
//! 5. start and end inside office hours
//! 6. duration within the maximum
//! 7. start within the maximum lead time
//!
//! Weekday and office-hour checks read the wall clock of the offset the
//! timestamps carry. Past and lead-time checks compare UTC instants.

use chrono::{DateTime, Datelike, Utc, Weekday};

use crate::candidate::{BookingCandidate, ValidatedBookingRequest};
use crate::error::{ValidationFailure, ValidationRule};
use crate::policy::BookingPolicy;
use crate::resource::{Resource, ResourceLookup};

type RuleResult = std::result::Result<(), ValidationFailure>;

/// Validate a candidate with the default policy against the system clock.
pub fn validate_booking<L>(
    candidate: &BookingCandidate,
    lookup: &L,
) -> Result<ValidatedBookingRequest, ValidationFailure>
where
    L: ResourceLookup + ?Sized,
{
    BookingValidator::default().validate(candidate, lookup)
}

/// Applies a [`BookingPolicy`] to booking candidates.
#[derive(Debug, Clone, Default)]
pub struct BookingValidator {
    policy: BookingPolicy,
}

impl BookingValidator {
    pub fn new(policy: BookingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    pub fn validate<L>(
        &self,
        candidate: &BookingCandidate,
        lookup: &L,
    ) -> Result<ValidatedBookingRequest, ValidationFailure>
    where
        L: ResourceLookup + ?Sized,
    {
        self.validate_at(candidate, lookup, Utc::now())
    }

    /// Validate as if the current instant were `now`.
    pub fn validate_at<L>(
        &self,
        candidate: &BookingCandidate,
        lookup: &L,
        now: DateTime<Utc>,
    ) -> Result<ValidatedBookingRequest, ValidationFailure>
    where
        L: ResourceLookup + ?Sized,
    {
        let resource = self.check_bookable(candidate, lookup)?;

        self.check_order(candidate)
            .and_then(|_| self.check_weekdays(candidate))
            .and_then(|_| self.check_not_past(candidate, now))
            .and_then(|_| self.check_office_hours(candidate))
            .and_then(|_| self.check_duration(candidate))
            .and_then(|_| self.check_lead_time(candidate, now))
            .inspect_err(|failure| {
                tracing::debug!(
                    resource_id = %candidate.resource_id,
                    rule = %failure.kind,
                    "booking candidate rejected: {}",
                    failure.message
                );
            })?;

        Ok(ValidatedBookingRequest::new(
            candidate.clone(),
            resource.name,
            resource.kind,
        ))
    }

    fn check_bookable<L>(
        &self,
        candidate: &BookingCandidate,
        lookup: &L,
    ) -> Result<Resource, ValidationFailure>
    where
        L: ResourceLookup + ?Sized,
    {
        let resource = lookup.lookup(&candidate.resource_id).map_err(|cause| {
            tracing::debug!(resource_id = %candidate.resource_id, %cause, "resource lookup failed");
            ValidationFailure::new(
                ValidationRule::NotBookableResource,
                format!("resource '{}' could not be resolved", candidate.resource_id),
            )
            .with_cause(cause)
        })?;

        if !self.policy.is_bookable(resource.kind) {
            tracing::debug!(
                resource_id = %candidate.resource_id,
                kind = %resource.kind,
                "resource type is not bookable"
            );
            return Err(ValidationFailure::new(
                ValidationRule::NotBookableResource,
                format!("{} ({}) is not a bookable resource", resource.name, resource.kind),
            ));
        }
        Ok(resource)
    }

    fn check_order(&self, candidate: &BookingCandidate) -> RuleResult {
        if candidate.start >= candidate.end {
            return Err(ValidationFailure::new(
                ValidationRule::StartAfterEnd,
                format!(
                    "start {} must be before end {}",
                    candidate.start, candidate.end
                ),
            ));
        }
        Ok(())
    }

    fn check_weekdays(&self, candidate: &BookingCandidate) -> RuleResult {
        for (label, dt) in [("start", candidate.start), ("end", candidate.end)] {
            if is_weekend(dt.weekday()) {
                return Err(ValidationFailure::new(
                    ValidationRule::OnWeekend,
                    format!("{label} {dt} falls on a {}", dt.weekday()),
                ));
            }
        }
        Ok(())
    }

    fn check_not_past(&self, candidate: &BookingCandidate, now: DateTime<Utc>) -> RuleResult {
        if candidate.start.with_timezone(&Utc) < now {
            return Err(ValidationFailure::new(
                ValidationRule::InThePast,
                format!("start {} is in the past", candidate.start),
            ));
        }
        Ok(())
    }

    fn check_office_hours(&self, candidate: &BookingCandidate) -> RuleResult {
        let open = self.policy.office_open;
        let close = self.policy.office_close;
        let start = candidate.start.time();
        let end = candidate.end.time();

        if start < open || end > close || candidate.start.date_naive() != candidate.end.date_naive()
        {
            return Err(ValidationFailure::new(
                ValidationRule::OutsideOfficeHours,
                format!(
                    "{} to {} is outside office hours {} to {}",
                    candidate.start.format("%Y-%m-%d %H:%M"),
                    candidate.end.format("%Y-%m-%d %H:%M"),
                    open.format("%H:%M"),
                    close.format("%H:%M"),
                ),
            ));
        }
        Ok(())
    }

    fn check_duration(&self, candidate: &BookingCandidate) -> RuleResult {
        let duration = candidate.duration();
        if duration > self.policy.max_duration() {
            return Err(ValidationFailure::new(
                ValidationRule::TooLong,
                format!(
                    "booking lasts {} minutes, limit is {}",
                    duration.num_minutes(),
                    self.policy.max_duration_minutes
                ),
            ));
        }
        Ok(())
    }

    fn check_lead_time(&self, candidate: &BookingCandidate, now: DateTime<Utc>) -> RuleResult {
        let lead = candidate.start.with_timezone(&Utc) - now;
        if lead > self.policy.max_lead() {
            return Err(ValidationFailure::new(
                ValidationRule::TooFarInFuture,
                format!(
                    "start {} is more than {} days ahead",
                    candidate.start, self.policy.max_lead_days
                ),
            ));
        }
        Ok(())
    }
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}
