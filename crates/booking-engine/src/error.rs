//! Error types for booking-engine operations.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors from the engine's parsing and expansion paths.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A timestamp or date string that is not valid ISO-8601.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A working window that cannot produce slots.
    #[error("Invalid slot window: {0}")]
    InvalidWindow(String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;

/// Failure reported by a [`ResourceLookup`](crate::resource::ResourceLookup).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("resource '{0}' not found")]
    NotFound(String),

    /// Transport-class failures, mapped by the caller before they reach the validator.
    #[error("resource lookup unavailable: {0}")]
    Unavailable(String),
}

/// The rule a booking candidate violated, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationRule {
    NotBookableResource,
    StartAfterEnd,
    OnWeekend,
    InThePast,
    OutsideOfficeHours,
    TooLong,
    TooFarInFuture,
}

impl ValidationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationRule::NotBookableResource => "NotBookableResource",
            ValidationRule::StartAfterEnd => "StartAfterEnd",
            ValidationRule::OnWeekend => "OnWeekend",
            ValidationRule::InThePast => "InThePast",
            ValidationRule::OutsideOfficeHours => "OutsideOfficeHours",
            ValidationRule::TooLong => "TooLong",
            ValidationRule::TooFarInFuture => "TooFarInFuture",
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking candidate rejected by the first rule it violated.
///
/// Failures are permanent for the given input; nothing here is retryable.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}: {message}")]
pub struct ValidationFailure {
    pub kind: ValidationRule,
    pub message: String,
    /// Set when the resource lookup itself failed.
    #[source]
    pub cause: Option<LookupError>,
}

impl ValidationFailure {
    pub fn new(kind: ValidationRule, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: LookupError) -> Self {
        self.cause = Some(cause);
        self
    }
}

/// Errors from validating a create-member request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    #[error("{0} is not a valid datetime")]
    InvalidStartDate(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
