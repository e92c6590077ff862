//! Booking candidates and the validated request they become.

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::resource::ResourceType;

/// Who a booking is made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingTarget {
    Member(String),
    Team(String),
}

impl BookingTarget {
    fn to_json(&self) -> Value {
        match self {
            BookingTarget::Member(id) => json!({ "member": id }),
            BookingTarget::Team(id) => json!({ "team": id }),
        }
    }
}

/// An unvalidated booking request as built by a caller.
///
/// `start` and `end` keep the offset they were written with; office hours and
/// weekdays are judged on that wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCandidate {
    pub resource_id: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(flatten)]
    pub target: BookingTarget,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub free: bool,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
}

fn default_source() -> String {
    "website".to_string()
}

fn default_count() -> u32 {
    1
}

impl BookingCandidate {
    pub fn new(
        resource_id: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        target: BookingTarget,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            start,
            end,
            target,
            summary: summary.into(),
            description: None,
            source: default_source(),
            free: false,
            count: default_count(),
            office: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A candidate that passed every rule, ready to submit.
///
/// Only [`crate::validator`] constructs these.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBookingRequest {
    candidate: BookingCandidate,
    resource_name: String,
    resource_type: ResourceType,
}

impl ValidatedBookingRequest {
    pub(crate) fn new(
        candidate: BookingCandidate,
        resource_name: String,
        resource_type: ResourceType,
    ) -> Self {
        Self {
            candidate,
            resource_name,
            resource_type,
        }
    }

    pub fn candidate(&self) -> &BookingCandidate {
        &self.candidate
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn into_candidate(self) -> BookingCandidate {
        self.candidate
    }

    /// Body for the checkout and checkout-summary endpoints.
    pub fn checkout_payload(&self) -> Value {
        let c = &self.candidate;
        let mut body = json!({
            "office": c.office,
            "resourceId": c.resource_id,
            "start": date_time(&c.start),
            "end": date_time(&c.end),
            "source": c.source,
            "summary": c.summary,
            "description": c.description,
            "free": c.free,
            "count": c.count,
        });
        if let (Value::Object(body), Value::Object(target)) = (&mut body, c.target.to_json()) {
            body.extend(target);
        }
        body
    }

    /// Body for the booking-summary endpoint.
    pub fn summary_payload(&self) -> Value {
        let c = &self.candidate;
        json!({
            "booking": {
                "resourceId": c.resource_id,
                "start": date_time(&c.start),
                "end": date_time(&c.end),
            },
            "target": c.target.to_json(),
        })
    }
}

fn date_time(dt: &DateTime<FixedOffset>) -> Value {
    json!({ "dateTime": dt.to_rfc3339_opts(SecondsFormat::Secs, false) })
}
