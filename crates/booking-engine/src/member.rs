//! Create-member requests and their field checks.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::MemberError;

// Anchored at the start only: anything after a well-formed prefix is accepted.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("Invalid regex"));

static DATE_TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})T(\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?)(?:Z|[+-]\d{2}:\d{2})?$")
        .expect("Invalid regex")
});

/// Body of a create-member call. `team` makes it a team-member request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    pub start_date: String,
    pub office: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl MemberRequest {
    pub fn validate(&self) -> Result<(), MemberError> {
        for (field, value) in [("office", &self.office), ("name", &self.name)] {
            if value.trim().is_empty() {
                return Err(MemberError::MissingField(field));
            }
        }
        if !is_email(&self.email) {
            return Err(MemberError::InvalidEmail(self.email.clone()));
        }
        if !is_iso8601_date_time(&self.start_date) {
            return Err(MemberError::InvalidStartDate(self.start_date.clone()));
        }
        Ok(())
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` with an optional `Z` or `±HH:MM` suffix,
/// naming a real calendar date and clock time.
pub fn is_iso8601_date_time(value: &str) -> bool {
    let Some(caps) = DATE_TIME_PATTERN.captures(value) else {
        return false;
    };
    let date_ok = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").is_ok();
    let time = &caps[2];
    let time_ok = NaiveTime::parse_from_str(time, "%H:%M:%S%.f").is_ok()
        || NaiveTime::parse_from_str(time, "%H:%M").is_ok();
    date_ok && time_ok
}
