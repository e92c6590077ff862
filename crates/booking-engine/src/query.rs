//! Query strings for resource listings.
//!
//! Filters keep the order they were added in. Values are percent-encoded;
//! parameter names are written as-is since they include `$` operators.

use std::fmt::Write;

use crate::resource::ResourceType;

/// A resource-listing filter parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceParam {
    Name,
    NameStartsWith,
    NameStartsWithInsensitive,
    NameEndsWith,
    NameEndsWithInsensitive,
    NameContains,
    NameContainsInsensitive,
    Type,
    AvailableFrom,
    AvailableTo,
    Office,
}

impl ResourceParam {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceParam::Name => "name",
            ResourceParam::NameStartsWith => "name.$sw",
            ResourceParam::NameStartsWithInsensitive => "name.$swi",
            ResourceParam::NameEndsWith => "name.$ew",
            ResourceParam::NameEndsWithInsensitive => "name.$ewi",
            ResourceParam::NameContains => "name.$cs",
            ResourceParam::NameContainsInsensitive => "name.$csi",
            ResourceParam::Type => "type",
            ResourceParam::AvailableFrom => "availableFrom",
            ResourceParam::AvailableTo => "availableTo",
            ResourceParam::Office => "office",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceQuery {
    filters: Vec<(ResourceParam, String)>,
}

impl ResourceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, param: ResourceParam, value: impl Into<String>) -> Self {
        self.filters.push((param, value.into()));
        self
    }

    pub fn office(self, office: impl Into<String>) -> Self {
        self.filter(ResourceParam::Office, office)
    }

    pub fn kind(self, kind: ResourceType) -> Self {
        self.filter(ResourceParam::Type, kind.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// `p1=v1&p2=v2`, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (i, (param, value)) in self.filters.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(param.as_str());
            out.push('=');
            out.push_str(&percent_encode(value));
        }
        out
    }

    /// Append the query to `url`, adding `?` only when the url lacks one.
    pub fn append_to(&self, url: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            return url.to_string();
        }
        match url.find('?') {
            None => format!("{}?{}", url, query),
            Some(i) if i + 1 == url.len() || url.ends_with('&') => format!("{}{}", url, query),
            Some(_) => format!("{}&{}", url, query),
        }
    }
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}
