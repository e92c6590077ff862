//! Bookable resources and the lookup capability the validator consumes.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Kind of space a resource represents, as named by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MeetingRoom,
    TeamRoom,
    DeskTr,
    Desk,
    Hotdesk,
    HdDaily,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::MeetingRoom => "meeting_room",
            ResourceType::TeamRoom => "team_room",
            ResourceType::DeskTr => "desk_tr",
            ResourceType::Desk => "desk",
            ResourceType::Hotdesk => "hotdesk",
            ResourceType::HdDaily => "hd_daily",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource record. Only `kind` and `name` matter to validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    /// IANA timezone of the resource's office.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ResourceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            office: None,
            timezone: None,
        }
    }
}

/// Fetch a resource by id.
///
/// Implementations own any I/O; network or auth failures should be mapped to
/// [`LookupError::Unavailable`] before returning.
pub trait ResourceLookup {
    fn lookup(&self, resource_id: &str) -> Result<Resource, LookupError>;
}

impl<F> ResourceLookup for F
where
    F: Fn(&str) -> Result<Resource, LookupError>,
{
    fn lookup(&self, resource_id: &str) -> Result<Resource, LookupError> {
        self(resource_id)
    }
}

/// In-memory resource lookup, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: HashMap<String, Resource>,
}

impl ResourceCatalog {
    pub fn new(resources: impl IntoIterator<Item = Resource>) -> Self {
        Self {
            resources: resources.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    /// Build a catalog from a JSON array of resource records.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let resources: Vec<Resource> = serde_json::from_str(json)?;
        Ok(Self::new(resources))
    }

    pub fn insert(&mut self, resource: Resource) {
        self.resources.insert(resource.id.clone(), resource);
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceLookup for ResourceCatalog {
    fn lookup(&self, resource_id: &str) -> Result<Resource, LookupError> {
        self.resources
            .get(resource_id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(resource_id.to_string()))
    }
}
