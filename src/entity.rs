// src/entity.rs
//! SensorThings data model, as far as the crawler cares about it.
//!
//! Entities themselves stay untyped (`serde_json::Map`); what is typed here is
//! the *vocabulary*: which entity types exist, which fields each one keeps
//! when projected, and which relations a Thing is walked through.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

pub const IOT_ID: &str = "@iot.id";
pub const IOT_SELF_LINK: &str = "@iot.selfLink";
pub const IOT_NEXT_LINK: &str = "@iot.nextLink";
pub const NAV_LINK_SUFFIX: &str = "@iot.navigationLink";
/// Collection responses carry their members under this key.
pub const COLLECTION_VALUE: &str = "value";

/// Observations hang off Datastreams rather than Things.
pub const OBSERVATIONS_NAV_LINK: &str = "Observations@iot.navigationLink";

/// Keys copied verbatim from a root Thing: (source key, tree node key).
/// Every one must be present.
pub const THING_REQUIRED: [(&str, &str); 5] = [
    (IOT_ID, "id"),
    ("name", "name"),
    ("description", "description"),
    ("properties", "properties"),
    ("restricted", "restricted"),
];

pub type Entity = Map<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityType {
    Things,
    Projects,
    Locations,
    HistoricalLocations,
    MultiDatastreams,
    Datastreams,
    Observations,
}

const DEFAULT_FIELDS: &[&str] = &[IOT_ID, IOT_SELF_LINK];

impl EntityType {
    pub const ALL: [EntityType; 7] = [
        EntityType::Things,
        EntityType::Projects,
        EntityType::Locations,
        EntityType::HistoricalLocations,
        EntityType::MultiDatastreams,
        EntityType::Datastreams,
        EntityType::Observations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Things => "Things",
            EntityType::Projects => "Projects",
            EntityType::Locations => "Locations",
            EntityType::HistoricalLocations => "HistoricalLocations",
            EntityType::MultiDatastreams => "MultiDatastreams",
            EntityType::Datastreams => "Datastreams",
            EntityType::Observations => "Observations",
        }
    }

    /// Allowlist kept by the projector, in output order.
    pub fn key_fields(self) -> &'static [&'static str] {
        match self {
            EntityType::Datastreams => &[
                IOT_ID, "name", "description", "unitOfMeasurement", "properties", "restricted",
            ],
            EntityType::Projects => &[IOT_ID, "name", "description", "properties"],
            EntityType::HistoricalLocations => &[IOT_ID, "time"],
            EntityType::Locations => &[IOT_ID, "name", "description", "location", "properties"],
            EntityType::MultiDatastreams => &[
                IOT_ID, "name", "description", "unitOfMeasurements", "properties", "restricted",
            ],
            EntityType::Observations => &[IOT_ID, "phenomenonTime", "resultTime", "result"],
            EntityType::Things => DEFAULT_FIELDS,
        }
    }

    /// Allowlist for a type given by name; unknown names get the id/self-link pair.
    pub fn key_fields_for(name: &str) -> &'static [&'static str] {
        name.parse::<EntityType>()
            .map(EntityType::key_fields)
            .unwrap_or(DEFAULT_FIELDS)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntityType(pub String);

impl fmt::Display for UnknownEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entity type: {}", self.0)
    }
}

impl std::error::Error for UnknownEntityType {}

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownEntityType(s.to_string()))
    }
}

/// Relations walked from a Thing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    HistoricalLocations,
    Locations,
    MultiDatastreams,
    Projects,
    Datastreams,
}

impl Relation {
    /// Traversal order; also the key order in a tree node.
    pub const ORDER: [Relation; 5] = [
        Relation::HistoricalLocations,
        Relation::Locations,
        Relation::MultiDatastreams,
        Relation::Projects,
        Relation::Datastreams,
    ];

    pub fn entity_type(self) -> EntityType {
        match self {
            Relation::HistoricalLocations => EntityType::HistoricalLocations,
            Relation::Locations => EntityType::Locations,
            Relation::MultiDatastreams => EntityType::MultiDatastreams,
            Relation::Projects => EntityType::Projects,
            Relation::Datastreams => EntityType::Datastreams,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.entity_type().as_str()
    }

    /// `"<Relation>@iot.navigationLink"`
    pub fn nav_link_key(self) -> String {
        format!("{}{NAV_LINK_SUFFIX}", self.as_str())
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short human label for an entity in logs and errors.
pub fn describe(entity: &Entity) -> String {
    match entity.get(IOT_ID) {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => "<no id>".to_string(),
    }
}
