//! Station identifiers and the normalized station record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coordinates, DomainError, FuelType};

/// An OpenStreetMap element id.
///
/// Price records are keyed by this id alone, regardless of whether the
/// element is a node, way or relation.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::StationId;
///
/// let id = StationId::parse("123456").unwrap();
/// assert_eq!(id.get(), 123456);
///
/// assert!(StationId::parse("abc").is_err());
/// assert!(StationId::parse("-1").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(u64);

impl StationId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Parse a station id from a path segment.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidStationId(s.to_string()))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The OSM geometry type an element came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsmKind {
    #[default]
    Node,
    Way,
    Relation,
}

/// A normalized fuel station joined with its reported prices.
///
/// Tag-derived text fields are `None` when the upstream element lacked the
/// tag; display sentinels are only applied when rendering for clients.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub osm_id: StationId,
    pub kind: OsmKind,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// Best-effort postal address; empty when no address tags are present.
    pub address: String,
    pub opening_hours: Option<String>,
    pub petrol_price: Option<f64>,
    pub diesel_price: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Distance from the search centre, when both points are known.
    pub distance_km: Option<f64>,
}

impl Station {
    /// Reported price for the given fuel.
    pub fn price(&self, fuel: FuelType) -> Option<f64> {
        match fuel {
            FuelType::Petrol => self.petrol_price,
            FuelType::Diesel => self.diesel_price,
        }
    }
}
