//! Overpass API response DTOs.
//!
//! These types map directly to the Overpass `[out:json]` response. Overpass
//! omits fields rather than sending nulls: nodes carry `lat`/`lon`, while
//! ways and relations queried with `out center` carry a `center` object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, OsmKind, StationId};

/// Top-level Overpass JSON response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OverpassResponse {
    /// Matching elements, in the order Overpass returned them.
    #[serde(default)]
    pub elements: Vec<RawElement>,
}

/// A single OSM element as returned by Overpass.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawElement {
    /// Element geometry type. Missing in hand-written fixtures, so defaults to node.
    #[serde(rename = "type", default)]
    pub kind: OsmKind,

    /// OSM element id.
    pub id: u64,

    /// Direct latitude (nodes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    /// Direct longitude (nodes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,

    /// Centre point (ways and relations with `out center`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<RawCenter>,

    /// OSM tags. Absent entirely on untagged elements.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Centre point of a way or relation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RawCenter {
    pub lat: f64,
    pub lon: f64,
}

impl RawElement {
    pub fn station_id(&self) -> StationId {
        StationId::new(self.id)
    }

    /// Look up a tag, treating empty values as absent.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Position of the element.
    ///
    /// Uses the direct `lat`/`lon` fields when both are present, otherwise
    /// the centre point. Returns `None` if neither yields valid coordinates.
    pub fn position(&self) -> Option<Coordinates> {
        let direct = self.lat.zip(self.lon);
        let center = self.center.map(|c| (c.lat, c.lon));

        direct
            .and_then(|(lat, lon)| Coordinates::new(lat, lon).ok())
            .or_else(|| center.and_then(|(lat, lon)| Coordinates::new(lat, lon).ok()))
    }
}
