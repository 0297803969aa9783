//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{OsmKind, PriceRecord, Station};

/// Display name for stations without a `name` tag.
pub const UNKNOWN_NAME: &str = "Unknown Fuel Station";

/// Display brand for stations without a `brand` tag.
pub const UNKNOWN_BRAND: &str = "Unknown";

/// Display value for stations without an `opening_hours` tag.
pub const NO_OPENING_HOURS: &str = "N/A";

/// Query for nearby stations.
///
/// Fields are kept as raw strings so that missing and malformed values can
/// be reported with our own messages.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyRequest {
    pub lat: Option<String>,
    pub lng: Option<String>,

    /// Search radius in metres
    pub radius: Option<String>,

    /// `distance` orders nearest first; anything else keeps upstream order
    pub sort_by: Option<String>,
}

/// Query for the cheapest stations.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheapestRequest {
    pub lat: Option<String>,
    pub lng: Option<String>,

    /// `petrol` (default) or `diesel`
    pub fuel_type: Option<String>,

    /// Maximum number of stations to return
    pub limit: Option<String>,

    /// Search radius in metres
    pub radius: Option<String>,
}

/// Body of a price update.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceRequest {
    pub fuel_type: Option<String>,

    /// A JSON number or a numeric string
    pub price: Option<serde_json::Value>,

    /// Free-form reporter identity; logged only
    pub reported_by: Option<String>,
}

/// A station as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    pub osm_id: u64,
    pub osm_type: OsmKind,
    pub name: String,
    pub brand: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: String,
    pub opening_hours: String,
    pub petrol_price: Option<f64>,
    pub diesel_price: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,

    /// Kilometres from the search centre
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl StationResult {
    /// Render a domain station, filling display sentinels for missing tags.
    pub fn from_station(station: &Station) -> Self {
        Self {
            osm_id: station.osm_id.get(),
            osm_type: station.kind,
            name: station.name.clone().unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            brand: station
                .brand
                .clone()
                .unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
            latitude: station.coordinates.map(|c| c.lat),
            longitude: station.coordinates.map(|c| c.lon),
            address: station.address.clone(),
            opening_hours: station
                .opening_hours
                .clone()
                .unwrap_or_else(|| NO_OPENING_HOURS.to_string()),
            petrol_price: station.petrol_price,
            diesel_price: station.diesel_price,
            last_updated: station.last_updated,
            distance_km: station.distance_km,
        }
    }
}

/// Response for a successful price update.
#[derive(Debug, Serialize)]
pub struct UpdatePriceResponse {
    pub message: String,

    /// The station's record after the update
    pub station: PriceRecord,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, StationId};
    use serde_json::json;

    fn bare_station() -> Station {
        Station {
            osm_id: StationId::new(1),
            kind: OsmKind::Way,
            name: None,
            brand: None,
            coordinates: Some(Coordinates::new(-22.5, 17.0).unwrap()),
            address: String::new(),
            opening_hours: None,
            petrol_price: None,
            diesel_price: None,
            last_updated: None,
            distance_km: None,
        }
    }

    #[test]
    fn sentinels_for_missing_tags() {
        let result = StationResult::from_station(&bare_station());

        assert_eq!(result.name, UNKNOWN_NAME);
        assert_eq!(result.brand, UNKNOWN_BRAND);
        assert_eq!(result.opening_hours, NO_OPENING_HOURS);
    }

    #[test]
    fn wire_format() {
        let value = serde_json::to_value(StationResult::from_station(&bare_station())).unwrap();

        assert_eq!(
            value,
            json!({
                "osmId": 1,
                "osmType": "way",
                "name": "Unknown Fuel Station",
                "brand": "Unknown",
                "latitude": -22.5,
                "longitude": 17.0,
                "address": "",
                "openingHours": "N/A",
                "petrolPrice": null,
                "dieselPrice": null,
                "lastUpdated": null
            })
        );
    }

    #[test]
    fn distance_included_when_known() {
        let station = Station {
            distance_km: Some(1.5),
            ..bare_station()
        };
        let value = serde_json::to_value(StationResult::from_station(&station)).unwrap();
        assert_eq!(value["distanceKm"], json!(1.5));
    }

    #[test]
    fn tags_override_sentinels() {
        let station = Station {
            name: Some("Puma Katutura".into()),
            brand: Some("Puma".into()),
            opening_hours: Some("Mo-Su 06:00-22:00".into()),
            ..bare_station()
        };
        let result = StationResult::from_station(&station);
        assert_eq!(result.name, "Puma Katutura");
        assert_eq!(result.brand, "Puma");
        assert_eq!(result.opening_hours, "Mo-Su 06:00-22:00");
    }

    #[test]
    fn update_request_accepts_string_or_number_price() {
        let req: UpdatePriceRequest =
            serde_json::from_str(r#"{"fuelType": "diesel", "price": "14.20"}"#).unwrap();
        assert_eq!(req.fuel_type.as_deref(), Some("diesel"));
        assert_eq!(req.price, Some(json!("14.20")));

        let req: UpdatePriceRequest =
            serde_json::from_str(r#"{"fuelType": "petrol", "price": 12.5, "reportedBy": "u1"}"#)
                .unwrap();
        assert_eq!(req.price, Some(json!(12.5)));
        assert_eq!(req.reported_by.as_deref(), Some("u1"));
    }
}
