//! Geographic coordinates and search areas.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair.
///
/// Latitude is always within `-90..=90` and longitude within `-180..=180`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create coordinates, checking both values are finite and in range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinate(format!("lat={lat}")));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinate(format!("lng={lon}")));
        }
        Ok(Self { lat, lon })
    }

    /// Parse coordinates from query string values.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuel_server::domain::Coordinates;
    ///
    /// let windhoek = Coordinates::parse("-22.56", "17.08").unwrap();
    /// assert_eq!(windhoek.lat, -22.56);
    ///
    /// assert!(Coordinates::parse("north", "17.08").is_err());
    /// assert!(Coordinates::parse("91", "0").is_err());
    /// ```
    pub fn parse(lat: &str, lng: &str) -> Result<Self, DomainError> {
        let lat_val: f64 = lat
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinate(format!("lat={lat}")))?;
        let lng_val: f64 = lng
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinate(format!("lng={lng}")))?;
        Self::new(lat_val, lng_val)
    }

    /// Great-circle distance to `other` in kilometres (haversine).
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// A circular search area: centre point plus radius in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    pub center: Coordinates,
    pub radius_m: f64,
}

impl SearchArea {
    /// Create a search area. The radius must be finite and strictly positive.
    pub fn new(center: Coordinates, radius_m: f64) -> Result<Self, DomainError> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(DomainError::InvalidRadius(radius_m.to_string()));
        }
        Ok(Self { center, radius_m })
    }

    /// Parse an optional radius string, falling back to `default_m`.
    pub fn with_radius_str(
        center: Coordinates,
        radius: Option<&str>,
        default_m: f64,
    ) -> Result<Self, DomainError> {
        let radius_m = match radius.map(str::trim).filter(|r| !r.is_empty()) {
            Some(r) => r
                .parse::<f64>()
                .map_err(|_| DomainError::InvalidRadius(r.to_string()))?,
            None => default_m,
        };
        Self::new(center, radius_m)
    }

    /// Whether `point` lies within the area.
    pub fn contains(&self, point: &Coordinates) -> bool {
        self.center.distance_km(point) * 1000.0 <= self.radius_m
    }
}
