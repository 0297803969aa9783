//! Fuel types and reported prices.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DomainError;

/// The fuel a price refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
}

impl FuelType {
    /// Parse a fuel type selector, ignoring case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuel_server::domain::FuelType;
    ///
    /// assert_eq!(FuelType::parse("Diesel").unwrap(), FuelType::Diesel);
    /// assert!(FuelType::parse("lpg").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "petrol" => Ok(FuelType::Petrol),
            "diesel" => Ok(FuelType::Diesel),
            _ => Err(DomainError::UnknownFuelType(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "petrol",
            FuelType::Diesel => "diesel",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a submitted price from a JSON value.
///
/// Accepts a JSON number or a string holding a number (`"14.20"`). No range
/// check is applied: zero and negative prices are stored as given.
pub fn parse_price(value: &serde_json::Value) -> Result<f64, DomainError> {
    let price = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    price
        .filter(|p| p.is_finite())
        .ok_or_else(|| DomainError::InvalidPrice(value.to_string()))
}

/// Crowd-sourced prices for one station.
///
/// Each field is independently optional; a record exists once any price
/// has been reported for the station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub petrol_price: Option<f64>,
    pub diesel_price: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl PriceRecord {
    /// Price for the given fuel, if one has been reported.
    pub fn price(&self, fuel: FuelType) -> Option<f64> {
        match fuel {
            FuelType::Petrol => self.petrol_price,
            FuelType::Diesel => self.diesel_price,
        }
    }

    /// Set the price for `fuel` and stamp the update time.
    ///
    /// The other fuel's price is left untouched.
    pub fn apply(&mut self, fuel: FuelType, price: f64, at: DateTime<Utc>) {
        match fuel {
            FuelType::Petrol => self.petrol_price = Some(price),
            FuelType::Diesel => self.diesel_price = Some(price),
        }
        self.last_updated = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn parse_fuel_type() {
        assert_eq!(FuelType::parse("petrol").unwrap(), FuelType::Petrol);
        assert_eq!(FuelType::parse(" DIESEL ").unwrap(), FuelType::Diesel);
        assert_eq!(
            FuelType::parse("kerosene"),
            Err(DomainError::UnknownFuelType("kerosene".into()))
        );
        assert!(FuelType::parse("").is_err());
    }

    #[test]
    fn fuel_type_default_is_petrol() {
        assert_eq!(FuelType::default(), FuelType::Petrol);
    }

    #[test]
    fn parse_price_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_price(&json!(12.5)).unwrap(), 12.5);
        assert_eq!(parse_price(&json!(13)).unwrap(), 13.0);
        assert_eq!(parse_price(&json!("14.20")).unwrap(), 14.2);
        assert_eq!(parse_price(&json!(" 9 ")).unwrap(), 9.0);
    }

    #[test]
    fn parse_price_keeps_zero_and_negative() {
        assert_eq!(parse_price(&json!(0)).unwrap(), 0.0);
        assert_eq!(parse_price(&json!("-3.5")).unwrap(), -3.5);
    }

    #[test]
    fn parse_price_rejects_non_numeric() {
        assert!(parse_price(&json!("cheap")).is_err());
        assert!(parse_price(&json!(true)).is_err());
        assert!(parse_price(&json!(null)).is_err());
        assert!(parse_price(&json!([1.0])).is_err());
        assert!(parse_price(&json!("inf")).is_err());
    }

    #[test]
    fn apply_sets_only_selected_fuel() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut record = PriceRecord::default();

        record.apply(FuelType::Diesel, 14.2, at);
        assert_eq!(record.diesel_price, Some(14.2));
        assert_eq!(record.petrol_price, None);
        assert_eq!(record.last_updated, Some(at));

        let later = Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap();
        record.apply(FuelType::Petrol, 12.5, later);
        assert_eq!(record.price(FuelType::Petrol), Some(12.5));
        assert_eq!(record.price(FuelType::Diesel), Some(14.2));
        assert_eq!(record.last_updated, Some(later));
    }

    #[test]
    fn apply_is_idempotent_apart_from_timestamp() {
        let t1 = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2026, 3, 1, 12, 5, 0).unwrap();

        let mut once = PriceRecord::default();
        once.apply(FuelType::Petrol, 12.5, t1);

        let mut twice = once.clone();
        twice.apply(FuelType::Petrol, 12.5, t2);

        assert_eq!(once.petrol_price, twice.petrol_price);
        assert_eq!(once.diesel_price, twice.diesel_price);
    }

    #[test]
    fn record_serializes_camel_case() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut record = PriceRecord::default();
        record.apply(FuelType::Petrol, 12.5, at);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["petrolPrice"], json!(12.5));
        assert_eq!(value["dieselPrice"], json!(null));
        assert_eq!(value["lastUpdated"], json!("2026-03-01T12:00:00Z"));
    }
}
