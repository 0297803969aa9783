//! Domain error types.
//!
//! These errors represent validation failures on values coming in from
//! requests. They are distinct from upstream/IO errors.

/// Domain-level errors for request value validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude or longitude is not a number or is out of range
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Fuel type is neither petrol nor diesel
    #[error("unknown fuel type: {0}")]
    UnknownFuelType(String),

    /// Price is not a number
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Station id is not a non-negative integer
    #[error("invalid station id: {0}")]
    InvalidStationId(String),

    /// Search radius is not a positive number
    #[error("invalid radius: {0}")]
    InvalidRadius(String),

    /// Result limit is not a non-negative integer
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}
