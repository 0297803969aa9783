//! Domain types for the fuel price finder.
//!
//! This module contains validated value types shared by the gateway,
//! the price table and the web layer. Types that come from request input
//! check their invariants at construction time.

mod coords;
mod error;
mod fuel;
mod station;

pub use coords::{Coordinates, SearchArea};
pub use error::DomainError;
pub use fuel::{FuelType, PriceRecord, parse_price};
pub use station::{OsmKind, Station, StationId};
