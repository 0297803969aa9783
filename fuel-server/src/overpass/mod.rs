//! Overpass gateway.
//!
//! Builds the fuel-amenity query for a search area, calls the Overpass API
//! and hands back raw OSM elements. Key characteristics:
//! - Nodes carry `lat`/`lon`; ways and relations carry a `center` point
//!   because the query asks for `out center`
//! - Tags are optional and free-form; normalization happens in `stations`
//! - Failures are reported as [`OverpassError`] and are never retried here

mod client;
mod error;
mod mock;
mod query;
mod types;

use futures::future::BoxFuture;

use crate::domain::SearchArea;

pub use client::{DEFAULT_BASE_URL, OverpassClient, OverpassConfig};
pub use error::OverpassError;
pub use mock::MockOverpass;
pub use query::build_query;
pub use types::{OverpassResponse, RawCenter, RawElement};

/// Source of raw fuel-station elements.
///
/// Abstracts over the live Overpass API and local fixtures so handlers can
/// be exercised without network access.
pub trait StationSource: Send + Sync {
    /// Fetch all fuel amenities within `area`.
    fn fetch_elements<'a>(
        &'a self,
        area: &'a SearchArea,
    ) -> BoxFuture<'a, Result<Vec<RawElement>, OverpassError>>;
}
