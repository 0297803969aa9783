//! Station normalization, price merge and selection.
//!
//! Turns raw Overpass elements into client-facing stations joined with
//! reported prices, then optionally filters and orders them.

mod cheapest;
mod merge;

pub use cheapest::{DEFAULT_CHEAPEST_LIMIT, cheapest, sort_by_distance};
pub use merge::{build_address, element_ids, normalize, normalize_and_merge};
