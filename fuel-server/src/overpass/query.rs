//! Overpass QL query construction.

use crate::domain::SearchArea;

/// OSM element types searched for fuel amenities.
const ELEMENT_TYPES: [&str; 3] = ["node", "way", "relation"];

/// Build the Overpass QL query for fuel stations within `area`.
///
/// Selects nodes, ways and relations tagged `amenity=fuel` within the radius
/// and asks for centre-point geometry so that non-point elements carry a
/// usable position. `timeout_secs` is the server-side query timeout.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::{Coordinates, SearchArea};
/// use fuel_server::overpass::build_query;
///
/// let area = SearchArea::new(Coordinates::new(-22.5, 17.0).unwrap(), 1000.0).unwrap();
/// let query = build_query(&area, 25);
/// assert!(query.starts_with("[out:json][timeout:25];"));
/// assert!(query.contains(r#"way["amenity"="fuel"](around:1000,-22.5,17);"#));
/// ```
pub fn build_query(area: &SearchArea, timeout_secs: u32) -> String {
    let around = format!(
        "(around:{},{},{})",
        area.radius_m, area.center.lat, area.center.lon
    );

    let selectors: String = ELEMENT_TYPES
        .iter()
        .map(|ty| format!("{ty}[\"amenity\"=\"fuel\"]{around};"))
        .collect();

    format!("[out:json][timeout:{timeout_secs}];({selectors});out center;")
}
