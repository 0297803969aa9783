//! Normalization of raw OSM elements into stations, joined with prices.
//!
//! Every element is accepted: missing tags and geometry degrade to `None`
//! fields rather than failing the whole batch.

use std::collections::HashMap;

use crate::domain::{Coordinates, PriceRecord, Station, StationId};
use crate::overpass::RawElement;

/// Build a best-effort address from OSM `addr:*` fragments.
///
/// Street and house number are joined with a space, then joined to the city
/// with `", "`. Missing or blank fragments are skipped, so no stray
/// separators are left behind.
///
/// # Examples
///
/// ```
/// use fuel_server::stations::build_address;
///
/// assert_eq!(build_address(Some("Independence Ave"), Some("12"), Some("Windhoek")),
///            "Independence Ave 12, Windhoek");
/// assert_eq!(build_address(None, None, Some("Windhoek")), "Windhoek");
/// assert_eq!(build_address(None, None, None), "");
/// ```
pub fn build_address(
    street: Option<&str>,
    housenumber: Option<&str>,
    city: Option<&str>,
) -> String {
    fn non_blank(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }

    let line: Vec<&str> = [non_blank(street), non_blank(housenumber)]
        .into_iter()
        .flatten()
        .collect();
    let line = line.join(" ");

    [Some(line.as_str()).filter(|l| !l.is_empty()), non_blank(city)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
        .trim()
        .to_string()
}

/// Normalize a single element, attaching its price record if any.
///
/// `center` is the search centre; when given and the element has a position,
/// the station's distance from it is filled in.
pub fn normalize(
    element: &RawElement,
    prices: Option<&PriceRecord>,
    center: Option<&Coordinates>,
) -> Station {
    let coordinates = element.position();
    let distance_km = center
        .zip(coordinates.as_ref())
        .map(|(c, pos)| c.distance_km(pos));

    let owned = |key: &str| element.tag(key).map(str::to_string);

    Station {
        osm_id: element.station_id(),
        kind: element.kind,
        name: owned("name"),
        brand: owned("brand"),
        coordinates,
        address: build_address(
            element.tag("addr:street"),
            element.tag("addr:housenumber"),
            element.tag("addr:city"),
        ),
        opening_hours: owned("opening_hours"),
        petrol_price: prices.and_then(|p| p.petrol_price),
        diesel_price: prices.and_then(|p| p.diesel_price),
        last_updated: prices.and_then(|p| p.last_updated),
        distance_km,
    }
}

/// Normalize all elements and join them with the price table.
///
/// Produces exactly one station per element, in input order.
pub fn normalize_and_merge(
    elements: &[RawElement],
    prices: &HashMap<StationId, PriceRecord>,
    center: Option<&Coordinates>,
) -> Vec<Station> {
    elements
        .iter()
        .map(|el| normalize(el, prices.get(&el.station_id()), center))
        .collect()
}

/// Distinct station ids referenced by `elements`, in first-seen order.
pub fn element_ids(elements: &[RawElement]) -> Vec<StationId> {
    let mut seen = std::collections::HashSet::new();
    elements
        .iter()
        .map(RawElement::station_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
