//! Cheapest-stations selection and distance ordering.

use std::cmp::Ordering;

use crate::domain::{FuelType, Station};

/// Default number of stations returned by the cheapest query.
pub const DEFAULT_CHEAPEST_LIMIT: usize = 5;

/// Select the cheapest stations for `fuel`.
///
/// Stations without a reported price for `fuel`, or with a price that is not
/// strictly positive, are dropped entirely. The rest are sorted ascending by
/// that price (stable, so ties keep input order) and truncated to `limit`.
pub fn cheapest(stations: Vec<Station>, fuel: FuelType, limit: usize) -> Vec<Station> {
    let mut priced: Vec<(f64, Station)> = stations
        .into_iter()
        .filter_map(|s| {
            s.price(fuel)
                .filter(|p| p.is_finite() && *p > 0.0)
                .map(|p| (p, s))
        })
        .collect();

    priced.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    priced.truncate(limit);
    priced.into_iter().map(|(_, s)| s).collect()
}

/// Order stations by distance from the search centre, nearest first.
///
/// Stations with unknown distance go last. Stable, so equal distances keep
/// input order.
pub fn sort_by_distance(stations: &mut [Station]) {
    stations.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
