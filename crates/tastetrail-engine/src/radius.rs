//! Authoritative radius inclusion test.

use tastetrail_core::{Coordinate, EnrichedPlace};

use crate::geodesy::geodesic_distance;

/// Annotate each place with its geodesic distance from `center` and drop the
/// ones farther than `radius_m`. The boundary is inclusive and input order is
/// preserved.
///
/// Places whose distance cannot be computed (non-finite coordinates) are
/// dropped.
#[must_use]
pub fn filter_by_radius(
    places: Vec<EnrichedPlace>,
    center: Coordinate,
    radius_m: f64,
) -> Vec<EnrichedPlace> {
    let total = places.len();
    let kept: Vec<EnrichedPlace> = places
        .into_iter()
        .filter_map(|mut place| {
            let distance = geodesic_distance(center, place.coordinate());
            if distance <= radius_m {
                place.distance_from_center = Some(distance);
                Some(place)
            } else {
                None
            }
        })
        .collect();

    tracing::debug!(
        radius_m,
        total,
        kept = kept.len(),
        "filtered places by geodesic radius"
    );
    kept
}

/// Order places nearest first. Stable, so equal distances keep their order;
/// places without a distance sort last.
pub fn rank_by_distance(places: &mut [EnrichedPlace]) {
    places.sort_by(|a, b| {
        let da = a.distance_from_center.unwrap_or(f64::INFINITY);
        let db = b.distance_from_center.unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    });
}
