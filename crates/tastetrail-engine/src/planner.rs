//! Quadrant decomposition for large search radii.
//!
//! The primary provider caps results per query, so a wide search is split
//! into four overlapping sub-regions whose centres sit diagonally off the
//! original centre. Adjacent quadrants overlap around the centre; duplicates
//! from the overlap are collapsed later by identity key.

use tastetrail_core::{Coordinate, SearchConfig};

use crate::geodesy::offset;

/// One bounded query: a centre and the radius whose square gets searched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRegion {
    pub center: Coordinate,
    pub radius_m: f64,
}

/// Quadrant direction as `(north sign, east sign)`.
const QUADRANT_SIGNS: [(f64, f64); 4] = [
    (1.0, 1.0),   // north-east
    (1.0, -1.0),  // north-west
    (-1.0, 1.0),  // south-east
    (-1.0, -1.0), // south-west
];

/// Plan the regions to query for a search of `radius_m` around `center`.
///
/// Radii at or below `split_threshold_m` yield the single region
/// `(center, radius_m)`. Larger radii yield four quadrants (NE, NW, SE, SW),
/// each offset by `quadrant_offset_factor * radius_m` on both axes and
/// searched with `quadrant_radius_factor * radius_m`.
#[must_use]
pub fn plan(center: Coordinate, radius_m: f64, config: &SearchConfig) -> Vec<SearchRegion> {
    if radius_m <= config.split_threshold_m {
        return vec![SearchRegion {
            center,
            radius_m,
        }];
    }

    let shift = radius_m * config.quadrant_offset_factor;
    let sub_radius = radius_m * config.quadrant_radius_factor;
    QUADRANT_SIGNS
        .iter()
        .map(|&(north, east)| SearchRegion {
            center: offset(center, north * shift, east * shift),
            radius_m: sub_radius,
        })
        .collect()
}
