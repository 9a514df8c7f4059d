//! Coordinate arithmetic.
//!
//! [`offset`] is the flat-earth approximation used to place quadrant centres
//! and build query boxes. [`geodesic_distance`] is the authoritative
//! ellipsoidal distance used for radius inclusion.

use geo::{Distance, Geodesic, Point};
use tastetrail_core::Coordinate;

/// Approximate metres per degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Floor on `|cos(latitude)|` so longitude deltas stay finite near the poles.
const MIN_COS_LATITUDE: f64 = 1e-6;

/// Shift `center` by `lat_meters` north and `lon_meters` east.
///
/// Longitude spacing narrows with `cos(latitude)`; the cosine is clamped to a
/// minimum magnitude so a centre at or near a pole never yields `inf`/`NaN`.
/// The resulting longitude is wrapped into `[-180, 180)`.
#[must_use]
pub fn offset(center: Coordinate, lat_meters: f64, lon_meters: f64) -> Coordinate {
    let lat_delta = lat_meters / METERS_PER_DEGREE;
    let cos_lat = center.latitude.to_radians().cos();
    let cos_lat = if cos_lat.abs() < MIN_COS_LATITUDE {
        MIN_COS_LATITUDE.copysign(cos_lat)
    } else {
        cos_lat
    };
    let lon_delta = lon_meters / (METERS_PER_DEGREE * cos_lat);
    Coordinate::new(
        center.latitude + lat_delta,
        wrap_longitude(center.longitude + lon_delta),
    )
}

/// Bring `longitude` into `[-180, 180)`. In-range values are returned as is.
#[must_use]
pub fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Distance in metres between two coordinates on the WGS84 ellipsoid.
///
/// Returns `NaN` when either coordinate is non-finite.
#[must_use]
pub fn geodesic_distance(a: Coordinate, b: Coordinate) -> f64 {
    Geodesic.distance(
        Point::new(a.longitude, a.latitude),
        Point::new(b.longitude, b.latitude),
    )
}
