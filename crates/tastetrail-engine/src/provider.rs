//! Seams to the two external providers the engine consumes.

use std::future::Future;

use tastetrail_core::{Coordinate, EnrichmentResult, PlaceCandidate};

use crate::error::ProviderError;
use crate::geodesy::offset;

/// Rectangular query area handed to the primary provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    pub center: Coordinate,
    /// East-west extent in metres.
    pub width_m: f64,
    /// North-south extent in metres.
    pub height_m: f64,
}

impl SearchArea {
    /// Square of side `2 * radius_m` centred on `center`.
    #[must_use]
    pub fn square(center: Coordinate, radius_m: f64) -> Self {
        Self {
            center,
            width_m: radius_m * 2.0,
            height_m: radius_m * 2.0,
        }
    }

    /// South-west and north-east corners, using the flat offset approximation.
    ///
    /// When the area spans the antimeridian the south-west longitude is
    /// greater than the north-east one.
    #[must_use]
    pub fn corners(&self) -> (Coordinate, Coordinate) {
        let half_h = self.height_m / 2.0;
        let half_w = self.width_m / 2.0;
        (
            offset(self.center, -half_h, -half_w),
            offset(self.center, half_h, half_w),
        )
    }

    #[must_use]
    pub fn crosses_antimeridian(&self) -> bool {
        let (south_west, north_east) = self.corners();
        south_west.longitude > north_east.longitude
    }

    /// Whether `point` lies inside the area's corner box.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        let (south_west, north_east) = self.corners();
        let within_longitude = if south_west.longitude <= north_east.longitude {
            (south_west.longitude..=north_east.longitude).contains(&point.longitude)
        } else {
            point.longitude >= south_west.longitude || point.longitude <= north_east.longitude
        };
        (south_west.latitude..=north_east.latitude).contains(&point.latitude) && within_longitude
    }
}

/// Primary map search: one free-text query bounded to an area.
pub trait PlaceSearch: Send + Sync {
    /// Returns the provider's candidates for `query_text` inside `area`.
    fn search(
        &self,
        query_text: &str,
        area: &SearchArea,
    ) -> impl Future<Output = Result<Vec<PlaceCandidate>, ProviderError>> + Send;
}

/// Secondary business-review lookup for a single place.
pub trait PlaceEnrichment: Send + Sync {
    /// Best-match business for `name` near `coordinate`; `Ok(None)` when the
    /// provider has no match.
    fn lookup(
        &self,
        name: &str,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<Option<EnrichmentResult>, ProviderError>> + Send;
}

/// Enrichment provider that never matches. Used when no review-site
/// credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl PlaceEnrichment for NoEnrichment {
    async fn lookup(
        &self,
        _name: &str,
        _coordinate: Coordinate,
    ) -> Result<Option<EnrichmentResult>, ProviderError> {
        Ok(None)
    }
}
