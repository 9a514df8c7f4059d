//! Top-level search entry point.

use futures::future::join_all;
use tastetrail_core::{Coordinate, EnrichedPlace, SearchConfig};

use crate::dedup::merge;
use crate::planner::plan;
use crate::provider::{PlaceEnrichment, PlaceSearch};
use crate::radius::{self, rank_by_distance};
use crate::rate_limit::Pacer;
use crate::region::RegionSearcher;

/// Runs a complete search: planning, region fan-out, deduplication, radius
/// filtering and ranking.
///
/// The coordinator holds no per-search state, so one instance can serve any
/// number of sequential or concurrent `find_places` calls.
#[derive(Debug)]
pub struct SearchCoordinator<P, E> {
    primary: P,
    enrichment: E,
    config: SearchConfig,
}

impl<P, E> SearchCoordinator<P, E>
where
    P: PlaceSearch,
    E: PlaceEnrichment,
{
    #[must_use]
    pub fn new(primary: P, enrichment: E, config: SearchConfig) -> Self {
        Self {
            primary,
            enrichment,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[must_use]
    pub fn primary(&self) -> &P {
        &self.primary
    }

    #[must_use]
    pub fn enrichment(&self) -> &E {
        &self.enrichment
    }

    /// Find places within `radius_m` metres of `center`, nearest first.
    ///
    /// Never fails: provider errors are logged and shrink the result, and an
    /// empty vec is a normal outcome. Dropping the returned future cancels
    /// every in-flight provider call.
    pub async fn find_places(&self, center: Coordinate, radius_m: f64) -> Vec<EnrichedPlace> {
        if !center.is_finite() || !radius_m.is_finite() || radius_m <= 0.0 {
            tracing::warn!(%center, radius_m, "ignoring search with invalid centre or radius");
            return Vec::new();
        }

        let regions = plan(center, radius_m, &self.config);
        let pacer = Pacer::new(self.config.enrichment_stagger);
        let searcher = RegionSearcher::new(&self.primary, &self.enrichment, &self.config, &pacer);

        let collected = match regions.as_slice() {
            [single] => searcher.search(*single).await,
            quadrants => {
                tracing::debug!(
                    %center,
                    radius_m,
                    regions = quadrants.len(),
                    "splitting search into quadrants"
                );
                let per_region =
                    join_all(quadrants.iter().map(|region| searcher.search(*region))).await;
                merge(per_region)
            }
        };

        let mut places = radius::filter_by_radius(collected, center, radius_m);
        rank_by_distance(&mut places);
        tracing::info!(%center, radius_m, places = places.len(), "search complete");
        places
    }

    /// Re-filter an already fetched superset against a new centre or radius
    /// without querying any provider. Input order is preserved.
    #[must_use]
    pub fn filter_by_radius(
        &self,
        places: Vec<EnrichedPlace>,
        center: Coordinate,
        radius_m: f64,
    ) -> Vec<EnrichedPlace> {
        radius::filter_by_radius(places, center, radius_m)
    }
}
