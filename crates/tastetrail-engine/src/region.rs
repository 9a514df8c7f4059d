//! One bounded-area search: primary query, then paced enrichment fan-out.

use futures::stream::{self, StreamExt};
use tastetrail_core::{EnrichedPlace, EnrichmentResult, PlaceCandidate, SearchConfig};

use crate::cuisine::classify;
use crate::error::ProviderError;
use crate::planner::SearchRegion;
use crate::provider::{PlaceEnrichment, PlaceSearch, SearchArea};
use crate::rate_limit::Pacer;

/// Runs a single region query and enriches every candidate it returns.
///
/// Borrowing everything keeps one searcher per `find_places` call cheap to
/// share across the quadrant fan-out.
pub struct RegionSearcher<'a, P, E> {
    primary: &'a P,
    enrichment: &'a E,
    config: &'a SearchConfig,
    pacer: &'a Pacer,
}

impl<'a, P, E> RegionSearcher<'a, P, E>
where
    P: PlaceSearch,
    E: PlaceEnrichment,
{
    #[must_use]
    pub fn new(
        primary: &'a P,
        enrichment: &'a E,
        config: &'a SearchConfig,
        pacer: &'a Pacer,
    ) -> Self {
        Self {
            primary,
            enrichment,
            config,
            pacer,
        }
    }

    /// Search the square of side `2 * region.radius_m` around `region.center`.
    ///
    /// At most `max_candidates_per_region` candidates are enriched, with at
    /// most `enrichment_concurrency` lookups in flight. Output order follows
    /// the primary provider's order. A failed or empty primary query yields an
    /// empty vec; a failed enrichment yields an unenriched place.
    pub async fn search(&self, region: SearchRegion) -> Vec<EnrichedPlace> {
        let area = SearchArea::square(region.center, region.radius_m);
        let mut candidates = match self.fetch_candidates(&area).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(
                    center = %region.center,
                    radius_m = region.radius_m,
                    error = %err,
                    "primary search failed; region contributes no places"
                );
                return Vec::new();
            }
        };

        let returned = candidates.len();
        candidates.truncate(self.config.max_candidates_per_region);
        candidates.retain(|c| {
            let named = !c.name.trim().is_empty();
            if !named {
                tracing::debug!(coordinate = %c.coordinate, "skipping unnamed candidate");
            }
            named
        });
        tracing::debug!(
            center = %region.center,
            radius_m = region.radius_m,
            returned,
            enriching = candidates.len(),
            "primary search complete"
        );

        stream::iter(candidates)
            .map(|candidate| self.enrich(candidate))
            .buffered(self.config.enrichment_concurrency.max(1))
            .collect()
            .await
    }

    async fn fetch_candidates(
        &self,
        area: &SearchArea,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let timeout = self.config.primary_timeout;
        tokio::time::timeout(timeout, self.primary.search(&self.config.query_text, area))
            .await
            .map_err(|_| ProviderError::Timeout {
                provider: "primary search".to_owned(),
                after_ms: duration_ms(timeout),
            })?
    }

    async fn enrich(&self, candidate: PlaceCandidate) -> EnrichedPlace {
        self.pacer.ready().await;
        let enrichment = self.lookup(&candidate).await;
        let cuisine_types = classify(candidate.category.as_deref(), &candidate.name);
        EnrichedPlace::new(
            candidate,
            enrichment,
            cuisine_types,
            self.config.identity_precision,
        )
    }

    async fn lookup(&self, candidate: &PlaceCandidate) -> Option<EnrichmentResult> {
        let timeout = self.config.enrichment_timeout;
        let outcome = tokio::time::timeout(
            timeout,
            self.enrichment.lookup(&candidate.name, candidate.coordinate),
        )
        .await;

        match outcome {
            Ok(Ok(Some(result))) => Some(result.sanitized()),
            Ok(Ok(None)) => {
                tracing::debug!(name = %candidate.name, "no enrichment match");
                None
            }
            Ok(Err(err)) => {
                tracing::warn!(name = %candidate.name, error = %err, "enrichment failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    name = %candidate.name,
                    timeout_ms = duration_ms(timeout),
                    "enrichment timed out"
                );
                None
            }
        }
    }
}

fn duration_ms(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
