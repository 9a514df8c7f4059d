//! In-memory providers shared by the engine integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tastetrail_core::{Coordinate, EnrichmentResult, PlaceCandidate, SearchConfig};
use tastetrail_engine::{PlaceEnrichment, PlaceSearch, ProviderError, SearchArea};

pub const BERLIN: Coordinate = Coordinate::new(52.5200, 13.4050);

/// Primary provider answering every query through `respond`, recording each
/// queried area.
pub struct ScriptedPrimary<F> {
    respond: F,
    areas: Mutex<Vec<SearchArea>>,
}

impl<F> ScriptedPrimary<F>
where
    F: Fn(&SearchArea) -> Result<Vec<PlaceCandidate>, ProviderError> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            areas: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.areas.lock().unwrap().len()
    }

    pub fn areas(&self) -> Vec<SearchArea> {
        self.areas.lock().unwrap().clone()
    }
}

impl<F> PlaceSearch for ScriptedPrimary<F>
where
    F: Fn(&SearchArea) -> Result<Vec<PlaceCandidate>, ProviderError> + Send + Sync,
{
    async fn search(
        &self,
        _query_text: &str,
        area: &SearchArea,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        self.areas.lock().unwrap().push(*area);
        (self.respond)(area)
    }
}

/// Primary provider that returns the same candidates for every query.
pub fn fixed_primary(
    places: Vec<PlaceCandidate>,
) -> ScriptedPrimary<impl Fn(&SearchArea) -> Result<Vec<PlaceCandidate>, ProviderError> + Send + Sync>
{
    ScriptedPrimary::new(move |_: &SearchArea| Ok(places.clone()))
}

/// Enrichment provider answering through `respond` after an optional delay.
pub struct ScriptedEnrichment<F> {
    respond: F,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl<F> ScriptedEnrichment<F>
where
    F: Fn(&str) -> Result<Option<EnrichmentResult>, ProviderError> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl<F> PlaceEnrichment for ScriptedEnrichment<F>
where
    F: Fn(&str) -> Result<Option<EnrichmentResult>, ProviderError> + Send + Sync,
{
    async fn lookup(
        &self,
        name: &str,
        _coordinate: Coordinate,
    ) -> Result<Option<EnrichmentResult>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.respond)(name)
    }
}

pub fn rated(rating: f64) -> EnrichmentResult {
    EnrichmentResult {
        rating: Some(rating),
        review_count: Some(120),
        ..EnrichmentResult::default()
    }
}

pub fn server_error() -> ProviderError {
    ProviderError::UnexpectedStatus {
        status: 503,
        url: "http://fake/search".to_owned(),
    }
}

/// Default tuning without enrichment pacing, so tests do not depend on the
/// clock unless they opt in.
pub fn unpaced_config() -> SearchConfig {
    SearchConfig {
        enrichment_stagger: Duration::ZERO,
        ..SearchConfig::default()
    }
}

pub fn candidate(name: &str, coordinate: Coordinate) -> PlaceCandidate {
    PlaceCandidate {
        category: Some("restaurant".to_owned()),
        ..PlaceCandidate::named(name, coordinate)
    }
}
