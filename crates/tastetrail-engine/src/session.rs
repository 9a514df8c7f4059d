//! Latest-wins wrapper for callers that fire searches in quick succession.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tastetrail_core::{Coordinate, EnrichedPlace};
use tokio_util::sync::CancellationToken;

use crate::coordinator::SearchCoordinator;
use crate::provider::{PlaceEnrichment, PlaceSearch};

/// Result of one [`SearchSession::search`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Completed(Vec<EnrichedPlace>),
    /// A newer search (or an explicit cancel) arrived before this one
    /// finished. Its results were discarded.
    Superseded,
}

/// Serialises a stream of searches so that only the most recent one can
/// deliver results.
///
/// Every call to [`search`](Self::search) cancels the call before it. An
/// optional debounce delays the provider work so a burst of calls (a radius
/// slider being dragged) costs a single search.
#[derive(Debug)]
pub struct SearchSession<P, E> {
    coordinator: SearchCoordinator<P, E>,
    debounce: Duration,
    generation: AtomicU64,
    current: Mutex<CancellationToken>,
}

impl<P, E> SearchSession<P, E>
where
    P: PlaceSearch,
    E: PlaceEnrichment,
{
    #[must_use]
    pub fn new(coordinator: SearchCoordinator<P, E>) -> Self {
        Self {
            coordinator,
            debounce: Duration::ZERO,
            generation: AtomicU64::new(0),
            current: Mutex::new(CancellationToken::new()),
        }
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn coordinator(&self) -> &SearchCoordinator<P, E> {
        &self.coordinator
    }

    /// Number of searches started so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Supersede whatever search is in flight without starting a new one.
    pub fn cancel(&self) {
        self.lock_current().cancel();
    }

    /// Start a search, superseding any earlier call on this session.
    pub async fn search(&self, center: Coordinate, radius_m: f64) -> SearchOutcome {
        let token = CancellationToken::new();
        let generation = {
            let mut current = self.lock_current();
            current.cancel();
            *current = token.clone();
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        if !self.debounce.is_zero() {
            tokio::select! {
                biased;
                () = token.cancelled() => return self.superseded(generation),
                () = tokio::time::sleep(self.debounce) => {}
            }
        }

        let places = tokio::select! {
            biased;
            () = token.cancelled() => return self.superseded(generation),
            places = self.coordinator.find_places(center, radius_m) => places,
        };

        if self.generation() != generation {
            return self.superseded(generation);
        }
        SearchOutcome::Completed(places)
    }

    fn superseded(&self, generation: u64) -> SearchOutcome {
        tracing::debug!(
            generation,
            latest = self.generation(),
            "search superseded before completion"
        );
        SearchOutcome::Superseded
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, CancellationToken> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use tastetrail_core::{PlaceCandidate, SearchConfig};

    use crate::error::ProviderError;
    use crate::provider::{NoEnrichment, SearchArea};

    const BERLIN: Coordinate = Coordinate::new(52.5200, 13.4050);

    struct SlowPrimary {
        delay: Duration,
        calls: AtomicUsize,
    }

    impl PlaceSearch for SlowPrimary {
        async fn search(
            &self,
            _query_text: &str,
            area: &SearchArea,
        ) -> Result<Vec<PlaceCandidate>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(vec![PlaceCandidate::named("Curry 36", area.center)])
        }
    }

    fn session(delay_ms: u64) -> SearchSession<SlowPrimary, NoEnrichment> {
        let primary = SlowPrimary {
            delay: Duration::from_millis(delay_ms),
            calls: AtomicUsize::new(0),
        };
        SearchSession::new(SearchCoordinator::new(
            primary,
            NoEnrichment,
            SearchConfig::default(),
        ))
    }

    fn primary_calls(session: &SearchSession<SlowPrimary, NoEnrichment>) -> usize {
        session.coordinator().primary().calls.load(Ordering::SeqCst)
    }

    #[tokio::test(start_paused = true)]
    async fn single_search_completes() {
        let session = session(200);
        let outcome = session.search(BERLIN, 500.0).await;
        let SearchOutcome::Completed(places) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(places.len(), 1);
        assert_eq!(session.generation(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_search_supersedes_older_one() {
        let session = session(200);
        let first = session.search(BERLIN, 500.0);
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            session.search(BERLIN, 400.0).await
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first, SearchOutcome::Superseded);
        assert!(matches!(second, SearchOutcome::Completed(ref p) if p.len() == 1));
        assert_eq!(session.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_collapses_a_burst_into_one_provider_call() {
        let session = session(10).with_debounce(Duration::from_millis(1500));
        let burst = async {
            let mut outcomes = Vec::new();
            for radius in [300.0, 400.0, 500.0] {
                outcomes.push(session.search(BERLIN, radius));
            }
            futures::future::join_all(outcomes).await
        };

        let outcomes = burst.await;
        assert_eq!(outcomes[0], SearchOutcome::Superseded);
        assert_eq!(outcomes[1], SearchOutcome::Superseded);
        assert!(matches!(outcomes[2], SearchOutcome::Completed(_)));
        assert_eq!(primary_calls(&session), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_cancel_supersedes_in_flight_search() {
        let session = session(500);
        let search = session.search(BERLIN, 500.0);
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.cancel();
        };

        let (outcome, ()) = tokio::join!(search, cancel);
        assert_eq!(outcome, SearchOutcome::Superseded);
    }

    #[tokio::test(start_paused = true)]
    async fn search_after_a_superseded_one_runs_normally() {
        let session = session(100);
        session.cancel();
        let outcome = session.search(BERLIN, 500.0).await;
        assert!(matches!(outcome, SearchOutcome::Completed(_)));
    }
}
