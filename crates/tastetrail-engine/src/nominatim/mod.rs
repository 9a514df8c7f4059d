//! Primary place search backed by an OpenStreetMap Nominatim `/search` endpoint.

mod types;

use reqwest::{Client, Url};
use tastetrail_core::PlaceCandidate;

use crate::error::ProviderError;
use crate::http::{build_client, endpoint_url, get_json, RetryPolicy};
use crate::provider::{PlaceSearch, SearchArea};

pub use types::NominatimPlace;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Items requested per query. Nominatim caps this at 40.
const RESULT_LIMIT: u32 = 40;

/// [`PlaceSearch`] over Nominatim free-text search, bounded to the query area.
///
/// Transient errors (429, 5xx, network failures) are retried with exponential
/// backoff up to `max_retries` additional attempts.
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    search_url: Url,
    retry: RetryPolicy,
}

impl NominatimClient {
    /// Creates a client for the Nominatim instance at `base_url`.
    ///
    /// Public Nominatim instances require an identifying `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            search_url: endpoint_url(base_url, "search")?,
            retry: RetryPolicy {
                max_retries,
                backoff_base_ms,
            },
        })
    }

    fn request_url(&self, query_text: &str, area: &SearchArea) -> Url {
        let (south_west, north_east) = area.corners();
        let (mut west, mut east) = (south_west.longitude, north_east.longitude);
        // Nominatim orders viewbox edges itself, so a box over the antimeridian
        // is clipped to the half holding the centre.
        if area.crosses_antimeridian() {
            if area.center.longitude >= 0.0 {
                east = 180.0;
            } else {
                west = -180.0;
            }
            tracing::debug!(west, east, "clipped viewbox at the antimeridian");
        }
        let viewbox = format!(
            "{:.6},{:.6},{:.6},{:.6}",
            west, north_east.latitude, east, south_west.latitude
        );

        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query_text)
            .append_pair("format", "jsonv2")
            .append_pair("viewbox", &viewbox)
            .append_pair("bounded", "1")
            .append_pair("addressdetails", "1")
            .append_pair("extratags", "1")
            .append_pair("limit", &RESULT_LIMIT.to_string());
        url
    }
}

impl PlaceSearch for NominatimClient {
    async fn search(
        &self,
        query_text: &str,
        area: &SearchArea,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let url = self.request_url(query_text, area);
        let places: Vec<NominatimPlace> =
            get_json(&self.client, &url, None, "nominatim", self.retry).await?;

        let returned = places.len();
        let candidates: Vec<PlaceCandidate> = places
            .into_iter()
            .filter_map(NominatimPlace::into_candidate)
            .collect();
        if candidates.len() < returned {
            tracing::debug!(
                returned,
                usable = candidates.len(),
                "skipped nominatim items without usable name or coordinates"
            );
        }
        Ok(candidates)
    }
}
