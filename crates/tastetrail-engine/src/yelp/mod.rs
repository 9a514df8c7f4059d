//! Enrichment backed by the Yelp Fusion business search API.

mod types;

use reqwest::{Client, Url};
use tastetrail_core::{Coordinate, EnrichmentResult};

use crate::error::ProviderError;
use crate::http::{build_client, endpoint_url, get_json, RetryPolicy};
use crate::provider::PlaceEnrichment;

pub use types::{menu_hints, Business, BusinessCategory, BusinessSearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";

/// Match radius around the place, in metres.
const MATCH_RADIUS_M: u32 = 200;

/// [`PlaceEnrichment`] via a single best-match `/businesses/search` call.
pub struct YelpClient {
    client: Client,
    search_url: Url,
    api_key: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for YelpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YelpClient")
            .field("search_url", &self.search_url.as_str())
            .field("api_key", &"[redacted]")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl YelpClient {
    /// Creates a client authenticating with `api_key` as a bearer token.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            search_url: endpoint_url(base_url, "businesses/search")?,
            api_key: api_key.to_owned(),
            retry: RetryPolicy {
                max_retries,
                backoff_base_ms,
            },
        })
    }

    fn request_url(&self, name: &str, coordinate: Coordinate) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("term", name)
            .append_pair("latitude", &coordinate.latitude.to_string())
            .append_pair("longitude", &coordinate.longitude.to_string())
            .append_pair("radius", &MATCH_RADIUS_M.to_string())
            .append_pair("limit", "1")
            .append_pair("categories", "restaurants,food");
        url
    }
}

impl PlaceEnrichment for YelpClient {
    async fn lookup(
        &self,
        name: &str,
        coordinate: Coordinate,
    ) -> Result<Option<EnrichmentResult>, ProviderError> {
        let url = self.request_url(name, coordinate);
        let response: BusinessSearchResponse =
            get_json(&self.client, &url, Some(self.api_key.as_str()), "yelp", self.retry).await?;

        let Some(business) = response.businesses.into_iter().next() else {
            return Ok(None);
        };
        tracing::debug!(
            query = name,
            matched = business.name.as_deref().unwrap_or(""),
            rating = ?business.rating,
            "yelp match"
        );
        Ok(Some(business.into_enrichment()))
    }
}
