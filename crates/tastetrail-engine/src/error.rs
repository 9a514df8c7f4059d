use thiserror::Error;

/// Failure reported by a place-search or enrichment provider.
///
/// The engine never surfaces these to its caller: a failed primary query
/// contributes an empty region and a failed enrichment yields an unenriched
/// place.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {provider} (retry after {retry_after_secs}s)")]
    RateLimited {
        provider: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{provider} did not answer within {after_ms}ms")]
    Timeout { provider: String, after_ms: u64 },
}
