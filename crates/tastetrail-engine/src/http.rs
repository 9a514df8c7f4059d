//! Plumbing shared by the HTTP provider clients.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::rate_limit::retry_with_backoff;

/// Retry settings carried by every HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `backoff_base_ms * 2^attempt`.
    pub backoff_base_ms: u64,
}

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parses `base_url` and appends `endpoint` to its path.
///
/// The base is normalised to end with exactly one slash first, so a base with
/// a path prefix (`https://api.yelp.com/v3`) keeps that prefix.
pub(crate) fn endpoint_url(base_url: &str, endpoint: &str) -> Result<Url, ProviderError> {
    let invalid = |reason: String| ProviderError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_owned()));
    }
    base.join(endpoint).map_err(|e| invalid(e.to_string()))
}

/// GET `url` and decode the JSON body, retrying transient failures.
///
/// # Errors
///
/// - [`ProviderError::RateLimited`] for HTTP 429 once retries are exhausted.
/// - [`ProviderError::UnexpectedStatus`] for any other non-2xx status.
/// - [`ProviderError::Http`] on network or TLS failure.
/// - [`ProviderError::Deserialize`] if the body does not match `T`.
pub(crate) async fn get_json<T>(
    client: &Client,
    url: &Url,
    bearer: Option<&str>,
    provider: &str,
    retry: RetryPolicy,
) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    retry_with_backoff(retry.max_retries, retry.backoff_base_ms, || async move {
        let mut request = client.get(url.clone());
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ProviderError::RateLimited {
                provider: provider.to_owned(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                url: redacted(url),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ProviderError::Deserialize {
            context: format!("{provider} response from {}", redacted(url)),
            source: e,
        })
    })
    .await
}

/// The URL without its query string, which may carry the searched name.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
