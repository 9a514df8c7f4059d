use crate::search_config::SearchConfig;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub nominatim_base_url: String,
    pub user_agent: String,
    pub yelp_base_url: String,
    /// Review-provider key. Enrichment is disabled when absent.
    pub yelp_api_key: Option<String>,
    pub http_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub search: SearchConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("nominatim_base_url", &self.nominatim_base_url)
            .field("user_agent", &self.user_agent)
            .field("yelp_base_url", &self.yelp_base_url)
            .field(
                "yelp_api_key",
                &self.yelp_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("search", &self.search)
            .finish()
    }
}
