use std::time::Duration;

use crate::app_config::AppConfig;
use crate::search_config::{SearchConfig, MAX_IDENTITY_PRECISION};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(invalid(var, format!("must be a positive number, got {value}")))
        }
    };

    let log_level = or_default("TASTETRAIL_LOG_LEVEL", "info");
    let nominatim_base_url = or_default(
        "TASTETRAIL_NOMINATIM_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let user_agent = or_default(
        "TASTETRAIL_USER_AGENT",
        "tastetrail/0.1 (restaurant-aggregation)",
    );
    let yelp_base_url = or_default("TASTETRAIL_YELP_BASE_URL", "https://api.yelp.com/v3");
    let yelp_api_key = lookup("TASTETRAIL_YELP_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());

    let timeout_var = "TASTETRAIL_HTTP_TIMEOUT_SECS";
    let http_timeout_secs = parse_u64(timeout_var, "10")?;
    if http_timeout_secs == 0 {
        return Err(invalid(timeout_var, "must be at least 1 second".to_string()));
    }
    let max_retries = parse_u32("TASTETRAIL_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("TASTETRAIL_RETRY_BACKOFF_BASE_MS", "500")?;

    let defaults = SearchConfig::default();
    let query_text = or_default("TASTETRAIL_QUERY_TEXT", &defaults.query_text);
    let split_threshold_m = parse_positive_f64("TASTETRAIL_SPLIT_THRESHOLD_M", "1000")?;
    let quadrant_offset_factor = parse_positive_f64("TASTETRAIL_QUADRANT_OFFSET_FACTOR", "0.35")?;
    let quadrant_radius_factor = parse_positive_f64("TASTETRAIL_QUADRANT_RADIUS_FACTOR", "0.6")?;
    let max_candidates_per_region = parse_usize("TASTETRAIL_MAX_CANDIDATES", "20")?;
    let enrichment_concurrency = parse_usize("TASTETRAIL_ENRICHMENT_CONCURRENCY", "4")?;
    let enrichment_stagger_ms = parse_u64("TASTETRAIL_ENRICHMENT_STAGGER_MS", "100")?;
    let enrichment_timeout_ms = parse_u64("TASTETRAIL_ENRICHMENT_TIMEOUT_MS", "8000")?;
    let primary_timeout_ms = parse_u64("TASTETRAIL_PRIMARY_TIMEOUT_MS", "10000")?;

    let precision_var = "TASTETRAIL_IDENTITY_PRECISION";
    let identity_precision = or_default(precision_var, "4")
        .parse::<u8>()
        .map_err(|e| invalid(precision_var, e.to_string()))?;
    if identity_precision > MAX_IDENTITY_PRECISION {
        return Err(invalid(
            precision_var,
            format!("must be between 0 and {MAX_IDENTITY_PRECISION}, got {identity_precision}"),
        ));
    }

    Ok(AppConfig {
        log_level,
        nominatim_base_url,
        user_agent,
        yelp_base_url,
        yelp_api_key,
        http_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        search: SearchConfig {
            query_text,
            split_threshold_m,
            quadrant_offset_factor,
            quadrant_radius_factor,
            max_candidates_per_region,
            enrichment_concurrency,
            enrichment_stagger: Duration::from_millis(enrichment_stagger_ms),
            enrichment_timeout: Duration::from_millis(enrichment_timeout_ms),
            primary_timeout: Duration::from_millis(primary_timeout_ms),
            identity_precision,
        },
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
