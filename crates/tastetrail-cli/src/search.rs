//! Handlers for the `search` and `filter` subcommands.

use std::path::Path;

use anyhow::Context;
use tastetrail_core::{AppConfig, Coordinate, EnrichedPlace};
use tastetrail_engine::{
    filter_by_radius, NoEnrichment, NominatimClient, PlaceEnrichment, SearchCoordinator,
    YelpClient,
};

use crate::output::print_places;

/// Run a live search with the configured providers.
///
/// Enrichment uses Yelp when `TASTETRAIL_YELP_API_KEY` is set and is skipped
/// otherwise.
///
/// # Errors
///
/// Returns an error if a provider client cannot be built from the
/// configuration or the output cannot be serialised.
pub(crate) async fn run_search(
    config: &AppConfig,
    lat: f64,
    lon: f64,
    radius: f64,
    json: bool,
) -> anyhow::Result<()> {
    let primary = NominatimClient::new(
        &config.nominatim_base_url,
        config.http_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )
    .context("failed to build Nominatim client")?;
    let center = Coordinate::new(lat, lon);

    let places = if let Some(api_key) = config.yelp_api_key.as_deref() {
        let yelp = YelpClient::new(
            api_key,
            &config.yelp_base_url,
            config.http_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
        .context("failed to build Yelp client")?;
        find(primary, yelp, config, center, radius).await
    } else {
        tracing::info!("no Yelp API key configured; places will not be enriched");
        find(primary, NoEnrichment, config, center, radius).await
    };

    if places.is_empty() && !json {
        println!("no places found within {radius} m of {center}");
        return Ok(());
    }
    emit(&places, json)
}

async fn find<E: PlaceEnrichment>(
    primary: NominatimClient,
    enrichment: E,
    config: &AppConfig,
    center: Coordinate,
    radius: f64,
) -> Vec<EnrichedPlace> {
    SearchCoordinator::new(primary, enrichment, config.search.clone())
        .find_places(center, radius)
        .await
}

/// Re-filter a JSON result set saved by `search --json`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// places.
pub(crate) fn run_filter(
    input: &Path,
    lat: f64,
    lon: f64,
    radius: f64,
    json: bool,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let places: Vec<EnrichedPlace> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a saved result set", input.display()))?;

    let total = places.len();
    let kept = filter_by_radius(places, Coordinate::new(lat, lon), radius);
    tracing::info!(total, kept = kept.len(), radius, "re-filtered saved places");
    emit(&kept, json)
}

fn emit(places: &[EnrichedPlace], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(places)?);
    } else {
        print_places(places);
    }
    Ok(())
}
