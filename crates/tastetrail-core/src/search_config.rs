//! Tuning parameters for one aggregation run.

use std::time::Duration;

/// Largest identity-key precision honoured. Higher values are clamped to it.
pub const MAX_IDENTITY_PRECISION: u8 = 10;

/// Knobs for the search pipeline. `Default` matches the values the engine was
/// tuned with against the primary provider's per-query result cap.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Free-text query sent to the primary provider.
    pub query_text: String,
    /// Radii strictly above this many metres are split into quadrants.
    pub split_threshold_m: f64,
    /// Quadrant centre offset from the search centre, as a fraction of the radius.
    pub quadrant_offset_factor: f64,
    /// Quadrant search radius as a fraction of the radius.
    pub quadrant_radius_factor: f64,
    /// Candidates kept per region before enrichment.
    pub max_candidates_per_region: usize,
    /// Enrichment lookups in flight at once within a region.
    pub enrichment_concurrency: usize,
    /// Minimum spacing between enrichment dispatches. Zero disables pacing.
    pub enrichment_stagger: Duration,
    pub enrichment_timeout: Duration,
    pub primary_timeout: Duration,
    /// Decimal places of latitude/longitude in the identity key, at most
    /// [`MAX_IDENTITY_PRECISION`].
    pub identity_precision: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query_text: "Restaurant".to_string(),
            split_threshold_m: 1000.0,
            quadrant_offset_factor: 0.35,
            quadrant_radius_factor: 0.6,
            max_candidates_per_region: 20,
            enrichment_concurrency: 4,
            enrichment_stagger: Duration::from_millis(100),
            enrichment_timeout: Duration::from_millis(8000),
            primary_timeout: Duration::from_millis(10_000),
            identity_precision: 4,
        }
    }
}
