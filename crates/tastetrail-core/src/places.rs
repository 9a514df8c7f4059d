//! Domain types flowing through the aggregation pipeline.
//!
//! A [`PlaceCandidate`] comes back from the primary map search, an optional
//! [`EnrichmentResult`] from the review provider, and the two are merged once
//! into an [`EnrichedPlace`] that is never mutated afterwards except for the
//! distance annotation written by the radius filter.

use serde::{Deserialize, Serialize};

use crate::search_config::MAX_IDENTITY_PRECISION;

/// A WGS84 position in decimal degrees.
///
/// No range validation: callers are responsible for sane values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// A point of interest returned by the primary map-search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Display name. Candidates with a blank name are dropped before enrichment.
    pub name: String,
    pub coordinate: Coordinate,
    /// Street, house number and locality joined with `", "`.
    pub address: Option<String>,
    pub phone_number: Option<String>,
    /// Provider category text, e.g. `"restaurant"` or `"fast_food"`.
    pub category: Option<String>,
    pub website_url: Option<String>,
    pub postal_code: Option<String>,
    pub locality: Option<String>,
    pub country: Option<String>,
    pub time_zone: Option<String>,
}

impl PlaceCandidate {
    /// Candidate with only the required fields set.
    #[must_use]
    pub fn named(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            address: None,
            phone_number: None,
            category: None,
            website_url: None,
            postal_code: None,
            locality: None,
            country: None,
            time_zone: None,
        }
    }
}

/// Best-match business data from the review provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    /// Star rating in `[0, 5]`.
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub image_url: Option<String>,
    /// Category titles followed by typical dishes, in provider order.
    pub menu_items: Vec<String>,
    /// Canonical page of the business on the review site.
    pub review_site_url: Option<String>,
}

impl EnrichmentResult {
    /// Drops a rating that is non-finite or outside `[0, 5]`.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.rating = self
            .rating
            .filter(|r| r.is_finite() && (0.0..=5.0).contains(r));
        self
    }
}

/// A candidate merged with its enrichment and derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPlace {
    #[serde(flatten)]
    pub candidate: PlaceCandidate,
    /// `None` when the review provider had no match, failed or timed out.
    pub enrichment: Option<EnrichmentResult>,
    /// Never empty once classified.
    pub cuisine_types: Vec<String>,
    /// Geodesic metres from the search centre, set by the radius filter.
    pub distance_from_center: Option<f64>,
    pub identity_key: String,
}

impl EnrichedPlace {
    /// Assemble a place record, deriving its identity key at `identity_precision`
    /// decimal degrees.
    #[must_use]
    pub fn new(
        candidate: PlaceCandidate,
        enrichment: Option<EnrichmentResult>,
        cuisine_types: Vec<String>,
        identity_precision: u8,
    ) -> Self {
        let identity_key = identity_key(&candidate.name, candidate.coordinate, identity_precision);
        Self {
            candidate,
            enrichment,
            cuisine_types,
            distance_from_center: None,
            identity_key,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.candidate.name
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.candidate.coordinate
    }

    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        self.enrichment.as_ref().and_then(|e| e.rating)
    }

    #[must_use]
    pub fn review_count(&self) -> Option<u32> {
        self.enrichment.as_ref().and_then(|e| e.review_count)
    }
}

/// Deduplication key: normalised name plus coordinate rounded to `precision`
/// decimal degrees (4 ≈ 11 m).
///
/// The name is trimmed, lower-cased and has inner whitespace collapsed so the
/// same venue reported with cosmetic differences still collapses.
#[must_use]
pub fn identity_key(name: &str, coordinate: Coordinate, precision: u8) -> String {
    let normalized = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let precision = precision.min(MAX_IDENTITY_PRECISION);
    let prec = usize::from(precision);
    format!(
        "{normalized}_{:.prec$}_{:.prec$}",
        round_to(coordinate.latitude, precision),
        round_to(coordinate.longitude, precision),
    )
}

fn round_to(value: f64, precision: u8) -> f64 {
    let scale = 10f64.powi(i32::from(precision));
    // `+ 0.0` folds negative zero so `-0.00001` and `0.00001` share a key.
    (value * scale).round() / scale + 0.0
}

#[cfg(test)]
#[path = "places_test.rs"]
mod tests;
