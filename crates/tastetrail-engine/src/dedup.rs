//! Collapsing of duplicate places reported by overlapping regions.

use std::collections::HashSet;

use tastetrail_core::EnrichedPlace;

/// Flatten per-region results and keep the first record seen for each
/// identity key.
///
/// First-appearance order is preserved, so the output is deterministic for a
/// deterministic input order, and merging an already merged set is a no-op.
#[must_use]
pub fn merge<I>(results: I) -> Vec<EnrichedPlace>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = EnrichedPlace>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    let mut dropped = 0usize;

    for place in results.into_iter().flatten() {
        if seen.insert(place.identity_key.clone()) {
            unique.push(place);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::debug!(kept = unique.len(), dropped, "collapsed duplicate places");
    }
    unique
}
