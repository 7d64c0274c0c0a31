#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighbourhood safety results and neighbourhood map lookup.
//!
//! [`results`] turns the `data` navigation parameter into display
//! records, choosing between the embedded demo sample and the decoded
//! payload according to an explicit [`DataSource`]. [`render`] lays the
//! records out as pages of plain text. [`hoodmaps`] fetches the
//! crowd-sourced neighbourhood map for a city.

pub mod hoodmaps;
pub mod render;
pub mod results;

pub use city_safety_neighbourhood_models::DataSource;
use city_safety_neighbourhood_models::{NeighbourhoodSafetyRecord, RawNeighbourhoodSummary};
use thiserror::Error;

/// Compile-time embedded demo dataset (Amsterdam).
const SAMPLE_JSON: &str = include_str!("../data/amsterdam_sample.json");

/// Errors that can occur during neighbourhood lookups.
#[derive(Debug, Error)]
pub enum NeighbourhoodError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
}

/// Returns the raw summaries of the embedded demo dataset.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed (this is a compile-time
/// guarantee since the file is embedded).
#[must_use]
pub fn sample_summaries() -> Vec<RawNeighbourhoodSummary> {
    serde_json::from_str(SAMPLE_JSON).expect("embedded sample dataset is valid JSON")
}

/// Returns the embedded demo dataset as display records.
#[must_use]
pub fn sample_records() -> Vec<NeighbourhoodSafetyRecord> {
    sample_summaries()
        .into_iter()
        .map(NeighbourhoodSafetyRecord::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_eleven_amsterdam_neighbourhoods() {
        let records = sample_records();
        assert_eq!(records.len(), 11);
        assert_eq!(records[0].neighbourhood, "Nieuwmarkt/Lastage");
        assert_eq!(records[10].neighbourhood, "Frederik Hendrikbuurt");
    }

    #[test]
    fn sample_scores_are_in_range() {
        for record in sample_records() {
            assert!(
                (0.0..=5.0).contains(&record.safety_score),
                "{} has score {}",
                record.neighbourhood,
                record.safety_score
            );
            assert!(record.top_places.is_empty());
        }
    }
}
