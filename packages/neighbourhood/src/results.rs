//! Decoding of the results screen's navigation parameter.
//!
//! The parameter is a string-encoded JSON value. Decode failures never
//! surface as errors: they are logged and the screen falls back to an
//! empty working set.

use city_safety_neighbourhood_models::{
    DataSource, NeighbourhoodSafetyRecord, RawNeighbourhoodSummary,
};

/// Parses the `data` navigation parameter.
///
/// A missing parameter is an empty array. Malformed JSON is logged and
/// also yields an empty array.
#[must_use]
pub fn parse_navigation_data(raw: Option<&str>) -> serde_json::Value {
    let Some(raw) = raw else {
        return serde_json::Value::Array(Vec::new());
    };

    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("Error parsing navigation data: {e}");
        serde_json::Value::Array(Vec::new())
    })
}

/// Maps a decoded payload into display records.
///
/// Only a JSON array of neighbourhood summaries produces records. Any
/// other shape (including the echo object `{"city": ...}`) is an empty
/// set. If any element has an unexpected shape the whole array is
/// rejected.
#[must_use]
pub fn records_from_value(value: &serde_json::Value) -> Vec<NeighbourhoodSafetyRecord> {
    if !value.is_array() {
        log::debug!("Navigation data is not an array, no records to show");
        return Vec::new();
    }

    match serde_json::from_value::<Vec<RawNeighbourhoodSummary>>(value.clone()) {
        Ok(summaries) => summaries
            .into_iter()
            .map(NeighbourhoodSafetyRecord::from)
            .collect(),
        Err(e) => {
            log::error!("Error mapping navigation data: {e}");
            Vec::new()
        }
    }
}

/// Produces the records the results screen renders.
///
/// The navigation parameter is always decoded (so malformed input is
/// logged either way), then `source` decides whether the decoded payload
/// or the embedded sample is shown.
#[must_use]
pub fn load_records(raw: Option<&str>, source: DataSource) -> Vec<NeighbourhoodSafetyRecord> {
    let parsed = parse_navigation_data(raw);

    match source {
        DataSource::Sample => {
            log::debug!("Rendering sample data, navigation payload ignored");
            crate::sample_records()
        }
        DataSource::Payload => records_from_value(&parsed),
    }
}
