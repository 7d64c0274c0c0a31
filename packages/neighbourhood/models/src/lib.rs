#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighbourhood safety record types.
//!
//! Defines the raw summary shape produced upstream (human-readable keys
//! such as `"Safety Score"`), the normalized [`NeighbourhoodSafetyRecord`]
//! the results screen renders, and the two pure functions the screen
//! depends on: [`parse_safety_score`] and [`star_rating`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of stars in a rating.
pub const STAR_COUNT: usize = 5;

/// Upper bound of the safety score scale.
pub const MAX_SAFETY_SCORE: f64 = 5.0;

/// Single entry shown in place of an empty top-places list.
pub const NO_PLACES_PLACEHOLDER: &str = "No data available";

/// Fallback for a missing or empty safety overview.
pub const DEFAULT_SAFETY_OVERVIEW: &str = "No overview available.";

/// Fallback for a missing or empty social character description.
pub const DEFAULT_SOCIAL_CHARACTER: &str = "No description provided.";

/// Leading decimal number, the way a lenient float prefix parse reads it.
static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("valid regex")
});

/// A neighbourhood safety summary as produced upstream.
///
/// Every key is optional; [`NeighbourhoodSafetyRecord::from`] applies the
/// display defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNeighbourhoodSummary {
    /// Neighbourhood name.
    #[serde(rename = "Neighbourhood", default)]
    pub neighbourhood: Option<String>,
    /// Score string, e.g. `"4.6/5.0"`.
    #[serde(rename = "Safety Score", default)]
    pub safety_score: Option<String>,
    /// Up to three places considered safe.
    #[serde(rename = "Top 3 Safe Places", default)]
    pub top_places: Option<Vec<String>>,
    /// Free-text safety overview.
    #[serde(rename = "Safety Overview", default)]
    pub safety_overview: Option<String>,
    /// Free-text description of the people and atmosphere.
    #[serde(rename = "Social Character", default)]
    pub social_character: Option<String>,
}

/// A neighbourhood safety record ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighbourhoodSafetyRecord {
    /// Neighbourhood name.
    pub neighbourhood: String,
    /// Safety score, nominally in `[0, 5]`.
    pub safety_score: f64,
    /// Ordered list of safe places (possibly empty).
    pub top_places: Vec<String>,
    /// Free-text safety overview.
    pub safety_overview: String,
    /// Free-text description of the people and atmosphere.
    pub social_character: String,
}

impl NeighbourhoodSafetyRecord {
    /// Score formatted with one decimal, e.g. `"4.6"`.
    #[must_use]
    pub fn formatted_score(&self) -> String {
        format!("{:.1}", self.safety_score)
    }

    /// Star rating for this record's score.
    #[must_use]
    pub fn stars(&self) -> [StarKind; STAR_COUNT] {
        star_rating(self.safety_score)
    }

    /// Places to list on the results page.
    ///
    /// An empty list is replaced by exactly one [`NO_PLACES_PLACEHOLDER`].
    #[must_use]
    pub fn display_places(&self) -> Vec<&str> {
        if self.top_places.is_empty() {
            vec![NO_PLACES_PLACEHOLDER]
        } else {
            self.top_places.iter().map(String::as_str).collect()
        }
    }
}

impl From<RawNeighbourhoodSummary> for NeighbourhoodSafetyRecord {
    fn from(raw: RawNeighbourhoodSummary) -> Self {
        let safety_score = raw
            .safety_score
            .as_deref()
            .map_or(0.0, parse_safety_score);

        Self {
            neighbourhood: raw.neighbourhood.unwrap_or_default(),
            safety_score,
            top_places: raw.top_places.unwrap_or_default(),
            safety_overview: non_empty_or(raw.safety_overview, DEFAULT_SAFETY_OVERVIEW),
            social_character: non_empty_or(raw.social_character, DEFAULT_SOCIAL_CHARACTER),
        }
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Extracts the numeric score from a string like `"4.6/5.0"`.
///
/// Only the text before the first `/` is considered, and only its
/// leading numeric prefix is read (`"4.6abc"` yields `4.6`). Anything that
/// does not start with a finite number yields `0.0`.
#[must_use]
pub fn parse_safety_score(raw: &str) -> f64 {
    let head = raw.split('/').next().unwrap_or_default().trim_start();

    LEADING_NUMBER_RE
        .find(head)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|score| score.is_finite())
        .unwrap_or(0.0)
}

/// One entry of a crowd-sourced neighbourhood map: a name and the short
/// description people tagged it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighbourhoodDescription {
    /// Neighbourhood name.
    pub neighbourhood: String,
    /// Crowd-sourced description keywords.
    pub description: String,
}

/// One star of a rating.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StarKind {
    /// Filled star.
    Full,
    /// Half-filled star.
    Half,
    /// Empty star.
    Empty,
}

/// Computes the five-star rating for `score`.
///
/// Star `i` (0-based) is full when `i + 1 <= score`, half when
/// `i < score < i + 1`, and empty otherwise.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn star_rating(score: f64) -> [StarKind; STAR_COUNT] {
    std::array::from_fn(|i| {
        let lower = i as f64;
        let upper = lower + 1.0;
        if upper <= score {
            StarKind::Full
        } else if lower < score && score < upper {
            StarKind::Half
        } else {
            StarKind::Empty
        }
    })
}

/// Where the results screen takes its records from.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DataSource {
    /// The embedded demo sample, regardless of the navigation payload.
    #[default]
    Sample,
    /// Records decoded from the navigation payload.
    Payload,
}

impl DataSource {
    /// Maps the `use_mock_data` flag onto a data source.
    #[must_use]
    pub const fn from_mock_flag(use_mock_data: bool) -> Self {
        if use_mock_data {
            Self::Sample
        } else {
            Self::Payload
        }
    }
}
