#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Safety check client.
//!
//! Resolves the caller's city from a geolocation-by-IP text endpoint,
//! posts it to the safety check backend, and hands the raw response to
//! the results route. The two network calls are strictly sequential and
//! never retried. A [`dispatcher::SafetyCheckDispatcher`] allows at most
//! one check in flight at a time.

pub mod backend;
pub mod dispatcher;
pub mod resolver;
pub mod route;

use city_safety_config::Settings;
use thiserror::Error;

pub use dispatcher::{DispatchOutcome, SafetyCheckDispatcher, SafetyCheckView};
pub use route::Route;

/// Errors that can occur during a safety check.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be completed or timed out.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the failure happened at the transport level.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Builds the HTTP client used for both safety check calls.
///
/// # Errors
///
/// Returns [`ClientError`] if the client cannot be constructed.
pub fn build_client(settings: &Settings) -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder()
        .timeout(settings.request_timeout())
        .build()?)
}
