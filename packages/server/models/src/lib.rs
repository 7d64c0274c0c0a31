#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the city safety server.
//!
//! These types are serialized to JSON on the wire and shared by the
//! server and the client. The route and port constants live here too so
//! both sides derive their URLs from one place.

use city_safety_neighbourhood_models::NeighbourhoodDescription;
use serde::{Deserialize, Serialize};

/// Route of the safety check endpoint.
pub const SAFETY_CHECK_PATH: &str = "/safety-check";

/// Route of the health endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Route of the neighbourhood map lookup endpoint.
pub const NEIGHBOURHOODS_PATH: &str = "/api/neighbourhoods";

/// Port the server listens on unless configured otherwise.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Error message for a request without a usable `city`.
pub const CITY_REQUIRED_MESSAGE: &str = "City parameter is required!";

/// Builds the safety check URL for a server reachable at `host:port`.
#[must_use]
pub fn safety_check_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}{SAFETY_CHECK_PATH}")
}

/// Body of a safety check request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyCheckRequest {
    /// City to check.
    pub city: String,
}

/// Body of a safety check response.
///
/// The endpoint currently echoes the requested city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyCheckResponse {
    /// City that was checked.
    pub city: String,
}

/// Body of a neighbourhood map lookup response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighbourhoodLookupResponse {
    /// City that was looked up.
    pub city: String,
    /// Neighbourhoods in page order.
    pub neighbourhoods: Vec<NeighbourhoodDescription>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// The error returned for a missing or empty `city`.
    #[must_use]
    pub fn city_required() -> Self {
        Self::new(CITY_REQUIRED_MESSAGE)
    }
}
