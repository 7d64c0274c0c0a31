//! HTTP handler functions for the city safety API.

use actix_web::{HttpResponse, web};
use city_safety_neighbourhood::hoodmaps;
use city_safety_server_models::{
    ApiError, ApiHealth, NeighbourhoodLookupResponse, SafetyCheckResponse,
};

use crate::HoodmapsLookup;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /safety-check`
///
/// Echoes the requested city. Only the `city` field of the body is read.
pub async fn safety_check(body: web::Json<serde_json::Value>) -> HttpResponse {
    let Some(city) = requested_city(&body) else {
        log::warn!("Rejected safety check request without a city");
        return HttpResponse::BadRequest().json(ApiError::city_required());
    };

    log::info!("Received safety check request for city: {city}");

    HttpResponse::Ok().json(SafetyCheckResponse {
        city: city.to_string(),
    })
}

/// `POST /api/neighbourhoods`
///
/// Looks up the crowd-sourced neighbourhood map for the requested city.
/// Only mounted when the lookup is enabled.
pub async fn neighbourhoods(
    lookup: web::Data<HoodmapsLookup>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let Some(city) = requested_city(&body) else {
        return HttpResponse::BadRequest().json(ApiError::city_required());
    };

    match hoodmaps::fetch_neighbourhoods(&lookup.client, &lookup.base_url, city).await {
        Ok(neighbourhoods) => HttpResponse::Ok().json(NeighbourhoodLookupResponse {
            city: city.to_string(),
            neighbourhoods,
        }),
        Err(e) => {
            log::error!("Failed to fetch neighbourhood map for {city}: {e}");
            HttpResponse::BadGateway().json(ApiError::new("Failed to fetch neighbourhood map"))
        }
    }
}

/// Returns the body's `city` if it is a non-blank string.
fn requested_city(body: &serde_json::Value) -> Option<&str> {
    body.get("city")
        .and_then(serde_json::Value::as_str)
        .filter(|city| !city.trim().is_empty())
}
