#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the city safety check.
//!
//! Serves the `POST /safety-check` endpoint (currently an echo of the
//! requested city, the seam where a real safety scoring service would
//! plug in), a health check, and an optional neighbourhood map lookup
//! backed by hoodmaps. The server is stateless apart from the shared
//! HTTP client used for lookups.

mod handlers;
pub mod interactive;

use actix_cors::Cors;
use actix_web::{
    App, HttpResponse, HttpServer,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error, middleware, web,
};
use city_safety_config::Settings;
use city_safety_neighbourhood::{NeighbourhoodError, hoodmaps};
use city_safety_server_models::{ApiError, HEALTH_PATH, NEIGHBOURHOODS_PATH, SAFETY_CHECK_PATH};

/// Hoodmaps lookup dependencies.
pub struct HoodmapsLookup {
    /// HTTP client with a browser user agent.
    pub client: reqwest::Client,
    /// Base URL of the hoodmaps site.
    pub base_url: String,
}

/// Shared application state.
pub struct AppState {
    /// Neighbourhood map lookup, when enabled.
    pub hoodmaps: Option<web::Data<HoodmapsLookup>>,
}

impl AppState {
    /// Builds the state described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`NeighbourhoodError`] if the lookup HTTP client cannot be
    /// constructed.
    pub fn from_settings(settings: &Settings) -> Result<Self, NeighbourhoodError> {
        let hoodmaps = if settings.hoodmaps.enabled {
            Some(web::Data::new(HoodmapsLookup {
                client: hoodmaps::build_client(settings.request_timeout())?,
                base_url: settings.hoodmaps.base_url.clone(),
            }))
        } else {
            None
        };

        Ok(Self { hoodmaps })
    }
}

/// JSON extractor config that answers malformed bodies with an
/// [`ApiError`] instead of actix's plain-text default.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected request body: {err}");
        let response = HttpResponse::BadRequest().json(ApiError::new(err.to_string()));
        error::InternalError::from_response(err, response).into()
    })
}

/// Registers the API routes.
///
/// The neighbourhood lookup route is only mounted when `state` carries a
/// lookup.
pub fn configure(cfg: &mut web::ServiceConfig, state: &web::Data<AppState>) {
    cfg.app_data(json_config())
        .route(HEALTH_PATH, web::get().to(handlers::health))
        .route(SAFETY_CHECK_PATH, web::post().to(handlers::safety_check));

    if let Some(lookup) = &state.hoodmaps {
        cfg.app_data(lookup.clone())
            .route(NEIGHBOURHOODS_PATH, web::post().to(handlers::neighbourhoods));
    }
}

/// Builds the application with permissive CORS, request logging and the
/// API routes.
///
/// Used by [`run_server`] for every worker and by tests that need the
/// full middleware stack.
pub fn app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Cors::permissive())
        .wrap(middleware::Logger::default())
        .configure(|cfg| configure(cfg, &state))
}

/// Starts the city safety API server.
///
/// Binds `settings.server.bind_addr:settings.server.port` with permissive
/// CORS and request logging. This is a regular async function: the
/// caller is responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`) and for initialising the logger.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the state cannot be built, the
/// HTTP server fails to bind, or it encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(settings: &Settings) -> std::io::Result<()> {
    let state = web::Data::new(AppState::from_settings(settings).map_err(std::io::Error::other)?);

    if state.hoodmaps.is_some() {
        log::info!(
            "Neighbourhood lookup enabled ({})",
            settings.hoodmaps.base_url
        );
    }

    let bind_addr = settings.server.bind_addr.clone();
    let port = settings.server.port;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || app(state.clone()))
    .bind((bind_addr, port))?
    .run()
    .await
}
