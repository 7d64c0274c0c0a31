//! Safety check dispatcher.
//!
//! Runs the resolve → post → navigate sequence on user action and reports
//! the outcome to a [`SafetyCheckView`]. Any failure is logged and shown
//! as one generic alert; nothing is retried.

use std::sync::atomic::{AtomicBool, Ordering};

use city_safety_config::Settings;

use crate::{ClientError, Route, backend, build_client, resolver};

/// Title of the failure alert.
pub const ALERT_TITLE: &str = "Error";

/// Message of the failure alert.
pub const ALERT_MESSAGE: &str = "Could not complete the safety check.";

/// The screen the dispatcher reports to.
pub trait SafetyCheckView {
    /// Transitions to `route`.
    fn navigate(&self, route: &Route);

    /// Shows a user-visible alert.
    fn alert(&self, title: &str, message: &str);
}

/// What a call to [`SafetyCheckDispatcher::run_safety_check`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The check succeeded and the view navigated to this route.
    Navigated(Route),
    /// The check failed and the view showed the alert.
    Failed,
    /// Another check was still outstanding; nothing happened.
    AlreadyInFlight,
}

/// Marks a check as outstanding until dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs safety checks, at most one at a time.
#[derive(Debug)]
pub struct SafetyCheckDispatcher {
    client: reqwest::Client,
    geolocation_url: String,
    backend_url: String,
    in_flight: AtomicBool,
}

impl SafetyCheckDispatcher {
    /// Creates a dispatcher from the client settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP client cannot be constructed.
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        Ok(Self::with_client(
            build_client(settings)?,
            &settings.client.geolocation_url,
            &settings.client.backend_url,
        ))
    }

    /// Creates a dispatcher around an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, geolocation_url: &str, backend_url: &str) -> Self {
        Self {
            client,
            geolocation_url: geolocation_url.to_string(),
            backend_url: backend_url.to_string(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a check is currently outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Resolves the city and posts it, returning the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if either call fails.
    pub async fn check(&self) -> Result<String, ClientError> {
        let city = resolver::resolve_city(&self.client, &self.geolocation_url).await?;
        log::info!("Requesting safety check for {city:?}");

        backend::post_city(&self.client, &self.backend_url, &city).await
    }

    /// Runs one safety check and reports the outcome to `view`.
    ///
    /// A call made while another is outstanding returns
    /// [`DispatchOutcome::AlreadyInFlight`] without touching the network
    /// or the view.
    pub async fn run_safety_check<V>(&self, view: &V) -> DispatchOutcome
    where
        V: SafetyCheckView + ?Sized,
    {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            log::debug!("Safety check already in flight, ignoring");
            return DispatchOutcome::AlreadyInFlight;
        };

        match self.check().await {
            Ok(data) => {
                let route = Route::safety(data);
                view.navigate(&route);
                DispatchOutcome::Navigated(route)
            }
            Err(e) => {
                log::error!("Safety check failed: {e}");
                view.alert(ALERT_TITLE, ALERT_MESSAGE);
                DispatchOutcome::Failed
            }
        }
    }
}
