#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Settings for the city safety server and client.
//!
//! Settings are read once at startup into an immutable [`Settings`]
//! value. Sources, highest precedence first:
//!
//! 1. Environment variables (`BIND_ADDR`, `PORT`, `CITY_SAFETY_*`,
//!    `HOODMAPS_*`)
//! 2. The TOML file named by `CITY_SAFETY_CONFIG` (or passed explicitly)
//! 3. Built-in defaults
//!
//! Missing sections and keys fall back to the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use city_safety_neighbourhood_models::DataSource;
use city_safety_server_models::{DEFAULT_SERVER_PORT, safety_check_url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the TOML settings file.
pub const CONFIG_PATH_ENV: &str = "CITY_SAFETY_CONFIG";

/// Default geolocation-by-IP endpoint (plain text city name).
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipinfo.io/city";

/// Default bind address: all interfaces, so devices on the LAN can reach
/// the server.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

/// Default client request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`Settings`].
    #[error("Invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Settings could not be serialized back to TOML.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Environment variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// All settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Safety check client settings.
    pub client: ClientSettings,
    /// Results screen settings.
    pub results: ResultsSettings,
    /// Neighbourhood map lookup settings.
    pub hoodmaps: HoodmapsSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

/// Safety check client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Geolocation-by-IP endpoint returning the city as plain text.
    pub geolocation_url: String,
    /// Full URL of the backend safety check endpoint.
    pub backend_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            backend_url: safety_check_url("127.0.0.1", DEFAULT_SERVER_PORT),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Results screen settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsSettings {
    /// Render the embedded sample instead of the navigation payload.
    pub use_mock_data: bool,
}

impl Default for ResultsSettings {
    fn default() -> Self {
        Self {
            use_mock_data: true,
        }
    }
}

/// Neighbourhood map lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoodmapsSettings {
    /// Whether the server mounts the lookup endpoint.
    pub enabled: bool,
    /// Base URL of the hoodmaps site.
    pub base_url: String,
}

impl Default for HoodmapsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: city_safety_neighbourhood::hoodmaps::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the file named by [`CONFIG_PATH_ENV`] (if set)
    /// and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or an
    /// environment override is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from(path.as_deref())
    }

    /// Loads settings from an optional file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or an
    /// environment override is invalid.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let contents = path
            .map(|p| {
                log::info!("Loading settings from {}", p.display());
                std::fs::read_to_string(p).map_err(|source| ConfigError::Io {
                    path: p.to_path_buf(),
                    source,
                })
            })
            .transpose()?;

        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Builds settings from TOML text and an environment lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is invalid or an environment
    /// override cannot be parsed.
    pub fn from_sources(
        toml_text: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut settings: Self = match toml_text {
            Some(text) => toml::from_str(text)?,
            None => Self::default(),
        };

        if let Some(v) = env("BIND_ADDR") {
            settings.server.bind_addr = v;
        }
        if let Some(v) = env("PORT") {
            settings.server.port = parse_env("PORT", v)?;
        }
        if let Some(v) = env("CITY_SAFETY_GEOLOCATION_URL") {
            settings.client.geolocation_url = v;
        }
        if let Some(v) = env("CITY_SAFETY_BACKEND_URL") {
            settings.client.backend_url = v;
        }
        if let Some(v) = env("CITY_SAFETY_TIMEOUT_SECS") {
            settings.client.timeout_secs = parse_env("CITY_SAFETY_TIMEOUT_SECS", v)?;
        }
        if let Some(v) = env("CITY_SAFETY_USE_MOCK_DATA") {
            settings.results.use_mock_data = parse_bool("CITY_SAFETY_USE_MOCK_DATA", v)?;
        }
        if let Some(v) = env("HOODMAPS_ENABLED") {
            settings.hoodmaps.enabled = parse_bool("HOODMAPS_ENABLED", v)?;
        }
        if let Some(v) = env("HOODMAPS_BASE_URL") {
            settings.hoodmaps.base_url = v;
        }

        Ok(settings)
    }

    /// Serializes the settings as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Where the results screen takes its records from.
    #[must_use]
    pub const fn data_source(&self) -> DataSource {
        DataSource::from_mock_flag(self.results.use_mock_data)
    }

    /// Client request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.client.timeout_secs)
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_client_at_default_server() {
        let settings = Settings::from_sources(None, env_from(&[])).unwrap();

        assert_eq!(settings.server.port, DEFAULT_SERVER_PORT);
        assert_eq!(settings.server.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(
            settings.client.backend_url,
            "http://127.0.0.1:3000/safety-check"
        );
        assert_eq!(settings.client.geolocation_url, DEFAULT_GEOLOCATION_URL);
        assert_eq!(settings.data_source(), DataSource::Sample);
        assert!(settings.hoodmaps.enabled);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let toml_text = r#"
            [server]
            port = 4000

            [results]
            use_mock_data = false
        "#;
        let settings = Settings::from_sources(Some(toml_text), env_from(&[])).unwrap();

        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.server.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.data_source(), DataSource::Payload);
        assert_eq!(settings.client.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn env_overrides_file() {
        let toml_text = r#"
            [server]
            port = 4000

            [client]
            backend_url = "http://file:4000/safety-check"
        "#;
        let env = env_from(&[
            ("PORT", "5000"),
            ("CITY_SAFETY_BACKEND_URL", "http://env:5000/safety-check"),
            ("CITY_SAFETY_USE_MOCK_DATA", "no"),
            ("HOODMAPS_ENABLED", "0"),
        ]);
        let settings = Settings::from_sources(Some(toml_text), env).unwrap();

        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.client.backend_url, "http://env:5000/safety-check");
        assert!(!settings.results.use_mock_data);
        assert!(!settings.hoodmaps.enabled);
    }

    #[test]
    fn invalid_env_value_is_rejected() {
        let err = Settings::from_sources(None, env_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));

        let err = Settings::from_sources(None, env_from(&[("CITY_SAFETY_USE_MOCK_DATA", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let err = Settings::from_sources(Some("[server]\nport = \"x\""), env_from(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[client]\ntimeout_secs = 5\n").unwrap();

        let settings = Settings::load_from(Some(path.as_path())).unwrap();
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Settings::load_from(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn full_settings_file_matches_defaults() {
        let toml_text = r#"
            [server]
            bind_addr = "0.0.0.0"
            port = 3000

            [client]
            geolocation_url = "https://ipinfo.io/city"
            backend_url = "http://127.0.0.1:3000/safety-check"
            timeout_secs = 30

            [results]
            use_mock_data = true

            [hoodmaps]
            enabled = true
            base_url = "https://hoodmaps.com"
        "#;
        let settings = Settings::from_sources(Some(toml_text), env_from(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn toml_output_round_trips() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed = Settings::from_sources(Some(&text), env_from(&[])).unwrap();
        assert_eq!(parsed, settings);
    }
}
