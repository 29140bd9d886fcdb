//! Runtime configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use market::Coordinates;
use market::geo::DEFAULT_TIMEOUT;
use time::Date;
use time::macros::format_description;
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl market::ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        "E_CONFIG"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON catalog to load instead of the built-in one.
    pub fixtures: Option<PathBuf>,
    pub log_level: Level,
    /// Position reported by the device locator. Unset means no location.
    pub device_location: Option<Coordinates>,
    pub geo_timeout: Duration,
    /// Overrides the clock for date eligibility.
    pub today: Option<Date>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { fixtures: None, log_level: Level::WARN, device_location: None, geo_timeout: DEFAULT_TIMEOUT, today: None }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `IFIX_FIXTURES`: path to a JSON catalog
    /// - `IFIX_LOG_LEVEL`: `error`, `warn` (default), `info`, `debug`, `trace`
    /// - `IFIX_DEVICE_LOCATION`: `lng,lat`
    /// - `IFIX_GEO_TIMEOUT_MS`: default 5000
    /// - `IFIX_TODAY`: `YYYY-MM-DD`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            fixtures: get("IFIX_FIXTURES").map(PathBuf::from),
            log_level: parse_level(get("IFIX_LOG_LEVEL").as_deref())?,
            device_location: get("IFIX_DEVICE_LOCATION").as_deref().map(parse_location).transpose()?,
            geo_timeout: parse_timeout(get("IFIX_GEO_TIMEOUT_MS").as_deref())?,
            today: get("IFIX_TODAY").as_deref().map(|raw| parse_date("IFIX_TODAY", raw)).transpose()?,
        })
    }
}

pub fn parse_level(raw: Option<&str>) -> Result<Level, ConfigError> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("warn") => Ok(Level::WARN),
        Some("error") => Ok(Level::ERROR),
        Some("info") => Ok(Level::INFO),
        Some("debug") => Ok(Level::DEBUG),
        Some("trace") => Ok(Level::TRACE),
        Some(other) => Err(ConfigError::Invalid {
            key: "IFIX_LOG_LEVEL",
            message: format!("unknown level '{other}' (expected error, warn, info, debug or trace)"),
        }),
    }
}

fn parse_location(raw: &str) -> Result<Coordinates, ConfigError> {
    let invalid = |message: String| ConfigError::Invalid { key: "IFIX_DEVICE_LOCATION", message };
    let Some((lng, lat)) = raw.split_once(',') else {
        return Err(invalid(format!("expected 'lng,lat', got '{raw}'")));
    };
    let lng: f64 = lng.trim().parse().map_err(|e| invalid(format!("longitude: {e}")))?;
    let lat: f64 = lat.trim().parse().map_err(|e| invalid(format!("latitude: {e}")))?;
    if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
        return Err(invalid(format!("out of range: {lng},{lat}")));
    }
    Ok(Coordinates::new(lng, lat))
}

fn parse_timeout(raw: Option<&str>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TIMEOUT);
    };
    raw.trim().parse::<u64>().map(Duration::from_millis).map_err(|e| ConfigError::Invalid {
        key: "IFIX_GEO_TIMEOUT_MS",
        message: format!("'{raw}': {e}"),
    })
}

/// Parse a `YYYY-MM-DD` date. `key` names the setting in the error.
pub fn parse_date(key: &'static str, raw: &str) -> Result<Date, ConfigError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| ConfigError::Invalid { key, message: format!("'{raw}': {e}") })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
