//! Best-effort device geolocation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Location is a fire-once request with a timeout. Whatever happens (denied,
//! unsupported, slow) the caller gets a [`LocationOutcome`] and carries on;
//! nothing here ever blocks the map or returns an error upward.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use std::time::Duration;

use async_trait::async_trait;

use crate::ErrorCode;
use crate::types::Coordinates;

/// Default time to wait for a position fix.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reason a position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("timed out waiting for a position")]
    Timeout,
}

impl ErrorCode for LocateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "E_GEO_DENIED",
            Self::Unavailable => "E_GEO_UNAVAILABLE",
            Self::Unsupported => "E_GEO_UNSUPPORTED",
            Self::Timeout => "E_GEO_TIMEOUT",
        }
    }
}

/// Source of the device position.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocateError>;
}

/// Result of one acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationOutcome {
    Located(Coordinates),
    Unavailable(LocateError),
}

impl LocationOutcome {
    #[must_use]
    pub fn coordinates(self) -> Option<Coordinates> {
        match self {
            Self::Located(c) => Some(c),
            Self::Unavailable(_) => None,
        }
    }
}

/// Ask `locator` for a position, giving up after `timeout`.
pub async fn acquire(locator: &dyn Locator, timeout: Duration) -> LocationOutcome {
    let result = match tokio::time::timeout(timeout, locator.locate()).await {
        Ok(result) => result,
        Err(_) => Err(LocateError::Timeout),
    };

    match result {
        Ok(coordinates) => {
            tracing::debug!(lng = coordinates.lng, lat = coordinates.lat, "device located");
            LocationOutcome::Located(coordinates)
        }
        Err(error) => {
            tracing::warn!(%error, code = error.error_code(), "device location unavailable");
            LocationOutcome::Unavailable(error)
        }
    }
}

/// Locator that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        Ok(self.0)
    }
}

/// Locator for environments without a position source.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLocator;

#[async_trait]
impl Locator for DisabledLocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        Err(LocateError::Unsupported)
    }
}
