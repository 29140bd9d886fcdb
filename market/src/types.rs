//! Shared vocabulary: service categories, professionals, reviews.
//!
//! SYSTEM CONTEXT
//! ==============
//! Records in this module are immutable for a session. They arrive from the
//! fixture layer (`fixtures`) and flow read-only through the filter pipeline,
//! the map model, and the profile views. Per-service presentation (label,
//! icon, marker colour) is an exhaustive `match` on the closed
//! [`ServiceType`] enum, so adding a category fails to compile until every
//! mapping handles it.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ErrorCode;

/// Identifier of a professional as it appears in fixtures and on map events.
pub type ProfessionalId = String;

// =============================================================================
// SERVICE TYPE
// =============================================================================

/// Closed set of service categories a professional can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Plumbing,
    Electrical,
    Cleaning,
    Mechanic,
    Renovations,
}

impl ServiceType {
    /// Every category, in filter-bar display order.
    pub const ALL: [Self; 5] = [Self::Plumbing, Self::Electrical, Self::Cleaning, Self::Mechanic, Self::Renovations];

    /// Customer-facing label (Spanish copy).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Plumbing => "Fontanería",
            Self::Electrical => "Electricidad",
            Self::Cleaning => "Limpieza",
            Self::Mechanic => "Mecánica",
            Self::Renovations => "Reformas",
        }
    }

    /// Emoji icon used on badges and map markers.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Plumbing => "🔧",
            Self::Electrical => "⚡",
            Self::Cleaning => "🧹",
            Self::Mechanic => "🚗",
            Self::Renovations => "🛠",
        }
    }

    /// Marker background colour as a CSS color string.
    #[must_use]
    pub fn marker_color(self) -> &'static str {
        match self {
            Self::Plumbing => "hsl(199, 89%, 48%)",
            Self::Electrical => "hsl(45, 93%, 47%)",
            Self::Cleaning => "hsl(152, 69%, 47%)",
            Self::Mechanic => "hsl(0, 72%, 51%)",
            Self::Renovations => "hsl(262, 83%, 58%)",
        }
    }

    /// Wire name, identical to the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plumbing => "plumbing",
            Self::Electrical => "electrical",
            Self::Cleaning => "cleaning",
            Self::Mechanic => "mechanic",
            Self::Renovations => "renovations",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`ServiceType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service category: {0}")]
pub struct ParseServiceError(pub String);

impl ErrorCode for ParseServiceError {
    fn error_code(&self) -> &'static str {
        "E_UNKNOWN_SERVICE"
    }
}

impl FromStr for ServiceType {
    type Err = ParseServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|service| service.as_str() == wanted)
            .ok_or_else(|| ParseServiceError(s.to_owned()))
    }
}

// =============================================================================
// COORDINATES
// =============================================================================

/// Geographic position. Serialized as a `[lng, lat]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(c: Coordinates) -> Self {
        (c.lng, c.lat)
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A service provider shown on the map and in the result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: ProfessionalId,
    pub name: String,
    /// Photo URL.
    pub photo: String,
    pub service: ServiceType,
    pub neighborhood: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    pub review_count: u32,
    /// Free-text price label, e.g. `"35€-60€/h"`. Only the first number is
    /// ever interpreted (see [`crate::filter::leading_price`]).
    pub price_range: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub verified: bool,
    pub years_experience: u32,
}

/// A customer review. Belongs to one professional by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub professional_id: ProfessionalId,
    pub author: String,
    pub rating: f64,
    pub comment: String,
    pub date: Date,
}

// =============================================================================
// RATING STARS
// =============================================================================

/// Fill state of one star in a rating display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

/// Compute the fill of each of `max` stars for `rating`.
///
/// Star `i` is full below `floor(rating)`, half when it still falls under the
/// fractional remainder, and empty otherwise.
#[must_use]
pub fn star_fills(rating: f64, max: u32) -> Vec<StarFill> {
    let whole = rating.floor();
    (0..max)
        .map(|i| {
            let i = f64::from(i);
            if i < whole {
                StarFill::Full
            } else if i < rating {
                StarFill::Half
            } else {
                StarFill::Empty
            }
        })
        .collect()
}
