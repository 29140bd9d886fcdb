//! Filter/sort pipeline that turns the catalog into the visible result list.
//!
//! DESIGN
//! ======
//! [`apply`] is a pure function of its inputs so front ends can call it on
//! every state change without caching. It never fails: an empty catalog or a
//! filter nobody matches simply yields an empty list.
//!
//! Price ordering reads only the first run of digits in the free-text
//! `price_range` label. A label with no digits sorts as price 0, i.e. ahead
//! of every priced professional.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ErrorCode;
use crate::types::{Professional, ServiceType};

/// Rating floors offered by the filter bar. `0.0` means "all".
pub const RATING_FLOORS: [f64; 4] = [0.0, 4.0, 4.5, 4.8];

static LEADING_NUMBER: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new("[0-9]+"));

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest rating first.
    #[default]
    Rating,
    /// Most reviews first.
    Reviews,
    /// Lowest leading price first.
    Price,
}

impl SortKey {
    /// Customer-facing label (Spanish copy).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rating => "Mejor valorados",
            Self::Reviews => "Más reseñas",
            Self::Price => "Precio más bajo",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Reviews => "reviews",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`SortKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0} (expected rating, reviews or price)")]
pub struct ParseSortError(pub String);

impl ErrorCode for ParseSortError {
    fn error_code(&self) -> &'static str {
        "E_UNKNOWN_SORT"
    }
}

impl FromStr for SortKey {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Ok(Self::Rating),
            "reviews" => Ok(Self::Reviews),
            "price" => Ok(Self::Price),
            _ => Err(ParseSortError(s.to_owned())),
        }
    }
}

/// Category selection, rating floor, and sort key driving the visible list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Selected categories. Empty means every category.
    pub services: BTreeSet<ServiceType>,
    /// Inclusive minimum rating. `0.0` means no floor.
    pub min_rating: f64,
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Add `service` to the selection, or remove it if already selected.
    pub fn toggle_service(&mut self, service: ServiceType) {
        if !self.services.remove(&service) {
            self.services.insert(service);
        }
    }

    /// Reset category and rating filters. The sort key is kept.
    pub fn clear(&mut self) {
        self.services.clear();
        self.min_rating = 0.0;
    }

    /// True when no category or rating filter is active.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.services.is_empty() && self.min_rating <= 0.0
    }

    fn matches(&self, p: &Professional) -> bool {
        (self.services.is_empty() || self.services.contains(&p.service)) && p.rating >= self.min_rating
    }
}

/// Filter and sort `professionals` according to `criteria`.
///
/// The sort is stable: professionals with equal keys keep catalog order.
#[must_use]
pub fn apply(professionals: &[Professional], criteria: &FilterCriteria) -> Vec<Professional> {
    let mut out: Vec<Professional> = professionals.iter().filter(|p| criteria.matches(p)).cloned().collect();

    match criteria.sort {
        SortKey::Rating => out.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Reviews => out.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        SortKey::Price => out.sort_by_cached_key(|p| leading_price(&p.price_range)),
    }

    tracing::debug!(
        total = professionals.len(),
        visible = out.len(),
        sort = %criteria.sort,
        "filter applied"
    );
    out
}

/// First integer embedded in a price label, or 0 when there is none.
///
/// Digit runs too long for `u64` saturate to `u64::MAX`.
#[must_use]
pub fn leading_price(label: &str) -> u64 {
    let Ok(re) = LEADING_NUMBER.as_ref() else {
        return 0;
    };
    re.find(label)
        .map_or(0, |m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
}
