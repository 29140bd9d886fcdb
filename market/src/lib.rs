//! Marketplace core for the iFix Barcelona service-matching product.
//!
//! This crate owns everything behind the browsing UI that is not pixels:
//! the professional catalog, the filter/sort pipeline that drives the visible
//! list, the booking step machine, the map-surface model, and the single
//! application-state controller that ties them together. Front ends (the
//! `ifix` CLI today) hold one [`app::AppState`] per session and feed it user
//! actions one at a time.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Service categories, professional and review records |
//! | [`fixtures`] | Built-in and JSON-loaded catalog |
//! | [`filter`] | Category/rating filter and stable sort |
//! | [`booking`] | Date → time → confirmed booking flow |
//! | [`map`] | Markers, camera commands, Barcelona bounds |
//! | [`geo`] | Best-effort device geolocation with timeout |
//! | [`dashboard`] | Professional dashboard bookings and stats |
//! | [`account`] | Mock client and business profiles |
//! | [`registration`] | Professional sign-up form |
//! | [`auth`] | Mock sign-in form and closed role type |
//! | [`app`] | Top-level screen and modal controller |

pub mod account;
pub mod app;
pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod filter;
pub mod fixtures;
pub mod geo;
pub mod map;
pub mod registration;
pub mod types;

pub use app::AppState;
pub use fixtures::Catalog;
pub use types::{Coordinates, Professional, Review, ServiceType};

/// Stable machine-readable code for a domain error.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}
