#![allow(clippy::float_cmp)]

use time::macros::date;

use super::*;
use crate::booking::BookingStep;
use crate::geo::LocateError;

fn catalog() -> Catalog {
    Catalog::builtin()
}

fn ids(list: &[Professional]) -> Vec<&str> {
    list.iter().map(|p| p.id.as_str()).collect()
}

// =============================================================
// Session lifecycle
// =============================================================

#[test]
fn new_session_starts_on_map_split_view() {
    let app = AppState::new();
    assert_eq!(app.screen(), Screen::Map);
    assert_eq!(app.view_mode(), ViewMode::Split);
    assert!(app.criteria().is_unfiltered());
    assert!(app.selected().is_none());
    assert!(app.role().is_none());
}

#[test]
fn logout_resets_to_fresh_home() {
    let cat = catalog();
    let mut app = AppState::new();
    app.sign_in(Role::Client);
    app.toggle_service(ServiceType::Cleaning);
    app.select_professional(&cat, "3");
    app.logout();
    assert_eq!(app.screen(), Screen::Home);
    assert!(app.role().is_none());
    assert!(app.selected().is_none());
    assert!(app.criteria().is_unfiltered());
}

#[test]
fn navigating_home_resets_browsing_but_keeps_role() {
    let cat = catalog();
    let mut app = AppState::new();
    app.sign_in(Role::Professional);
    app.set_view_mode(ViewMode::List);
    app.start_booking(&cat, "1");
    assert!(app.navigate(Screen::Home));
    assert_eq!(app.screen(), Screen::Home);
    assert_eq!(app.view_mode(), ViewMode::Split);
    assert!(app.booking().is_none());
    assert_eq!(app.role(), Some(Role::Professional));
}

#[test]
fn dashboard_requires_professional_role() {
    let mut app = AppState::new();
    assert!(!app.navigate(Screen::Dashboard));
    assert_eq!(app.screen(), Screen::Map);
    app.sign_in(Role::Professional);
    assert!(app.navigate(Screen::Dashboard));
    assert_eq!(app.screen(), Screen::Dashboard);
}

// =============================================================
// Filters and derived views
// =============================================================

#[test]
fn visible_follows_criteria() {
    let cat = catalog();
    let mut app = AppState::new();
    assert_eq!(app.visible(&cat).len(), cat.professionals.len());
    app.toggle_service(ServiceType::Cleaning);
    app.set_min_rating(4.5);
    app.set_sort(SortKey::Price);
    assert_eq!(ids(&app.visible(&cat)), vec!["3", "12"]);
    app.clear_filters();
    assert_eq!(app.visible(&cat).len(), cat.professionals.len());
    assert_eq!(app.criteria().sort, SortKey::Price);
}

#[test]
fn negative_or_nan_rating_floor_is_zero() {
    let mut app = AppState::new();
    app.set_min_rating(-1.0);
    assert_eq!(app.criteria().min_rating, 0.0);
    app.set_min_rating(f64::NAN);
    assert_eq!(app.criteria().min_rating, 0.0);
}

#[test]
fn markers_cover_visible_and_flag_selection() {
    let cat = catalog();
    let mut app = AppState::new();
    app.toggle_service(ServiceType::Cleaning);
    app.select_professional(&cat, "12");
    let markers = app.markers(&cat);
    assert_eq!(markers.len(), app.visible(&cat).len());
    assert!(markers.iter().all(|m| m.service == ServiceType::Cleaning));
    assert_eq!(markers.iter().filter(|m| m.selected).count(), 1);
}

// =============================================================
// Selection, profile, booking
// =============================================================

#[test]
fn select_returns_fly_to_and_keeps_profile_closed_in_split() {
    let cat = catalog();
    let mut app = AppState::new();
    let cmd = app.select_professional(&cat, "4");
    assert_eq!(cmd, cat.find("4").map(MapCommand::focus));
    assert_eq!(app.selected(), Some("4"));
    assert!(app.profile().is_none());
}

#[test]
fn select_in_map_mode_opens_profile() {
    let cat = catalog();
    let mut app = AppState::new();
    app.set_view_mode(ViewMode::Map);
    app.handle_map_event(&cat, MapEvent::MarkerClicked { professional_id: "9".into() });
    assert_eq!(app.selected(), Some("9"));
    assert_eq!(app.profile(), Some("9"));
}

#[test]
fn unknown_ids_are_noops() {
    let cat = catalog();
    let mut app = AppState::new();
    app.select_professional(&cat, "4");
    assert!(app.select_professional(&cat, "404").is_none());
    assert!(!app.open_profile(&cat, "404"));
    assert!(!app.start_booking(&cat, "404"));
    assert_eq!(app.selected(), Some("4"));
    assert!(app.profile().is_none());
    assert!(app.booking().is_none());
}

#[test]
fn start_booking_closes_profile_and_opens_fresh_attempt() {
    let cat = catalog();
    let mut app = AppState::new();
    assert!(app.open_profile(&cat, "1"));
    assert!(app.start_booking(&cat, "1"));
    assert!(app.profile().is_none());
    let attempt = app.booking().unwrap();
    assert_eq!(attempt.professional_id(), "1");
    assert_eq!(attempt.step(), BookingStep::Date);
}

#[test]
fn closing_booking_discards_progress() {
    let cat = catalog();
    let mut app = AppState::new();
    app.start_booking(&cat, "1");
    let attempt = app.booking_mut().unwrap();
    attempt.select_date(date!(2026-10-19), date!(2026-10-16)).unwrap();
    attempt.continue_to_time().unwrap();
    app.close_booking();
    assert!(app.booking().is_none());

    app.start_booking(&cat, "1");
    let attempt = app.booking().unwrap();
    assert_eq!(attempt.step(), BookingStep::Date);
    assert!(attempt.date().is_none());
    assert!(attempt.time().is_none());
}

// =============================================================
// Account, location, registration
// =============================================================

#[test]
fn account_view_follows_role() {
    let mut app = AppState::new();
    assert!(app.account_view().is_none());
    app.open_account();
    assert!(matches!(app.account_view(), Some(AccountView::Client(_))));
    app.sign_in(Role::Professional);
    assert!(matches!(app.account_view(), Some(AccountView::Business(_))));
    app.close_account();
    assert!(app.account_view().is_none());
}

#[test]
fn location_flies_camera_when_available() {
    let mut app = AppState::new();
    let here = Coordinates::new(2.16, 41.40);
    let cmd = app.apply_location(LocationOutcome::Located(here));
    assert_eq!(cmd, Some(MapCommand::locate(here)));
    assert_eq!(app.location(), Some(here));
}

#[test]
fn missing_location_changes_nothing() {
    let mut app = AppState::new();
    assert!(app.apply_location(LocationOutcome::Unavailable(LocateError::Timeout)).is_none());
    assert!(app.location().is_none());
}

#[test]
fn registration_moves_to_success_only_when_valid() {
    let mut app = AppState::new();
    assert!(app.navigate(Screen::Registration));
    assert!(app.complete_registration(RegistrationForm::default()).is_err());
    assert_eq!(app.registration_step(), RegistrationStep::Form);

    let form = RegistrationForm {
        business_name: "Llum Nova".into(),
        owner_name: "Pau Serra".into(),
        email: "pau@llumnova.cat".into(),
        phone: "+34 611 222 333".into(),
        service: Some(crate::registration::ServiceChoice::Listed(ServiceType::Electrical)),
        neighborhood: Some(crate::registration::NeighborhoodChoice::Listed("Sants".into())),
    };
    assert!(app.complete_registration(form).is_ok());
    assert_eq!(app.registration_step(), RegistrationStep::Success);

    assert!(app.navigate(Screen::Registration));
    assert_eq!(app.registration_step(), RegistrationStep::Form);
}
