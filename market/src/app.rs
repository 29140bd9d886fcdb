//! Top-level application state: screens, map view, modals, session role.
//!
//! SYSTEM CONTEXT
//! ==============
//! A front end owns exactly one [`AppState`] per session and applies user
//! actions to it one at a time. Nothing here is global. The catalog is
//! passed in by reference because it is immutable for the session and may be
//! shared between sessions.
//!
//! Operations naming a professional id that is not in the catalog leave the
//! state untouched and return `None`/`false`.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use serde::{Deserialize, Serialize};

use crate::account::{BusinessProfile, ClientProfile};
use crate::auth::Role;
use crate::booking::BookingAttempt;
use crate::dashboard::ProfessionalDashboard;
use crate::filter::{self, FilterCriteria, SortKey};
use crate::fixtures::Catalog;
use crate::geo::LocationOutcome;
use crate::map::{self, MapCommand, MapEvent, Marker};
use crate::registration::{Registration, RegistrationError, RegistrationForm, RegistrationStep};
use crate::types::{Coordinates, Professional, ProfessionalId, ServiceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Home,
    Map,
    Registration,
    Dashboard,
}

/// Layout of the map screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Split,
    Map,
    List,
}

/// Profile shown in the account modal, chosen by the signed-in role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AccountView {
    Client(ClientProfile),
    Business(BusinessProfile),
}

#[derive(Debug, Clone)]
pub struct AppState {
    screen: Screen,
    view_mode: ViewMode,
    criteria: FilterCriteria,
    selected: Option<ProfessionalId>,
    profile: Option<ProfessionalId>,
    booking: Option<BookingAttempt>,
    show_account: bool,
    role: Option<Role>,
    location: Option<Coordinates>,
    registration: RegistrationStep,
    dashboard: ProfessionalDashboard,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Fresh session on the map screen.
    #[must_use]
    pub fn new() -> Self {
        Self::on_screen(Screen::Map)
    }

    fn on_screen(screen: Screen) -> Self {
        Self {
            screen,
            view_mode: ViewMode::default(),
            criteria: FilterCriteria::default(),
            selected: None,
            profile: None,
            booking: None,
            show_account: false,
            role: None,
            location: None,
            registration: RegistrationStep::Form,
            dashboard: ProfessionalDashboard::with_fixtures(),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Id of the professional whose profile modal is open.
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    #[must_use]
    pub fn booking(&self) -> Option<&BookingAttempt> {
        self.booking.as_ref()
    }

    pub fn booking_mut(&mut self) -> Option<&mut BookingAttempt> {
        self.booking.as_mut()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Last known device location, if any.
    #[must_use]
    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    #[must_use]
    pub fn registration_step(&self) -> RegistrationStep {
        self.registration
    }

    #[must_use]
    pub fn dashboard(&self) -> &ProfessionalDashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut ProfessionalDashboard {
        &mut self.dashboard
    }

    // =========================================================================
    // DERIVED VIEWS
    // =========================================================================

    /// Professionals shown in the list and on the map.
    #[must_use]
    pub fn visible(&self, catalog: &Catalog) -> Vec<Professional> {
        filter::apply(&catalog.professionals, &self.criteria)
    }

    #[must_use]
    pub fn markers(&self, catalog: &Catalog) -> Vec<Marker> {
        map::markers(&self.visible(catalog), self.selected.as_deref())
    }

    // =========================================================================
    // SELECTION AND MODALS
    // =========================================================================

    /// Highlight a professional and fly the camera to it. On the map-only
    /// layout this also opens the profile, since there is no list card.
    pub fn select_professional(&mut self, catalog: &Catalog, id: &str) -> Option<MapCommand> {
        let professional = catalog.find(id)?;
        self.selected = Some(professional.id.clone());
        if self.view_mode == ViewMode::Map {
            self.profile = Some(professional.id.clone());
        }
        tracing::debug!(professional_id = %id, view_mode = ?self.view_mode, "professional selected");
        Some(MapCommand::focus(professional))
    }

    pub fn handle_map_event(&mut self, catalog: &Catalog, event: MapEvent) -> Option<MapCommand> {
        match event {
            MapEvent::MarkerClicked { professional_id } => self.select_professional(catalog, &professional_id),
        }
    }

    pub fn open_profile(&mut self, catalog: &Catalog, id: &str) -> bool {
        let Some(professional) = catalog.find(id) else {
            return false;
        };
        self.profile = Some(professional.id.clone());
        true
    }

    pub fn close_profile(&mut self) {
        self.profile = None;
    }

    /// Close the profile modal and open a fresh booking attempt.
    pub fn start_booking(&mut self, catalog: &Catalog, id: &str) -> bool {
        let Some(professional) = catalog.find(id) else {
            return false;
        };
        self.profile = None;
        self.booking = Some(BookingAttempt::open(professional.id.clone()));
        tracing::debug!(professional_id = %id, "booking dialog opened");
        true
    }

    /// Discard the current booking attempt, whatever its step.
    pub fn close_booking(&mut self) {
        if let Some(attempt) = self.booking.take() {
            tracing::debug!(professional_id = %attempt.professional_id(), step = %attempt.step(), "booking dialog closed");
        }
    }

    pub fn open_account(&mut self) {
        self.show_account = true;
    }

    pub fn close_account(&mut self) {
        self.show_account = false;
    }

    /// Contents of the account modal while it is open. Without a signed-in
    /// role the client profile is shown.
    #[must_use]
    pub fn account_view(&self) -> Option<AccountView> {
        if !self.show_account {
            return None;
        }
        Some(match self.role.unwrap_or(Role::Client) {
            Role::Client => AccountView::Client(ClientProfile::fixture()),
            Role::Professional => AccountView::Business(BusinessProfile::fixture()),
        })
    }

    // =========================================================================
    // FILTERS
    // =========================================================================

    pub fn toggle_service(&mut self, service: ServiceType) {
        self.criteria.toggle_service(service);
    }

    /// Set the rating floor. Negative or non-finite values reset it to zero.
    pub fn set_min_rating(&mut self, min_rating: f64) {
        self.criteria.min_rating = if min_rating.is_finite() { min_rating.max(0.0) } else { 0.0 };
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.criteria.sort = sort;
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    // =========================================================================
    // NAVIGATION AND SESSION
    // =========================================================================

    /// Switch screens. Going home resets the browsing state and keeps the
    /// signed-in role. The dashboard requires a professional role.
    pub fn navigate(&mut self, screen: Screen) -> bool {
        match screen {
            Screen::Home => {
                let role = self.role;
                *self = Self::on_screen(Screen::Home);
                self.role = role;
            }
            Screen::Dashboard if self.role != Some(Role::Professional) => {
                tracing::warn!(role = ?self.role, "dashboard requires a professional sign-in");
                return false;
            }
            Screen::Registration => {
                self.registration = RegistrationStep::Form;
                self.screen = screen;
            }
            Screen::Map | Screen::Dashboard => self.screen = screen,
        }
        tracing::debug!(screen = ?screen, "navigated");
        true
    }

    pub fn sign_in(&mut self, role: Role) {
        self.role = Some(role);
        tracing::info!(%role, "session role set");
    }

    /// Drop the session and return to a fresh home screen.
    pub fn logout(&mut self) {
        *self = Self::on_screen(Screen::Home);
        tracing::info!("logged out");
    }

    /// Record a geolocation result and return the camera move, if any.
    pub fn apply_location(&mut self, outcome: LocationOutcome) -> Option<MapCommand> {
        let location = outcome.coordinates()?;
        self.location = Some(location);
        Some(MapCommand::locate(location))
    }

    /// Submit the registration form, moving to the success step when valid.
    ///
    /// # Errors
    ///
    /// The form's first [`RegistrationError`]; the step stays on the form.
    pub fn complete_registration(&mut self, form: RegistrationForm) -> Result<Registration, RegistrationError> {
        let registration = form.submit()?;
        self.registration = RegistrationStep::Success;
        Ok(registration)
    }
}
