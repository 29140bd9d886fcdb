//! Professional dashboard: incoming bookings, confirmation, headline stats.
//!
//! DESIGN
//! ======
//! The booking list is local mock state seeded from fixtures. Selection is
//! stored by id, not by copy, so the detail view always reflects the current
//! status after a confirmation.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use serde::{Deserialize, Serialize};

use crate::ErrorCode;
use crate::booking::BookingStatus;
use crate::types::ServiceType;

/// Monthly earnings series shown in the revenue chart (EUR).
pub const EARNINGS: [(&str, u32); 6] =
    [("Ene", 1200), ("Feb", 1900), ("Mar", 1500), ("Abr", 2100), ("May", 2400), ("Jun", 2800)];

/// A booking as seen by the professional who receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingBooking {
    pub id: String,
    pub client_name: String,
    pub service: ServiceType,
    /// Display date, e.g. `"15 Dic 2025"`.
    pub date: String,
    pub time: String,
    pub status: BookingStatus,
    /// Quoted amount in whole euros.
    pub amount: u32,
    pub address: String,
    pub notes: String,
    pub phone: String,
    pub email: String,
}

/// Failure confirming a booking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("no booking with id {0}")]
    UnknownBooking(String),
    #[error("booking {id} is {status:?}, only pending bookings can be confirmed")]
    NotPending { id: String, status: BookingStatus },
}

impl ErrorCode for DashboardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownBooking(_) => "E_UNKNOWN_BOOKING",
            Self::NotPending { .. } => "E_BOOKING_NOT_PENDING",
        }
    }
}

/// Headline numbers for the stats grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Sum of every booking amount, in euros.
    pub booked_revenue: u32,
    /// Pending plus confirmed bookings.
    pub active: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ProfessionalDashboard {
    bookings: Vec<IncomingBooking>,
    pending_only: bool,
    selected: Option<String>,
}

impl ProfessionalDashboard {
    #[must_use]
    pub fn new(bookings: Vec<IncomingBooking>) -> Self {
        Self { bookings, pending_only: false, selected: None }
    }

    /// Dashboard seeded with the mock booking list.
    #[must_use]
    pub fn with_fixtures() -> Self {
        Self::new(fixture_bookings())
    }

    #[must_use]
    pub fn bookings(&self) -> &[IncomingBooking] {
        &self.bookings
    }

    #[must_use]
    pub fn pending_only(&self) -> bool {
        self.pending_only
    }

    /// Flip the "pending only" filter on the booking list.
    pub fn toggle_pending_only(&mut self) {
        self.pending_only = !self.pending_only;
    }

    /// Bookings shown in the list under the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&IncomingBooking> {
        self.bookings
            .iter()
            .filter(|b| !self.pending_only || b.status == BookingStatus::Pending)
            .collect()
    }

    /// Open the detail view for a booking. Returns false for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        if self.bookings.iter().any(|b| b.id == id) {
            self.selected = Some(id.to_owned());
            true
        } else {
            false
        }
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    /// The booking whose detail view is open.
    #[must_use]
    pub fn selected(&self) -> Option<&IncomingBooking> {
        let id = self.selected.as_deref()?;
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Accept a pending booking.
    ///
    /// # Errors
    ///
    /// [`DashboardError::UnknownBooking`] for an unknown id and
    /// [`DashboardError::NotPending`] when the booking is already confirmed or completed.
    pub fn confirm(&mut self, id: &str) -> Result<&IncomingBooking, DashboardError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| DashboardError::UnknownBooking(id.to_owned()))?;
        if booking.status != BookingStatus::Pending {
            return Err(DashboardError::NotPending { id: id.to_owned(), status: booking.status });
        }
        booking.status = BookingStatus::Confirmed;
        tracing::info!(booking_id = %id, client = %booking.client_name, "booking confirmed by professional");
        Ok(booking)
    }

    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        let pending = self.bookings.iter().filter(|b| b.status == BookingStatus::Pending).count();
        let confirmed = self.bookings.iter().filter(|b| b.status == BookingStatus::Confirmed).count();
        DashboardStats { booked_revenue: self.bookings.iter().map(|b| b.amount).sum(), active: pending + confirmed, pending }
    }
}

#[allow(clippy::too_many_arguments)]
fn incoming(
    id: &str,
    client_name: &str,
    date: &str,
    time: &str,
    status: BookingStatus,
    amount: u32,
    address: &str,
    notes: &str,
    phone: &str,
    email: &str,
) -> IncomingBooking {
    IncomingBooking {
        id: id.to_owned(),
        client_name: client_name.to_owned(),
        service: ServiceType::Plumbing,
        date: date.to_owned(),
        time: time.to_owned(),
        status,
        amount,
        address: address.to_owned(),
        notes: notes.to_owned(),
        phone: phone.to_owned(),
        email: email.to_owned(),
    }
}

fn fixture_bookings() -> Vec<IncomingBooking> {
    vec![
        incoming(
            "1",
            "Ana López",
            "15 Dic 2025",
            "10:00",
            BookingStatus::Pending,
            85,
            "Carrer de Balmes, 123, 2º 1ª",
            "El grifo de la cocina gotea constantemente. Necesito que lo revisen lo antes posible.",
            "+34 612 345 678",
            "ana.lopez@email.com",
        ),
        incoming(
            "2",
            "Carlos Ruiz",
            "14 Dic 2025",
            "16:00",
            BookingStatus::Confirmed,
            120,
            "Av. Diagonal, 456, 4º B",
            "Instalación de lavavajillas nuevo.",
            "+34 623 456 789",
            "carlos.ruiz@email.com",
        ),
        incoming(
            "3",
            "María García",
            "12 Dic 2025",
            "09:00",
            BookingStatus::Completed,
            95,
            "Gran Via de les Corts Catalanes, 789, 1º A",
            "Revisión general de tuberías.",
            "+34 634 567 890",
            "maria.garcia@email.com",
        ),
    ]
}
