//! Mock account records behind the profile modal.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use serde::{Deserialize, Serialize};

use crate::booking::BookingStatus;
use crate::types::ServiceType;

/// One row of a client's booking history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientBooking {
    pub id: String,
    pub professional_name: String,
    pub service: ServiceType,
    pub date: String,
    pub time: String,
    pub status: BookingStatus,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub member_since: String,
    pub total_bookings: u32,
    pub favorite_services: Vec<ServiceType>,
    pub bookings: Vec<ClientBooking>,
}

impl ClientProfile {
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            name: "Juan Pérez".into(),
            email: "juan.perez@email.com".into(),
            phone: "+34 612 345 678".into(),
            address: "Carrer de Jordi Girona, 1-3, 08034 Barcelona".into(),
            member_since: "Enero 2024".into(),
            total_bookings: 12,
            favorite_services: vec![ServiceType::Plumbing, ServiceType::Electrical],
            bookings: vec![
                client_booking("1", "Fontanería García", ServiceType::Plumbing, "22 Dic 2025", "10:00", BookingStatus::Pending, 85),
                client_booking("2", "Electricidad Segura", ServiceType::Electrical, "20 Dic 2025", "16:30", BookingStatus::Confirmed, 60),
                client_booking("3", "Limpiezas BCN", ServiceType::Cleaning, "10 Dic 2025", "09:00", BookingStatus::Completed, 45),
            ],
        }
    }

    /// Bookings still waiting on the professional or already accepted.
    #[must_use]
    pub fn upcoming(&self) -> Vec<&ClientBooking> {
        self.bookings.iter().filter(|b| b.status != BookingStatus::Completed).collect()
    }
}

fn client_booking(
    id: &str,
    professional_name: &str,
    service: ServiceType,
    date: &str,
    time: &str,
    status: BookingStatus,
    amount: u32,
) -> ClientBooking {
    ClientBooking {
        id: id.to_owned(),
        professional_name: professional_name.to_owned(),
        service,
        date: date.to_owned(),
        time: time.to_owned(),
        status,
        amount,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub service: ServiceType,
    pub member_since: String,
    pub rating: f64,
    pub review_count: u32,
    pub completed_jobs: u32,
    pub response_time: String,
    pub years_experience: u32,
}

impl BusinessProfile {
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            business_name: "Fontaneria Express BCN".into(),
            email: "info@fontaneriaexpress.com".into(),
            phone: "+34 932 123 456".into(),
            address: "Carrer de València, 234, 08007 Barcelona".into(),
            service: ServiceType::Plumbing,
            member_since: "Marzo 2020".into(),
            rating: 4.9,
            review_count: 127,
            completed_jobs: 342,
            response_time: "< 2h".into(),
            years_experience: 15,
        }
    }
}
