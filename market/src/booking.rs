//! Booking step machine: date → time → confirmed.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`BookingAttempt`] exists per open booking dialog. The app controller
//! owns it as an `Option` and drops it when the dialog closes, which is the
//! whole of cancellation: nothing about an attempt outlives the dialog.
//!
//! Front ends disable buttons with [`BookingAttempt::can_continue`] and
//! [`BookingAttempt::can_confirm`]. The transition methods reject the same
//! cases and leave state untouched when they do.

#[cfg(test)]
#[path = "booking_test.rs"]
mod booking_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Weekday};
use uuid::Uuid;

use crate::ErrorCode;
use crate::types::ProfessionalId;

/// Time slots offered for every bookable date.
pub const TIME_SLOTS: [&str; 9] = ["09:00", "10:00", "11:00", "12:00", "13:00", "16:00", "17:00", "18:00", "19:00"];

/// Position of an attempt in the booking flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    #[default]
    Date,
    Time,
    Confirmed,
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Confirmed => "confirmed",
        })
    }
}

/// Lifecycle of a booking once requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Sent to the professional, awaiting their confirmation.
    Pending,
    Confirmed,
    Completed,
}

impl BookingStatus {
    /// Customer-facing label (Spanish copy).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Confirmed => "Confirmada",
            Self::Completed => "Completada",
        }
    }
}

/// Summary produced when an attempt reaches [`BookingStep::Confirmed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub id: Uuid,
    pub professional_id: ProfessionalId,
    pub date: Date,
    pub time: String,
    pub status: BookingStatus,
}

/// A transition the current state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// The action belongs to a different step.
    #[error("cannot {action} while on the {step} step")]
    WrongStep { action: &'static str, step: BookingStep },

    /// Continue was requested before a date was chosen.
    #[error("choose a date before continuing")]
    MissingDate,

    /// Confirm was requested before a time was chosen.
    #[error("choose a time before confirming")]
    MissingTime,

    /// The date is in the past, a Sunday, or more than a year ahead.
    #[error("{0} is not available for booking")]
    DateUnavailable(Date),

    /// The time is not one of [`TIME_SLOTS`].
    #[error("{0} is not an offered time slot")]
    UnknownSlot(String),
}

impl ErrorCode for BookingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongStep { .. } => "E_BOOKING_STEP",
            Self::MissingDate => "E_BOOKING_NO_DATE",
            Self::MissingTime => "E_BOOKING_NO_TIME",
            Self::DateUnavailable(_) => "E_BOOKING_DATE_UNAVAILABLE",
            Self::UnknownSlot(_) => "E_BOOKING_UNKNOWN_SLOT",
        }
    }
}

/// Last date the calendar offers, one year from `today`.
///
/// Feb 29 rolls forward to Mar 1 when next year has no leap day.
#[must_use]
pub fn last_bookable_date(today: Date) -> Date {
    today
        .replace_year(today.year() + 1)
        .unwrap_or_else(|_| today.saturating_add(Duration::days(366)))
}

/// Whether `date` can be picked: not in the past, not a Sunday, and within a year.
#[must_use]
pub fn is_date_selectable(date: Date, today: Date) -> bool {
    date >= today && date <= last_bookable_date(today) && date.weekday() != Weekday::Sunday
}

/// One user's in-progress reservation with a single professional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingAttempt {
    professional_id: ProfessionalId,
    step: BookingStep,
    date: Option<Date>,
    time: Option<&'static str>,
    request: Option<BookingRequest>,
}

impl BookingAttempt {
    /// Start a fresh attempt on the date step with nothing selected.
    #[must_use]
    pub fn open(professional_id: impl Into<ProfessionalId>) -> Self {
        Self { professional_id: professional_id.into(), step: BookingStep::Date, date: None, time: None, request: None }
    }

    #[must_use]
    pub fn professional_id(&self) -> &str {
        &self.professional_id
    }

    #[must_use]
    pub fn step(&self) -> BookingStep {
        self.step
    }

    #[must_use]
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    #[must_use]
    pub fn time(&self) -> Option<&'static str> {
        self.time
    }

    /// The submitted request, once confirmed.
    #[must_use]
    pub fn request(&self) -> Option<&BookingRequest> {
        self.request.as_ref()
    }

    /// Pick a date. Does not advance the step.
    ///
    /// # Errors
    ///
    /// [`BookingError::WrongStep`] outside the date step and
    /// [`BookingError::DateUnavailable`] for dates the calendar disables.
    pub fn select_date(&mut self, date: Date, today: Date) -> Result<(), BookingError> {
        self.require(BookingStep::Date, "choose a date")?;
        if !is_date_selectable(date, today) {
            return Err(BookingError::DateUnavailable(date));
        }
        self.date = Some(date);
        Ok(())
    }

    /// Whether the continue action should be enabled.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.step == BookingStep::Date && self.date.is_some()
    }

    /// Advance from the date step to the time step.
    ///
    /// # Errors
    ///
    /// [`BookingError::WrongStep`] outside the date step and
    /// [`BookingError::MissingDate`] when no date is chosen.
    pub fn continue_to_time(&mut self) -> Result<BookingStep, BookingError> {
        self.require(BookingStep::Date, "continue")?;
        if self.date.is_none() {
            return Err(BookingError::MissingDate);
        }
        self.step = BookingStep::Time;
        tracing::debug!(professional_id = %self.professional_id, "booking moved to time step");
        Ok(self.step)
    }

    /// Return to the date step. The chosen date and time are kept.
    ///
    /// # Errors
    ///
    /// [`BookingError::WrongStep`] unless on the time step.
    pub fn back_to_date(&mut self) -> Result<BookingStep, BookingError> {
        self.require(BookingStep::Time, "go back")?;
        self.step = BookingStep::Date;
        Ok(self.step)
    }

    /// Pick one of the offered time slots. Does not advance the step.
    ///
    /// # Errors
    ///
    /// [`BookingError::WrongStep`] outside the time step and
    /// [`BookingError::UnknownSlot`] for a time not in [`TIME_SLOTS`].
    pub fn select_time(&mut self, slot: &str) -> Result<(), BookingError> {
        self.require(BookingStep::Time, "choose a time")?;
        let Some(slot) = TIME_SLOTS.iter().copied().find(|s| *s == slot.trim()) else {
            return Err(BookingError::UnknownSlot(slot.to_owned()));
        };
        self.time = Some(slot);
        Ok(())
    }

    /// Whether the confirm action should be enabled.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.step == BookingStep::Time && self.time.is_some()
    }

    /// Submit the booking. The attempt becomes terminal.
    ///
    /// # Errors
    ///
    /// [`BookingError::WrongStep`] outside the time step and
    /// [`BookingError::MissingTime`] when no slot is chosen.
    pub fn confirm(&mut self) -> Result<BookingRequest, BookingError> {
        self.require(BookingStep::Time, "confirm")?;
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Err(if self.date.is_none() { BookingError::MissingDate } else { BookingError::MissingTime });
        };

        let request = BookingRequest {
            id: Uuid::new_v4(),
            professional_id: self.professional_id.clone(),
            date,
            time: time.to_owned(),
            status: BookingStatus::Pending,
        };
        self.step = BookingStep::Confirmed;
        self.request = Some(request.clone());
        tracing::info!(
            professional_id = %self.professional_id,
            %date,
            time,
            request_id = %request.id,
            "booking requested"
        );
        Ok(request)
    }

    fn require(&self, step: BookingStep, action: &'static str) -> Result<(), BookingError> {
        if self.step == step { Ok(()) } else { Err(BookingError::WrongStep { action, step: self.step }) }
    }
}
