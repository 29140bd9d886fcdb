//! Professional sign-up form.
//!
//! DESIGN
//! ======
//! `submit` consumes the form and reports the first problem it finds, in
//! field order. A valid form becomes a [`Registration`] with every value
//! trimmed and custom choices resolved.

#[cfg(test)]
#[path = "registration_test.rs"]
mod registration_test;

use serde::{Deserialize, Serialize};

use crate::ErrorCode;
use crate::types::ServiceType;

/// Service picked in the form: one of the listed trades or a free-text one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ServiceChoice {
    Listed(ServiceType),
    Other(String),
}

impl ServiceChoice {
    /// Parse user input: a known service name, otherwise a custom trade.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        input.parse::<ServiceType>().map_or_else(|_| Self::Other(input.trim().to_owned()), Self::Listed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NeighborhoodChoice {
    Listed(String),
    Other(String),
}

impl NeighborhoodChoice {
    /// Match against the known neighbourhoods ignoring case, else a custom one.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        crate::fixtures::NEIGHBORHOODS
            .iter()
            .find(|n| n.to_lowercase() == trimmed.to_lowercase())
            .map_or_else(|| Self::Other(trimmed.to_owned()), |n| Self::Listed((*n).to_owned()))
    }

    fn value(&self) -> &str {
        match self {
            Self::Listed(v) | Self::Other(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    #[default]
    Form,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("choose a service")]
    MissingService,
    #[error("choose a neighborhood")]
    MissingNeighborhood,
}

impl ErrorCode for RegistrationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "E_REGISTRATION_MISSING_FIELD",
            Self::InvalidEmail(_) => "E_REGISTRATION_EMAIL",
            Self::MissingService => "E_REGISTRATION_NO_SERVICE",
            Self::MissingNeighborhood => "E_REGISTRATION_NO_NEIGHBORHOOD",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub service: Option<ServiceChoice>,
    pub neighborhood: Option<NeighborhoodChoice>,
}

/// A validated sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub service: ServiceChoice,
    pub neighborhood: String,
}

fn required(value: &str, field: &'static str) -> Result<String, RegistrationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

impl RegistrationForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// The first [`RegistrationError`] found in field order.
    pub fn submit(self) -> Result<Registration, RegistrationError> {
        let business_name = required(&self.business_name, "business name")?;
        let owner_name = required(&self.owner_name, "owner name")?;
        let email = required(&self.email, "email")?;
        if !email.contains('@') {
            return Err(RegistrationError::InvalidEmail(email));
        }
        let phone = required(&self.phone, "phone")?;

        let service = match self.service {
            None => return Err(RegistrationError::MissingService),
            Some(ServiceChoice::Other(custom)) => {
                let custom = custom.trim();
                if custom.is_empty() {
                    return Err(RegistrationError::MissingService);
                }
                ServiceChoice::Other(custom.to_owned())
            }
            Some(listed) => listed,
        };

        let neighborhood = self.neighborhood.ok_or(RegistrationError::MissingNeighborhood)?;
        let neighborhood = neighborhood.value().trim();
        if neighborhood.is_empty() {
            return Err(RegistrationError::MissingNeighborhood);
        }

        tracing::info!(business = %business_name, neighborhood, "professional registered");
        Ok(Registration { business_name, owner_name, email, phone, service, neighborhood: neighborhood.to_owned() })
    }
}
