//! Mock sign-in: a role picker with login and register tabs.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Professional,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Professional => "professional",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Client => "Cliente",
            Self::Professional => "Profesional",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?} (expected client or professional)")]
pub struct ParseRoleError(pub String);

impl ErrorCode for ParseRoleError {
    fn error_code(&self) -> &'static str {
        "E_UNKNOWN_ROLE"
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "professional" => Ok(Self::Professional),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// State of the sign-in modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub role: Role,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self { mode: AuthMode::Login, role: Role::Client }
    }
}

impl AuthForm {
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Any submission succeeds with the chosen role.
    #[must_use]
    pub fn submit(self) -> Role {
        tracing::info!(role = %self.role, mode = ?self.mode, "signed in");
        self.role
    }
}
