//! Line-oriented shell over one [`AppState`] session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each input line is one user action. A failed action prints `code: message`
//! and the session carries on with its state unchanged; only `quit` or end of
//! input ends it.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use market::app::{AppState, Screen, ViewMode};
use market::auth::{ParseRoleError, Role};
use market::booking::{BookingAttempt, BookingError};
use market::dashboard::DashboardError;
use market::filter::{ParseSortError, SortKey};
use market::geo::{self, Locator};
use market::types::ParseServiceError;
use market::{Catalog, ErrorCode, ServiceType};
use time::Date;

use crate::config::{self, ConfigError};
use crate::render;

const HELP: &str = "\
view home|map|registration|dashboard   switch screen
mode split|map|list                    map screen layout
filter <service>                       toggle a service category
rating <min>                           minimum rating (0, 4, 4.5, 4.8)
sort rating|reviews|price              sort key
clear                                  reset category and rating filters
list                                   visible professionals (or dashboard bookings)
markers                                map markers
select <id>                            highlight and fly to a professional
profile <id>                           open a profile
book <id>                              start a booking
date YYYY-MM-DD | continue | back | time HH:MM | confirm
close                                  close the open dialog
pending | details <id> | accept <id>   dashboard actions
login client|professional | logout
account                                open the account view
locate                                 ask for the device position
help | quit";

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("no professional with id {0}")]
    UnknownProfessional(String),
    #[error("no booking in progress")]
    NoBooking,
    #[error("{0}")]
    NotAllowed(&'static str),
    #[error("invalid rating '{0}'")]
    InvalidRating(String),
    #[error(transparent)]
    Service(#[from] ParseServiceError),
    #[error(transparent)]
    Sort(#[from] ParseSortError),
    #[error(transparent)]
    Role(#[from] ParseRoleError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

impl ErrorCode for ShellError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "E_SHELL_UNKNOWN_COMMAND",
            Self::Usage(_) => "E_SHELL_USAGE",
            Self::UnknownProfessional(_) => "E_UNKNOWN_PROFESSIONAL",
            Self::NoBooking => "E_SHELL_NO_BOOKING",
            Self::NotAllowed(_) => "E_SHELL_NOT_ALLOWED",
            Self::InvalidRating(_) => "E_SHELL_RATING",
            Self::Service(e) => e.error_code(),
            Self::Sort(e) => e.error_code(),
            Self::Role(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Booking(e) => e.error_code(),
            Self::Dashboard(e) => e.error_code(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

impl Reply {
    fn text(s: impl Into<String>) -> Self {
        Self::Output(s.into())
    }
}

pub struct Session {
    app: AppState,
    catalog: Catalog,
    today: Date,
    locator: Box<dyn Locator>,
    geo_timeout: Duration,
}

impl Session {
    pub fn new(catalog: Catalog, today: Date, locator: Box<dyn Locator>, geo_timeout: Duration) -> Self {
        Self { app: AppState::new(), catalog, today, locator, geo_timeout }
    }

    #[must_use]
    pub fn app(&self) -> &AppState {
        &self.app
    }

    /// Apply one input line.
    #[allow(clippy::too_many_lines)]
    pub async fn execute(&mut self, line: &str) -> Result<Reply, ShellError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Reply::text(""));
        };
        if command.starts_with('#') {
            return Ok(Reply::text(""));
        }
        let arg = words.next();
        tracing::debug!(command, arg, "shell command");

        match command {
            "help" => Ok(Reply::text(HELP)),
            "quit" | "exit" => Ok(Reply::Quit),
            "view" => self.view(arg),
            "mode" => self.mode(arg),
            "filter" => {
                let service: ServiceType = arg.ok_or(ShellError::Usage("filter <service>"))?.parse()?;
                self.app.toggle_service(service);
                Ok(self.list())
            }
            "rating" => {
                let raw = arg.ok_or(ShellError::Usage("rating <min>"))?;
                let min = raw.parse::<f64>().map_err(|_| ShellError::InvalidRating(raw.to_owned()))?;
                if !(0.0..=5.0).contains(&min) {
                    return Err(ShellError::InvalidRating(raw.to_owned()));
                }
                self.app.set_min_rating(min);
                Ok(self.list())
            }
            "sort" => {
                let key: SortKey = arg.ok_or(ShellError::Usage("sort rating|reviews|price"))?.parse()?;
                self.app.set_sort(key);
                Ok(self.list())
            }
            "clear" => {
                self.app.clear_filters();
                Ok(self.list())
            }
            "list" => Ok(self.list()),
            "markers" => {
                let lines: Vec<String> = self.app.markers(&self.catalog).iter().map(render::marker).collect();
                Ok(Reply::text(lines.join("\n")))
            }
            "select" => {
                let id = arg.ok_or(ShellError::Usage("select <id>"))?;
                let cmd = self
                    .app
                    .select_professional(&self.catalog, id)
                    .ok_or_else(|| ShellError::UnknownProfessional(id.to_owned()))?;
                let mut out = render::command(&cmd);
                if let Some(open) = self.app.profile() {
                    out.push('\n');
                    out.push_str(&self.render_profile(open));
                }
                Ok(Reply::Output(out))
            }
            "profile" => {
                let id = arg.ok_or(ShellError::Usage("profile <id>"))?;
                if !self.app.open_profile(&self.catalog, id) {
                    return Err(ShellError::UnknownProfessional(id.to_owned()));
                }
                Ok(Reply::Output(self.render_profile(id)))
            }
            "book" => {
                let id = arg.ok_or(ShellError::Usage("book <id>"))?;
                if !self.app.start_booking(&self.catalog, id) {
                    return Err(ShellError::UnknownProfessional(id.to_owned()));
                }
                self.booking_reply()
            }
            "date" => {
                let date = config::parse_date("date", arg.ok_or(ShellError::Usage("date YYYY-MM-DD"))?)?;
                let today = self.today;
                self.attempt()?.select_date(date, today)?;
                self.booking_reply()
            }
            "continue" => {
                self.attempt()?.continue_to_time()?;
                self.booking_reply()
            }
            "back" => {
                self.attempt()?.back_to_date()?;
                self.booking_reply()
            }
            "time" => {
                let slot = arg.ok_or(ShellError::Usage("time HH:MM"))?;
                self.attempt()?.select_time(slot)?;
                self.booking_reply()
            }
            "confirm" => {
                let request = self.attempt()?.confirm()?;
                let professional =
                    self.catalog.find(&request.professional_id).ok_or(ShellError::NoBooking)?;
                Ok(Reply::Output(render::confirmation(&request, professional)))
            }
            "close" => {
                if self.app.booking().is_some() {
                    self.app.close_booking();
                } else if self.app.profile().is_some() {
                    self.app.close_profile();
                } else {
                    self.app.close_account();
                }
                Ok(Reply::text(""))
            }
            "pending" => {
                self.require_dashboard()?;
                self.app.dashboard_mut().toggle_pending_only();
                Ok(Reply::Output(render::dashboard(self.app.dashboard())))
            }
            "details" => {
                self.require_dashboard()?;
                let id = arg.ok_or(ShellError::Usage("details <id>"))?;
                if !self.app.dashboard_mut().select(id) {
                    return Err(DashboardError::UnknownBooking(id.to_owned()).into());
                }
                Ok(Reply::Output(render::dashboard(self.app.dashboard())))
            }
            "accept" => {
                self.require_dashboard()?;
                let id = arg.ok_or(ShellError::Usage("accept <id>"))?;
                self.app.dashboard_mut().confirm(id)?;
                Ok(Reply::Output(render::dashboard(self.app.dashboard())))
            }
            "login" => {
                let role: Role = arg.ok_or(ShellError::Usage("login client|professional"))?.parse()?;
                self.app.sign_in(role);
                Ok(Reply::Output(format!("Sesión iniciada como {}", role.label())))
            }
            "logout" => {
                self.app.logout();
                Ok(Reply::text("Sesión cerrada"))
            }
            "account" => {
                self.app.open_account();
                Ok(Reply::Output(self.app.account_view().map(|v| render::account(&v)).unwrap_or_default()))
            }
            "locate" => {
                let outcome = geo::acquire(self.locator.as_ref(), self.geo_timeout).await;
                Ok(match self.app.apply_location(outcome) {
                    Some(cmd) => Reply::Output(render::command(&cmd)),
                    None => Reply::text("Ubicación no disponible"),
                })
            }
            other => Err(ShellError::UnknownCommand(other.to_owned())),
        }
    }

    fn view(&mut self, arg: Option<&str>) -> Result<Reply, ShellError> {
        let screen = match arg {
            Some("home") => Screen::Home,
            Some("map") => Screen::Map,
            Some("registration") => Screen::Registration,
            Some("dashboard") => Screen::Dashboard,
            _ => return Err(ShellError::Usage("view home|map|registration|dashboard")),
        };
        if !self.app.navigate(screen) {
            return Err(ShellError::NotAllowed("the dashboard needs 'login professional'"));
        }
        Ok(if screen == Screen::Dashboard { Reply::Output(render::dashboard(self.app.dashboard())) } else { Reply::text("") })
    }

    fn mode(&mut self, arg: Option<&str>) -> Result<Reply, ShellError> {
        let mode = match arg {
            Some("split") => ViewMode::Split,
            Some("map") => ViewMode::Map,
            Some("list") => ViewMode::List,
            _ => return Err(ShellError::Usage("mode split|map|list")),
        };
        self.app.set_view_mode(mode);
        Ok(Reply::text(""))
    }

    fn list(&self) -> Reply {
        if self.app.screen() == Screen::Dashboard {
            return Reply::Output(render::dashboard(self.app.dashboard()));
        }
        Reply::Output(render::list(&self.app.visible(&self.catalog), self.app.selected()))
    }

    fn render_profile(&self, id: &str) -> String {
        self.catalog.find(id).map(|p| render::profile(p, &self.catalog.reviews_for(id))).unwrap_or_default()
    }

    fn attempt(&mut self) -> Result<&mut BookingAttempt, ShellError> {
        self.app.booking_mut().ok_or(ShellError::NoBooking)
    }

    fn booking_reply(&self) -> Result<Reply, ShellError> {
        let attempt = self.app.booking().ok_or(ShellError::NoBooking)?;
        let professional = self.catalog.find(attempt.professional_id()).ok_or(ShellError::NoBooking)?;
        Ok(Reply::Output(render::booking_step(attempt, professional)))
    }

    fn require_dashboard(&self) -> Result<(), ShellError> {
        if self.app.screen() == Screen::Dashboard {
            Ok(())
        } else {
            Err(ShellError::NotAllowed("open the dashboard first with 'view dashboard'"))
        }
    }
}

/// Feed every line of `input` to `session`, writing replies to `output`.
pub async fn run(session: &mut Session, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match session.execute(&line).await {
            Ok(Reply::Quit) => break,
            Ok(Reply::Output(text)) if text.is_empty() => {}
            Ok(Reply::Output(text)) => writeln!(output, "{text}")?,
            Err(error) => {
                tracing::warn!(%error, code = error.error_code(), "shell command failed");
                writeln!(output, "{}: {error}", error.error_code())?;
            }
        }
    }
    output.flush()
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
