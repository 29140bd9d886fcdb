//! Plain-text rendering of market state for the terminal.
//!
//! Every function returns a `String`; callers decide where it goes. Copy is
//! Spanish, matching the product's audience.

use std::fmt::Write as _;

use market::account::{BusinessProfile, ClientProfile};
use market::app::AccountView;
use market::booking::{BookingAttempt, BookingRequest, BookingStep, TIME_SLOTS};
use market::dashboard::{EARNINGS, ProfessionalDashboard};
use market::map::{MapCommand, Marker};
use market::registration::{Registration, ServiceChoice};
use market::types::{StarFill, star_fills};
use market::{Professional, Review};
use time::{Date, Month, Weekday};

const WEEKDAYS: [&str; 7] = ["lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo"];

fn weekday_es(day: Weekday) -> &'static str {
    WEEKDAYS[usize::from(day.number_days_from_monday())]
}

fn month_es(month: Month) -> &'static str {
    match month {
        Month::January => "enero",
        Month::February => "febrero",
        Month::March => "marzo",
        Month::April => "abril",
        Month::May => "mayo",
        Month::June => "junio",
        Month::July => "julio",
        Month::August => "agosto",
        Month::September => "septiembre",
        Month::October => "octubre",
        Month::November => "noviembre",
        Month::December => "diciembre",
    }
}

/// `"19 de octubre de 2026"`.
#[must_use]
pub fn date_es(date: Date) -> String {
    format!("{} de {} de {}", date.day(), month_es(date.month()), date.year())
}

/// `"lunes, 19 de octubre de 2026"`.
#[must_use]
pub fn long_date_es(date: Date) -> String {
    format!("{}, {}", weekday_es(date.weekday()), date_es(date))
}

#[must_use]
pub fn stars(rating: f64) -> String {
    star_fills(rating, 5)
        .into_iter()
        .map(|fill| match fill {
            StarFill::Full => '★',
            StarFill::Half => '⯪',
            StarFill::Empty => '☆',
        })
        .collect()
}

/// One list row. The highlighted card is prefixed with `>`.
#[must_use]
pub fn card(p: &Professional, highlighted: bool) -> String {
    let marker = if highlighted { '>' } else { ' ' };
    let verified = if p.verified { " ✓" } else { "" };
    format!(
        "{marker} [{id}] {name}{verified}\n    {icon} {label} · {hood}\n    {stars} {rating:.1} ({reviews} reseñas) · {price} · {years} años",
        id = p.id,
        name = p.name,
        icon = p.service.icon(),
        label = p.service.label(),
        hood = p.neighborhood,
        stars = stars(p.rating),
        rating = p.rating,
        reviews = p.review_count,
        price = p.price_range,
        years = p.years_experience,
    )
}

#[must_use]
pub fn list(professionals: &[Professional], selected: Option<&str>) -> String {
    if professionals.is_empty() {
        return "No se encontraron profesionales\nPrueba a cambiar los filtros de búsqueda".to_owned();
    }
    let cards: Vec<String> = professionals.iter().map(|p| card(p, selected == Some(p.id.as_str()))).collect();
    format!("{} profesionales\n{}", professionals.len(), cards.join("\n"))
}

#[must_use]
pub fn profile(p: &Professional, reviews: &[&Review]) -> String {
    let mut out = card(p, false);
    let _ = write!(out, "\n\n{}\n\nReseñas ({})", p.description, reviews.len());
    if reviews.is_empty() {
        out.push_str("\n  Todavía no hay reseñas");
    }
    for r in reviews {
        let _ = write!(out, "\n  {} {} · {}\n    {}", stars(r.rating), r.author, date_es(r.date), r.comment);
    }
    out
}

#[must_use]
pub fn marker(m: &Marker) -> String {
    format!(
        "{sel} {id:>3} {icon} {lng:.4},{lat:.4}",
        sel = if m.selected { '*' } else { ' ' },
        id = m.professional_id,
        icon = m.service.icon(),
        lng = m.coordinates.lng,
        lat = m.coordinates.lat,
    )
}

#[must_use]
pub fn command(cmd: &MapCommand) -> String {
    match cmd {
        MapCommand::FlyTo { center, zoom } => format!("fly_to {:.4},{:.4} zoom {zoom}", center.lng, center.lat),
    }
}

/// Current booking dialog step with the choices it offers.
#[must_use]
pub fn booking_step(attempt: &BookingAttempt, professional: &Professional) -> String {
    let mut out = format!("Reservar con {}", professional.name);
    match attempt.step() {
        BookingStep::Date => {
            let chosen = attempt.date().map_or_else(|| "ninguna".to_owned(), long_date_es);
            let _ = write!(out, "\nPaso 1/2 · Elige fecha (seleccionada: {chosen})");
        }
        BookingStep::Time => {
            let slots: Vec<String> = TIME_SLOTS
                .iter()
                .map(|s| if attempt.time() == Some(*s) { format!("[{s}]") } else { (*s).to_owned() })
                .collect();
            let _ = write!(out, "\nPaso 2/2 · Elige hora\n  {}", slots.join(" "));
        }
        BookingStep::Confirmed => out.push_str("\nReserva enviada"),
    }
    out
}

/// Summary shown once a booking request has been sent.
#[must_use]
pub fn confirmation(request: &BookingRequest, professional: &Professional) -> String {
    format!(
        "Reserva pendiente de confirmación\nTu solicitud ha sido enviada a la empresa\n\n  {name} · {label}\n  {date}\n  {time}h\n  {hood}, Barcelona\n\n⏳ Esperando confirmación ({status})\nSolicitud {id}",
        name = professional.name,
        label = professional.service.label(),
        date = long_date_es(request.date),
        time = request.time,
        hood = professional.neighborhood,
        status = request.status.label(),
        id = request.id,
    )
}

#[must_use]
pub fn dashboard(dash: &ProfessionalDashboard) -> String {
    let stats = dash.stats();
    let mut out = format!(
        "Ingresos reservados: {}€ · Activas: {} · Pendientes: {}\n",
        stats.booked_revenue, stats.active, stats.pending
    );
    let chart: Vec<String> = EARNINGS.iter().map(|(month, amount)| format!("{month} {amount}€")).collect();
    let _ = writeln!(out, "Ganancias: {}", chart.join(" · "));
    let visible = dash.visible();
    if visible.is_empty() {
        out.push_str("Sin reservas");
    }
    for b in visible {
        let _ = write!(
            out,
            "\n[{id}] {client} · {date} {time} · {amount}€ · {status}",
            id = b.id,
            client = b.client_name,
            date = b.date,
            time = b.time,
            amount = b.amount,
            status = b.status.label(),
        );
    }
    if let Some(b) = dash.selected() {
        let _ = write!(out, "\n\n{}\n  {}\n  {} · {}\n  {}", b.client_name, b.address, b.phone, b.email, b.notes);
    }
    out
}

fn client(c: &ClientProfile) -> String {
    let favorites: Vec<&str> = c.favorite_services.iter().map(|s| s.label()).collect();
    let mut out = format!(
        "{}\n  {}\n  {}\n  {}\n  Miembro desde {} · {} reservas\n  Favoritos: {}\n\nMis reservas",
        c.name,
        c.email,
        c.phone,
        c.address,
        c.member_since,
        c.total_bookings,
        favorites.join(", ")
    );
    for b in &c.bookings {
        let _ = write!(out, "\n  {} · {} {} · {}€ · {}", b.professional_name, b.date, b.time, b.amount, b.status.label());
    }
    out
}

fn business(b: &BusinessProfile) -> String {
    format!(
        "{name}\n  {icon} {label}\n  {email}\n  {phone}\n  {address}\n  Miembro desde {since}\n  {stars} {rating:.1} ({reviews} reseñas) · {jobs} trabajos · respuesta {response} · {years} años",
        name = b.business_name,
        icon = b.service.icon(),
        label = b.service.label(),
        email = b.email,
        phone = b.phone,
        address = b.address,
        since = b.member_since,
        stars = stars(b.rating),
        rating = b.rating,
        reviews = b.review_count,
        jobs = b.completed_jobs,
        response = b.response_time,
        years = b.years_experience,
    )
}

#[must_use]
pub fn account(view: &AccountView) -> String {
    match view {
        AccountView::Client(c) => client(c),
        AccountView::Business(b) => business(b),
    }
}

#[must_use]
pub fn registration(reg: &Registration) -> String {
    let service = match &reg.service {
        ServiceChoice::Listed(s) => s.label().to_owned(),
        ServiceChoice::Other(custom) => custom.clone(),
    };
    format!(
        "¡Solicitud enviada!\n{} ({}) · {} · {}\nTe contactaremos en {} o {}",
        reg.business_name, reg.owner_name, service, reg.neighborhood, reg.email, reg.phone
    )
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
