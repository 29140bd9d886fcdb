use market::Catalog;
use market::booking::BookingStatus;
use market::dashboard::ProfessionalDashboard;
use market::registration::RegistrationForm;
use time::macros::date;

use super::*;

fn professional(id: &str) -> Professional {
    Catalog::builtin().find(id).cloned().unwrap()
}

#[test]
fn spanish_dates() {
    assert_eq!(date_es(date!(2026-10-19)), "19 de octubre de 2026");
    assert_eq!(long_date_es(date!(2026-10-19)), "lunes, 19 de octubre de 2026");
    assert_eq!(long_date_es(date!(2026-10-18)), "domingo, 18 de octubre de 2026");
}

#[test]
fn stars_show_half_fill() {
    assert_eq!(stars(4.5), "★★★★⯪");
    assert_eq!(stars(5.0), "★★★★★");
    assert_eq!(stars(0.0), "☆☆☆☆☆");
}

#[test]
fn card_marks_highlight_and_verified() {
    let p = professional("1");
    let plain = card(&p, false);
    let highlighted = card(&p, true);
    assert!(plain.starts_with("  [1] Fontanería García"));
    assert!(highlighted.starts_with("> [1]"));
    assert!(plain.contains("Fontanería · Gràcia"));
    assert!(plain.contains("40€-60€/h"));
}

#[test]
fn empty_list_suggests_clearing_filters() {
    assert!(list(&[], None).starts_with("No se encontraron profesionales"));
}

#[test]
fn profile_lists_reviews_or_placeholder() {
    let catalog = Catalog::builtin();
    let with = profile(&professional("1"), &catalog.reviews_for("1"));
    assert!(with.contains("Reseñas (3)"));
    let without = profile(&professional("8"), &catalog.reviews_for("8"));
    assert!(without.contains("Todavía no hay reseñas"));
}

#[test]
fn confirmation_reads_as_pending() {
    let p = professional("3");
    let mut attempt = BookingAttempt::open("3");
    attempt.select_date(date!(2026-10-19), date!(2026-10-16)).unwrap();
    attempt.continue_to_time().unwrap();
    attempt.select_time("10:00").unwrap();
    let request = attempt.confirm().unwrap();
    let text = confirmation(&request, &p);
    assert!(text.starts_with("Reserva pendiente de confirmación"));
    assert!(text.contains("lunes, 19 de octubre de 2026"));
    assert!(text.contains("10:00h"));
    assert!(text.contains(BookingStatus::Pending.label()));
}

#[test]
fn booking_step_brackets_chosen_slot() {
    let p = professional("3");
    let mut attempt = BookingAttempt::open("3");
    assert!(booking_step(&attempt, &p).contains("seleccionada: ninguna"));
    attempt.select_date(date!(2026-10-19), date!(2026-10-16)).unwrap();
    attempt.continue_to_time().unwrap();
    attempt.select_time("17:00").unwrap();
    assert!(booking_step(&attempt, &p).contains("[17:00]"));
}

#[test]
fn dashboard_shows_stats_and_details() {
    let mut dash = ProfessionalDashboard::with_fixtures();
    dash.select("1");
    let text = dashboard(&dash);
    assert!(text.starts_with("Ingresos reservados: 300€ · Activas: 2 · Pendientes: 1"));
    assert!(text.contains("Ana López"));
    assert!(text.contains("Carrer de Balmes"));
}

#[test]
fn account_views_render_their_profile() {
    let client = account(&AccountView::Client(ClientProfile::fixture()));
    assert!(client.contains("Juan Pérez"));
    assert!(client.contains("Favoritos: Fontanería, Electricidad"));
    let business = account(&AccountView::Business(BusinessProfile::fixture()));
    assert!(business.contains("342 trabajos"));
}

#[test]
fn registration_summary_uses_custom_service() {
    let reg = RegistrationForm {
        business_name: "Pintures Puig".into(),
        owner_name: "Jordi Puig".into(),
        email: "jordi@puig.cat".into(),
        phone: "600 111 222".into(),
        service: Some(ServiceChoice::Other("Pintura".into())),
        neighborhood: Some(market::registration::NeighborhoodChoice::Listed("Sants".into())),
    }
    .submit()
    .unwrap();
    assert!(registration(&reg).contains("Pintura · Sants"));
}
