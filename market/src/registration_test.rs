use super::*;

fn valid_form() -> RegistrationForm {
    RegistrationForm {
        business_name: " Fontanería Nova ".into(),
        owner_name: "Laia Puig".into(),
        email: "laia@nova.cat".into(),
        phone: "+34 600 000 000".into(),
        service: Some(ServiceChoice::Listed(ServiceType::Plumbing)),
        neighborhood: Some(NeighborhoodChoice::Listed("Gràcia".into())),
    }
}

// =============================================================
// Parsing choices
// =============================================================

#[test]
fn service_choice_recognises_listed_services() {
    assert_eq!(ServiceChoice::parse("Cleaning"), ServiceChoice::Listed(ServiceType::Cleaning));
    assert_eq!(ServiceChoice::parse(" Carpintería "), ServiceChoice::Other("Carpintería".into()));
}

#[test]
fn neighborhood_choice_matches_case_insensitively() {
    assert_eq!(NeighborhoodChoice::parse("el born"), NeighborhoodChoice::Listed("El Born".into()));
    assert_eq!(NeighborhoodChoice::parse("Poble Sec"), NeighborhoodChoice::Other("Poble Sec".into()));
}

// =============================================================
// Submit
// =============================================================

#[test]
fn valid_form_submits_trimmed() {
    let reg = valid_form().submit().unwrap();
    assert_eq!(reg.business_name, "Fontanería Nova");
    assert_eq!(reg.neighborhood, "Gràcia");
}

#[test]
fn blank_business_name_is_rejected_first() {
    let form = RegistrationForm { business_name: "  ".into(), email: "bad".into(), ..valid_form() };
    assert_eq!(form.submit().unwrap_err(), RegistrationError::MissingField("business name"));
}

#[test]
fn email_without_at_is_rejected() {
    let form = RegistrationForm { email: "laia.nova.cat".into(), ..valid_form() };
    let err = form.submit().unwrap_err();
    assert_eq!(err.error_code(), "E_REGISTRATION_EMAIL");
}

#[test]
fn missing_phone_is_rejected() {
    let form = RegistrationForm { phone: String::new(), ..valid_form() };
    assert_eq!(form.submit().unwrap_err(), RegistrationError::MissingField("phone"));
}

#[test]
fn missing_or_blank_service_is_rejected() {
    let form = RegistrationForm { service: None, ..valid_form() };
    assert_eq!(form.submit().unwrap_err(), RegistrationError::MissingService);
    let form = RegistrationForm { service: Some(ServiceChoice::Other("  ".into())), ..valid_form() };
    assert_eq!(form.submit().unwrap_err(), RegistrationError::MissingService);
}

#[test]
fn custom_service_is_kept() {
    let form = RegistrationForm { service: Some(ServiceChoice::Other(" Pintura ".into())), ..valid_form() };
    assert_eq!(form.submit().unwrap().service, ServiceChoice::Other("Pintura".into()));
}

#[test]
fn missing_or_blank_neighborhood_is_rejected() {
    let form = RegistrationForm { neighborhood: None, ..valid_form() };
    assert_eq!(form.submit().unwrap_err(), RegistrationError::MissingNeighborhood);
    let form = RegistrationForm { neighborhood: Some(NeighborhoodChoice::Other(String::new())), ..valid_form() };
    assert_eq!(form.submit().unwrap_err(), RegistrationError::MissingNeighborhood);
}

#[test]
fn step_defaults_to_form() {
    assert_eq!(RegistrationStep::default(), RegistrationStep::Form);
}
