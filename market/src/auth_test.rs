use super::*;

#[test]
fn role_parses_known_values() {
    assert_eq!("client".parse::<Role>(), Ok(Role::Client));
    assert_eq!(" Professional ".parse::<Role>(), Ok(Role::Professional));
}

#[test]
fn role_rejects_anything_else() {
    let err = "admin".parse::<Role>().unwrap_err();
    assert_eq!(err, ParseRoleError("admin".into()));
    assert_eq!(err.error_code(), "E_UNKNOWN_ROLE");
}

#[test]
fn role_serde_is_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Professional).unwrap(), "\"professional\"");
    assert!(serde_json::from_str::<Role>("\"guest\"").is_err());
}

#[test]
fn form_defaults_to_client_login() {
    let form = AuthForm::default();
    assert_eq!(form.mode, AuthMode::Login);
    assert_eq!(form.role, Role::Client);
}

#[test]
fn toggle_mode_flips_between_tabs() {
    let mut form = AuthForm::default();
    form.toggle_mode();
    assert_eq!(form.mode, AuthMode::Register);
    form.toggle_mode();
    assert_eq!(form.mode, AuthMode::Login);
}

#[test]
fn submit_returns_chosen_role() {
    let mut form = AuthForm::default();
    form.set_role(Role::Professional);
    form.toggle_mode();
    assert_eq!(form.submit(), Role::Professional);
}
