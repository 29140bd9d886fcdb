use std::collections::HashMap;

use time::macros::date;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_uses_defaults() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.geo_timeout, Duration::from_secs(5));
    assert_eq!(config.log_level, Level::WARN);
}

#[test]
fn all_keys_are_parsed() {
    let config = AppConfig::from_lookup(lookup(&[
        ("IFIX_FIXTURES", "data/catalog.json"),
        ("IFIX_LOG_LEVEL", "DEBUG"),
        ("IFIX_DEVICE_LOCATION", "2.16, 41.39"),
        ("IFIX_GEO_TIMEOUT_MS", "250"),
        ("IFIX_TODAY", "2026-10-16"),
    ]))
    .unwrap();
    assert_eq!(config.fixtures, Some(PathBuf::from("data/catalog.json")));
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(config.device_location, Some(Coordinates::new(2.16, 41.39)));
    assert_eq!(config.geo_timeout, Duration::from_millis(250));
    assert_eq!(config.today, Some(date!(2026-10-16)));
}

#[test]
fn blank_values_count_as_unset() {
    let config = AppConfig::from_lookup(lookup(&[("IFIX_LOG_LEVEL", "  "), ("IFIX_TODAY", "")])).unwrap();
    assert_eq!(config.log_level, Level::WARN);
    assert!(config.today.is_none());
}

#[test]
fn unknown_level_is_rejected() {
    let err = AppConfig::from_lookup(lookup(&[("IFIX_LOG_LEVEL", "loud")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "IFIX_LOG_LEVEL", .. }));
}

#[test]
fn malformed_location_is_rejected() {
    for raw in ["2.16", "east,41.39", "200,41.39"] {
        let err = AppConfig::from_lookup(lookup(&[("IFIX_DEVICE_LOCATION", raw)])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "IFIX_DEVICE_LOCATION", .. }), "{raw}");
    }
}

#[test]
fn non_numeric_timeout_is_rejected() {
    let err = AppConfig::from_lookup(lookup(&[("IFIX_GEO_TIMEOUT_MS", "soon")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "IFIX_GEO_TIMEOUT_MS", .. }));
}

#[test]
fn bad_date_names_the_key() {
    let err = parse_date("--date", "16/10/2026").unwrap_err();
    assert!(err.to_string().starts_with("invalid --date"));
}
