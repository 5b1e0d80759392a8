use super::*;

#[test]
fn defaults_apply_to_missing_fields() {
    let cfg = AnimapperConfig::from_reader(r#"{"graphic": "map.svg", "data": "map.json"}"#.as_bytes())
        .unwrap();
    assert_eq!(cfg, AnimapperConfig::new("map.svg", "map.json"));
    assert_eq!(cfg.fetch_mode, FetchMode::NonBlocking);
    assert_eq!(cfg.focus_policy, FocusPolicy::Always);
    assert_eq!(cfg.scan_scope, ScanScope::Mount);
}

#[test]
fn snake_case_variants_parse() {
    let cfg = AnimapperConfig::from_reader(
        r#"{"graphic": "a.svg", "data": "a.json", "fetch_mode": "blocking",
            "focus_policy": "with_record", "scan_scope": "document"}"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.fetch_mode, FetchMode::Blocking);
    assert_eq!(cfg.focus_policy, FocusPolicy::WithRecord);
    assert_eq!(cfg.scan_scope, ScanScope::Document);
}

#[test]
fn missing_locator_or_bad_json_is_rejected() {
    assert!(AnimapperConfig::from_reader(r#"{"graphic": "a.svg"}"#.as_bytes()).is_err());
    assert!(AnimapperConfig::from_reader("nope".as_bytes()).is_err());
    assert!(AnimapperConfig::from_path("target/does/not/exist.json").is_err());
}

#[test]
fn validate_rejects_blank_locators() {
    assert!(AnimapperConfig::new("a.svg", "a.json").validate().is_ok());
    assert!(AnimapperConfig::new(" ", "a.json").validate().is_err());
    assert!(AnimapperConfig::new("a.svg", "").validate().is_err());
}
