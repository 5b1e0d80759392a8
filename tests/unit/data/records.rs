use super::*;

#[test]
fn records_parse_from_object_and_expose_title() {
    let recs = DataRecords::from_str_json(
        r#"{"door": {"title": "Door", "floor": 2}, "lamp": {"title": 7}, "raw": [1, 2]}"#,
    )
    .unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs.get("door").unwrap().title(), Some("Door"));
    assert_eq!(
        recs.get("door").unwrap().field("floor"),
        Some(&serde_json::json!(2))
    );
    // non-string titles are not used as tooltips
    assert_eq!(recs.get("lamp").unwrap().title(), None);
    assert_eq!(recs.get("raw").unwrap().title(), None);
    assert_eq!(recs.keys().collect::<Vec<_>>(), vec!["door", "lamp", "raw"]);
    assert_eq!(
        recs.get("door").unwrap().value(),
        &serde_json::json!({"title": "Door", "floor": 2})
    );
    assert_eq!(recs.get("raw").unwrap().value(), &serde_json::json!([1, 2]));
}

#[test]
fn malformed_or_non_object_payload_is_a_parse_error() {
    let err = DataRecords::from_str_json("{not json").unwrap_err();
    assert!(matches!(err, AnimapperError::DataParse(_)));

    let err = DataRecords::from_str_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, AnimapperError::DataParse(_)));
}

#[test]
fn empty_object_is_valid() {
    let recs = DataRecords::from_slice(b"{}").unwrap();
    assert!(recs.is_empty());
}
