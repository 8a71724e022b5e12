//! Integration tests for loading typeset settings from files.

use std::io::Write;

use tempfile::NamedTempFile;
use term_typeset::prelude::*;
use term_typeset::typeset::{BOOLEAN, CATEGORICAL, NUMERIC, URL};

fn settings_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_settings_from_file() {
    let file = settings_file(
        r#"{
            "vars": {
                "num": {"low_categorical_threshold": 0},
                "url": {"active": true}
            }
        }"#,
    );
    let settings = Settings::from_json_file(file.path()).unwrap();
    assert_eq!(settings.vars.num.low_categorical_threshold, 0);

    let typeset = Typeset::new(settings).unwrap();
    assert!(typeset.get(URL).is_some());
    assert_eq!(
        typeset
            .infer_type(&Column::new("s1", [1.0; 9]))
            .type_name,
        NUMERIC
    );
}

#[test]
fn test_settings_round_trip_through_file() {
    let mut settings = Settings::default();
    settings.vars.num.low_categorical_threshold = 2;
    settings.vars.bool.mappings = [("ja".to_string(), true), ("nein".to_string(), false)]
        .into_iter()
        .collect();

    let file = settings_file(&settings.to_json_string().unwrap());
    let loaded = Settings::from_json_file(file.path()).unwrap();
    assert_eq!(loaded, settings);

    let typeset = Typeset::new(loaded).unwrap();
    assert_eq!(
        typeset
            .infer_type(&Column::new("antwort", ["Ja", "nein"]))
            .type_name,
        BOOLEAN
    );
    assert_eq!(
        typeset
            .infer_type(&Column::new("answer", ["yes", "no"]))
            .type_name,
        CATEGORICAL
    );
}

#[test]
fn test_settings_file_errors() {
    let missing = Settings::from_json_file("/nonexistent/typeset-settings.json").unwrap_err();
    assert!(matches!(missing, TypesetError::Io(_)));

    let file = settings_file("{ not json");
    let malformed = Settings::from_json_file(file.path()).unwrap_err();
    assert!(matches!(malformed, TypesetError::Serialization(_)));

    let file = settings_file(r#"{"vars": {"bool": {"mappings": {"": true}}}}"#);
    let invalid = Settings::from_json_file(file.path()).unwrap_err();
    assert!(matches!(invalid, TypesetError::InvalidConfiguration(_)));
}
