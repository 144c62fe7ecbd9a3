//! Loading `EngineConfig` from TOML and JSON.

use std::io::Write;

use theoryx_core::{ConfigError, Engine, EngineConfig, EngineError};

#[test]
fn toml_with_every_key() {
    let config = EngineConfig::from_toml_str(
        r#"
categories = ["a", "b", "tie"]
beta = 3.0
epsilon = 1e-4
precision = 8
summary_precision = 2
"#,
    )
    .unwrap();
    assert_eq!(config.categories, ["a", "b", "tie"]);
    assert_eq!(config.beta, 3.0);
    assert_eq!(config.epsilon, 1e-4);
    assert_eq!(config.precision, 8);
    assert_eq!(config.summary_precision, 2);

    let engine = Engine::new(config).unwrap();
    assert_eq!(engine.categories().labels(), ["A", "B", "TIE"]);
}

#[test]
fn missing_keys_use_defaults() {
    let config = EngineConfig::from_toml_str("beta = 1.5\n").unwrap();
    assert_eq!(config.beta, 1.5);
    assert_eq!(config.categories, EngineConfig::default().categories);
    assert_eq!(config.epsilon, EngineConfig::default().epsilon);
}

#[test]
fn json_round_trip_through_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"categories": ["X", "Y"], "beta": 1.0}}"#).unwrap();

    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config.categories, ["X", "Y"]);
    assert_eq!(config.beta, 1.0);
    assert_eq!(config.precision, 6);
}

#[test]
fn toml_file_by_extension() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "epsilon = 0.01").unwrap();
    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config.epsilon, 0.01);
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let err = EngineConfig::from_toml_str("beta = 0.0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Engine(EngineError::InvalidBeta { .. })
    ));

    let err = EngineConfig::from_json_str(r#"{"categories": []}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Engine(EngineError::EmptyCategories)));
}

#[test]
fn syntax_errors_surface_by_format() {
    assert!(matches!(
        EngineConfig::from_toml_str("beta = ").unwrap_err(),
        ConfigError::Toml(_)
    ));
    assert!(matches!(
        EngineConfig::from_json_str("{").unwrap_err(),
        ConfigError::Json(_)
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn report_serializes_in_category_order() {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let report = engine.report(&engine.parse_history("E E T")).unwrap();
    let json = serde_json::to_string(&report).unwrap();

    let t = json.find("\"T\"").unwrap();
    let d = json.find("\"D\"").unwrap();
    let e = json.find("\"E\"").unwrap();
    assert!(t < d && d < e, "{json}");
    assert!(json.contains("\"most_likely\":\"E\""), "{json}");
    assert!(json.contains("\"classification\":\"high probability\""), "{json}");
}
