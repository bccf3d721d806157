use schema_inputs_cli::config::{self, AppConfig};
use schema_inputs_cli::style::Style;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let cfg = config::load_config_from(&dir.path().join("nope.yaml")).unwrap();
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn test_config_expands_env_and_feeds_style() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::env::set_var("SCHEMA_INPUTS_TEST_MARKER", "! ");
    fs::write(
        &path,
        r#"requiredMarker: "${SCHEMA_INPUTS_TEST_MARKER}"
compactDescriptions: ${SCHEMA_INPUTS_TEST_COMPACT_UNSET:-true}
confirmTemplate: false
logging:
  default: info
  modules:
    schema_inputs_cli::template: trace
"#,
    )
    .unwrap();

    let cfg = config::load_config_from(&path).unwrap();
    assert!(!cfg.confirm_template);
    assert_eq!(cfg.logging.directives(), "info,schema_inputs_cli::template=trace");

    let style = Style::from(&cfg);
    assert_eq!(style.required_marker, "! ");
    assert!(style.compact_descriptions);
}

#[test]
fn test_save_then_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/dir/config.yaml");
    let cfg = AppConfig {
        compact_descriptions: true,
        ..AppConfig::default()
    };

    config::save_config(&cfg, &path).unwrap();

    assert_eq!(config::load_config_from(&path).unwrap(), cfg);
}
