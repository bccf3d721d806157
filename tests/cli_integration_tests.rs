use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_cli_help_command() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "--help"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("schema-inputs"));
}

#[test]
fn test_cli_plan_prints_questions() {
    let temp_dir = TempDir::new().unwrap();
    let schema_path = temp_dir.path().join("schema.json");
    fs::write(
        &schema_path,
        r#"{"type":"object","required":["name"],"properties":{
            "name":{"type":"string"},
            "tags":{"type":"array","items":{"type":"string"}},
            "age":{"type":"integer","minimum":0,"maximum":120}}}"#,
    )
    .unwrap();

    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "plan"])
        .arg(&schema_path)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("SCHEMA_INPUTS_CONFIG", temp_dir.path().join("missing.yaml"))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths: Vec<&str> = plan
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["name", "age"]);
    assert_eq!(plan[0]["required"], true);
    assert_eq!(plan[1]["kind"], "number");
}

#[test]
fn test_cli_completions_ignore_malformed_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, "requiredMarker: [unterminated\n").unwrap();

    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "completions", "bash"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("SCHEMA_INPUTS_CONFIG", &config_path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("schema-inputs"));
}
