//! Configuration management for the schema inputs CLI
//!
//! Settings live in a single YAML file, located by:
//! 1. the `SCHEMA_INPUTS_CONFIG` environment variable, or
//! 2. `<config dir>/schema-inputs/config.yaml` (e.g. `~/.config` on Linux).
//!
//! A missing file is not an error; every setting has a default.
//!
//! ## Environment Variable Expansion
//!
//! The file supports environment variable expansion with the following syntax:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set

use anyhow::Context;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

use crate::constants::{CONFIG_DIR, CONFIG_ENV, CONFIG_FILE};

/// Settings loaded from `config.yaml`
///
/// # Example
///
/// ```yaml
/// requiredMarker: "* "
/// compactDescriptions: true
/// confirmTemplate: true
/// logging:
///   default: warn
///   modules:
///     schema_inputs_cli::collector: debug
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Prefix shown in front of required prompts
    #[serde(default = "default_required_marker")]
    pub required_marker: String,
    /// Collapse whitespace in argument descriptions and cut them to 100 characters
    #[serde(default)]
    pub compact_descriptions: bool,
    /// Ask for confirmation before returning a constructed URI
    #[serde(default = "default_true")]
    pub confirm_template: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Log level settings, overridden entirely by `RUST_LOG`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Level for everything not listed in `modules`
    #[serde(default = "default_log_level")]
    pub default: String,
    /// Per-target level overrides
    #[serde(default)]
    pub modules: IndexMap<String, String>,
}

fn default_required_marker() -> String {
    "* ".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            required_marker: default_required_marker(),
            compact_descriptions: false,
            confirm_template: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            default: default_log_level(),
            modules: IndexMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive string, e.g. `warn,schema_inputs_cli::collector=debug`
    pub fn directives(&self) -> String {
        let mut filter = self.default.clone();
        for (module, level) in &self.modules {
            filter.push_str(&format!(",{module}={level}"));
        }
        filter
    }
}

/// Where the config file is expected
pub fn config_path() -> PathBuf {
    env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push(CONFIG_DIR);
            p.push(CONFIG_FILE);
            p
        })
}

/// Load the config from its default location
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(&config_path())
}

/// Load the config from `path`, falling back to defaults when it does not exist
pub fn load_config_from(path: &Path) -> anyhow::Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let data = preprocess_config(path)?;
    if data.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let cfg: AppConfig = serde_yaml::from_str(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

pub fn save_config(cfg: &AppConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_yaml::to_string(cfg)?;
    fs::write(path, data).with_context(|| format!("writing config {}", path.display()))?;
    Ok(())
}

pub fn expand_env_placeholders(input: &str) -> String {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let op = caps.get(2).map_or("", |m| m.as_str());
        let val = caps.get(3).map_or("", |m| m.as_str());
        let var = env::var(var_name).ok();

        match (var.as_deref(), op) {
            (Some(v), "") => v.to_string(),                       // ${VAR}
            (Some(v), ":-") if !v.is_empty() => v.to_string(),    // ${VAR:-default}
            (_, ":-") => val.to_string(),
            (Some(v), "-") => v.to_string(),                      // ${VAR-default}
            (None, "-") => val.to_string(),
            (Some(v), ":+") if !v.is_empty() => val.to_string(),  // ${VAR:+alt}
            (Some(_), "+") => val.to_string(),                    // ${VAR+alt}
            _ => "".to_string(),
        }
    })
    .to_string()
}

pub fn preprocess_config(path: &Path) -> anyhow::Result<String> {
    let raw_data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Ok(expand_env_placeholders(&raw_data))
}
