/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "SCHEMA_INPUTS_CONFIG";
/// Directory under the platform config dir holding the config file
pub const CONFIG_DIR: &str = "schema-inputs";
pub const CONFIG_FILE: &str = "config.yaml";
/// Binary name used for shell completions
pub const BIN_NAME: &str = "schema-inputs";
/// Exit status when the user abandons a collection
pub const EXIT_CANCELLED: i32 = 130;
