use anyhow::{Context, Result};
use std::path::Path;

use crate::{
    collector::{collect_flat_arguments, ArgumentSpec},
    config::AppConfig,
    prompt::TerminalEngine,
    schema::read_source,
    style::Style,
};

/// Parse an argument list from JSON or YAML text
pub fn parse_arguments(text: &str) -> Result<Vec<ArgumentSpec>> {
    match serde_json::from_str(text) {
        Ok(args) => Ok(args),
        Err(json_err) => serde_yaml::from_str(text).with_context(|| {
            format!("argument list is neither valid JSON ({json_err}) nor YAML")
        }),
    }
}

pub async fn run(path: &Path, cfg: &AppConfig) -> Result<()> {
    let text = read_source(path)?;
    let args = parse_arguments(&text).with_context(|| format!("parsing {}", path.display()))?;
    let mut engine = TerminalEngine::new();
    let answers = collect_flat_arguments(&mut engine, Some(&args), &Style::from(cfg)).await?;
    super::print_json(&answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments_yaml() {
        let args = parse_arguments("- name: token\n  description: API token\n  required: true\n- name: region\n")
            .unwrap();
        assert_eq!(args.len(), 2);
        assert!(args[0].required);
        assert_eq!(args[1].description, None);
        assert!(!args[1].required);
    }
}
