use anyhow::Result;
use std::path::Path;

use crate::{
    collector::collect_schema_inputs, config::AppConfig, prompt::TerminalEngine,
    schema::load_schema, style::Style,
};

pub async fn run(path: &Path, cfg: &AppConfig) -> Result<()> {
    let schema = load_schema(path)?;
    let mut engine = TerminalEngine::new();
    let result = collect_schema_inputs(&mut engine, Some(&schema), &Style::from(cfg)).await?;
    super::print_json(&result)
}
