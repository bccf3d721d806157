use anyhow::Result;

use crate::{config::AppConfig, prompt::TerminalEngine, template::resolve_template_uri};

pub async fn run(template: &str, cfg: &AppConfig) -> Result<()> {
    let mut engine = TerminalEngine::new();
    match resolve_template_uri(&mut engine, template, cfg.confirm_template).await? {
        Some(uri) => println!("{uri}"),
        None => eprintln!("URI not confirmed, nothing to do."),
    }
    Ok(())
}
