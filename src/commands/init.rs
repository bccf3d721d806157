use anyhow::Result;

use crate::config::{config_path, save_config, AppConfig};

pub async fn run() -> Result<()> {
    let path = config_path();
    if path.exists() {
        println!("Config already exists at {}", path.display());
    } else {
        save_config(&AppConfig::default(), &path)?;
        println!("Created {}", path.display());
    }
    Ok(())
}
