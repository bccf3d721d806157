use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::AppConfig;

pub mod args;
pub mod completions;
pub mod init;
pub mod plan;
pub mod schema;
pub mod template;

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Write a default config file (if none exists)")]
    Init,
    #[command(about = "Prompt for every scalar in a JSON Schema; print the assembled object")]
    Schema {
        /// JSON or YAML schema file, or '-' for stdin
        path: PathBuf,
    },
    #[command(about = "Print the questions a schema compiles to, without prompting")]
    Plan {
        /// JSON or YAML schema file, or '-' for stdin
        path: PathBuf,
    },
    #[command(about = "Prompt for each URI Template variable; print the confirmed URI")]
    Template { template: String },
    #[command(about = "Prompt for a flat list of named arguments; print the answers")]
    Args {
        /// JSON or YAML list of {name, description, required}, or '-' for stdin
        path: PathBuf,
    },
    #[command(about = "Emit shell completion scripts (bash/zsh/fish)")]
    Completions { shell: String },
}

impl Commands {
    /// Whether the command's behavior depends on the config file
    pub fn reads_config(&self) -> bool {
        !matches!(self, Commands::Init | Commands::Completions { .. })
    }
}

pub async fn run(cmd: Commands, cfg: &AppConfig) -> Result<()> {
    match cmd {
        Commands::Init => init::run().await,
        Commands::Schema { path } => schema::run(&path, cfg).await,
        Commands::Plan { path } => plan::run(&path),
        Commands::Template { template } => template::run(&template, cfg).await,
        Commands::Args { path } => args::run(&path, cfg).await,
        Commands::Completions { shell } => completions::run(shell),
    }
}

/// Print a result as pretty JSON on stdout
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
