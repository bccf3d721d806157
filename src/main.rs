//! # Schema Inputs CLI
//!
//! Interactive collection of inputs described by a JSON Schema, a flat argument
//! list or a URI Template.
//!
//! ## Quick Start
//!
//! ```bash
//! # Fill in an object described by a JSON Schema
//! schema-inputs schema tool-input.json
//!
//! # Show the questions a schema compiles to, without prompting
//! schema-inputs plan tool-input.json
//!
//! # Build a resource URI from a template
//! schema-inputs template 'https://api.example/{id}{?fields}'
//!
//! # Answer a flat argument list
//! schema-inputs args prompt-args.yaml
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/schema-inputs/config.yaml`, or the file named
//! by `SCHEMA_INPUTS_CONFIG`. Run `schema-inputs init` to write the defaults.

use anyhow::Result;
use clap::Parser;
use schema_inputs_cli::{commands, config, constants::EXIT_CANCELLED, logging, CollectError, Cli};

/// Main entry point
///
/// Abandonment at any prompt exits with status 130 rather than reporting an error.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap_or_else(|| {
        eprintln!("No command provided. Use --help to see available commands.");
        std::process::exit(1);
    });

    // init and completions must keep working with a broken config file
    let cfg = if cmd.reads_config() {
        config::load_config()?
    } else {
        config::load_config().unwrap_or_default()
    };
    logging::init_with_config(&cfg.logging);

    match commands::run(cmd, &cfg).await {
        Err(err) if err.downcast_ref::<CollectError>().is_some_and(CollectError::is_cancelled) => {
            eprintln!("Cancelled.");
            std::process::exit(EXIT_CANCELLED);
        }
        other => other,
    }
}
