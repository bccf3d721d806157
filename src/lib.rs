//! # Schema Inputs CLI Library
//!
//! Turns declarative input descriptions into interactive prompts:
//! - JSON Schemas become nested result objects ([`collector::collect_schema_inputs`])
//! - flat argument lists become name/value maps ([`collector::collect_flat_arguments`])
//! - URI Templates become concrete URIs ([`template::resolve_template_uri`])
//!
//! Prompting always happens through a [`prompt::PromptEngine`], one question at a
//! time, in a fixed order.

use clap::Parser;

pub mod collector;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod question;
pub mod schema;
pub mod style;
pub mod template;
pub mod walker;

pub use collector::{collect_flat_arguments, collect_schema_inputs, ArgumentSpec, ResultObject};
pub use error::{CollectError, TemplateError};
pub use prompt::{Prompt, PromptEngine, TerminalEngine};
pub use question::{compile_questions, FieldPath, Question, QuestionKind};
pub use schema::SchemaNode;
pub use template::{resolve_template_uri, UriTemplate};

/// Interactive collector for schema-described inputs
///
/// Prompts are written to stderr and results to stdout as JSON, so the output can
/// be piped into other tools.
#[derive(Parser)]
#[command(
    name = "schema-inputs",
    version,
    about = "Collect inputs interactively from JSON Schemas, argument lists and URI Templates",
    long_about = "Derives an ordered sequence of terminal prompts from a declarative description of inputs\n(a JSON Schema, a flat argument list or a URI Template) and prints the assembled result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<commands::Commands>,
}
