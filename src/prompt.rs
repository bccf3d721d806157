//! The prompt engine seam
//!
//! Collectors only ever talk to a [`PromptEngine`], one prompt at a time.
//! [`TerminalEngine`] is the interactive implementation built on `dialoguer`;
//! tests drive the collectors with scripted engines instead.

use async_trait::async_trait;
use console::Term;
use dialoguer::{Confirm, Input};
use serde_json::{Number, Value};

use crate::error::CollectError;
use crate::question::QuestionKind;
use crate::style::{dim, underline};

/// A single prompt request
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Label shown to the user, required marker included
    pub message: String,
    pub required: bool,
    pub kind: QuestionKind,
}

impl Prompt {
    /// Optional free-text prompt with no default
    pub fn text(message: impl Into<String>) -> Self {
        Prompt {
            message: message.into(),
            required: false,
            kind: QuestionKind::text(),
        }
    }

    pub fn confirm(message: impl Into<String>, initial: bool) -> Self {
        Prompt {
            message: message.into(),
            required: false,
            kind: QuestionKind::Confirm {
                initial: Some(initial),
            },
        }
    }
}

/// Something that can answer prompts
///
/// `ask` suspends until the user answers. Text and number prompts answer with a
/// JSON string or number, where an empty string means "left blank"; confirm
/// prompts answer with a JSON boolean. Abandonment is reported as
/// [`CollectError::Cancelled`].
#[async_trait]
pub trait PromptEngine: Send {
    async fn ask(&mut self, prompt: &Prompt) -> Result<Value, CollectError>;

    /// Write an informational line, `value` being the part worth highlighting
    fn show(&mut self, label: &str, value: &str) -> Result<(), CollectError>;
}

/// Interactive engine on the controlling terminal (stderr)
pub struct TerminalEngine {
    term: Term,
}

impl Default for TerminalEngine {
    fn default() -> Self {
        TerminalEngine {
            term: Term::stderr(),
        }
    }
}

impl TerminalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn ask_text(
        &self,
        message: &str,
        required: bool,
        initial: Option<&String>,
    ) -> Result<Value, CollectError> {
        let mut input = Input::<String>::new()
            .with_prompt(dim(message))
            .allow_empty(!required || initial.is_some());
        if let Some(initial) = initial {
            input = input.default(initial.clone());
        }
        let answer = input.interact_text_on(&self.term)?;
        Ok(Value::String(answer))
    }

    fn ask_number(
        &self,
        message: &str,
        required: bool,
        initial: Option<f64>,
        bounds: (Option<f64>, Option<f64>),
        integer: bool,
    ) -> Result<Value, CollectError> {
        let allow_empty = !required || initial.is_some();
        let mut input = Input::<String>::new()
            .with_prompt(dim(message))
            .allow_empty(allow_empty)
            .validate_with(move |text: &String| -> Result<(), String> {
                if text.trim().is_empty() {
                    return Ok(());
                }
                parse_number(text, integer, bounds).map(|_| ())
            });
        if let Some(initial) = initial {
            input = input.default(initial.to_string());
        }
        let answer = input.interact_text_on(&self.term)?;
        if answer.trim().is_empty() {
            return Ok(Value::String(String::new()));
        }
        parse_number(&answer, integer, bounds)
            .map_err(|msg| std::io::Error::new(std::io::ErrorKind::InvalidData, msg).into())
    }

    fn ask_confirm(&self, message: &str, initial: Option<bool>) -> Result<Value, CollectError> {
        Confirm::new()
            .with_prompt(dim(message))
            .default(initial.unwrap_or(false))
            .interact_on_opt(&self.term)?
            .map(Value::Bool)
            .ok_or(CollectError::Cancelled)
    }
}

#[async_trait]
impl PromptEngine for TerminalEngine {
    async fn ask(&mut self, prompt: &Prompt) -> Result<Value, CollectError> {
        match &prompt.kind {
            QuestionKind::Text { initial } => {
                self.ask_text(&prompt.message, prompt.required, initial.as_ref())
            }
            QuestionKind::Number {
                initial,
                min,
                max,
                integer,
            } => self.ask_number(
                &prompt.message,
                prompt.required,
                *initial,
                (*min, *max),
                *integer,
            ),
            QuestionKind::Confirm { initial } => self.ask_confirm(&prompt.message, *initial),
        }
    }

    fn show(&mut self, label: &str, value: &str) -> Result<(), CollectError> {
        self.term
            .write_line(&format!("{} {}", label, underline(value)))?;
        Ok(())
    }
}

/// Parse a numeric answer and check it against inclusive bounds
pub fn parse_number(
    text: &str,
    integer: bool,
    (min, max): (Option<f64>, Option<f64>),
) -> Result<Value, String> {
    let text = text.trim();
    let (value, number) = if integer {
        let n: i64 = text
            .parse()
            .map_err(|_| format!("'{text}' is not a whole number"))?;
        (n as f64, Number::from(n))
    } else if let Ok(n) = text.parse::<i64>() {
        // whole answers stay integers in the result
        (n as f64, Number::from(n))
    } else {
        let n: f64 = text
            .parse()
            .map_err(|_| format!("'{text}' is not a number"))?;
        let number = Number::from_f64(n).ok_or_else(|| format!("'{text}' is not finite"))?;
        (n, number)
    };
    if let Some(min) = min {
        if value < min {
            return Err(format!("must be at least {min}"));
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(format!("must be at most {max}"));
        }
    }
    Ok(Value::Number(number))
}
