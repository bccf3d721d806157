//! Presentation helpers shared by the collectors and the terminal engine

use console::style;

use crate::config::AppConfig;

/// Maximum length of a compacted description, ellipsis included
pub const COMPACT_DESCRIPTION_LEN: usize = 100;
const ELLIPSIS: &str = "...";

/// How prompt labels are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Prefix put in front of required questions
    pub required_marker: String,
    /// Collapse and truncate long argument descriptions
    pub compact_descriptions: bool,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            required_marker: "* ".to_string(),
            compact_descriptions: false,
        }
    }
}

impl From<&AppConfig> for Style {
    fn from(cfg: &AppConfig) -> Self {
        Style {
            required_marker: cfg.required_marker.clone(),
            compact_descriptions: cfg.compact_descriptions,
        }
    }
}

impl Style {
    /// Prompt label with the required marker when needed
    pub fn label(&self, required: bool, text: &str) -> String {
        if required {
            format!("{}{}", self.required_marker, text)
        } else {
            text.to_string()
        }
    }

    pub fn description(&self, description: Option<&str>) -> String {
        format_description(description, self.compact_descriptions)
    }
}

/// Normalize a description for display
///
/// Without `compact` the text is returned as is. With `compact`, runs of
/// whitespace collapse to a single space and the result is cut to
/// [`COMPACT_DESCRIPTION_LEN`] characters, ending in `...` when shortened.
pub fn format_description(description: Option<&str>, compact: bool) -> String {
    let Some(description) = description else {
        return String::new();
    };
    if !compact {
        return description.to_string();
    }
    let normalized = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() <= COMPACT_DESCRIPTION_LEN {
        return normalized;
    }
    let keep = COMPACT_DESCRIPTION_LEN - ELLIPSIS.len();
    let mut out: String = normalized.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

pub fn dim(text: &str) -> String {
    style(text).dim().to_string()
}

pub fn underline(text: &str) -> String {
    style(text).underlined().to_string()
}
