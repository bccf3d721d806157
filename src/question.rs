//! Compilation of schema nodes into prompt descriptors
//!
//! This module is pure: it never touches the terminal. The collector drives the
//! resulting [`Question`] list through a prompt engine.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::schema::SchemaNode;
use crate::walker::SchemaWalker;

/// Location of an answer in the result object, one segment per property name
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new(segments: Vec<String>) -> Self {
        FieldPath(segments)
    }

    /// This path extended by one property name
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        FieldPath(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What kind of prompt a question needs, with its kind-specific settings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuestionKind {
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        initial: Option<String>,
    },
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        initial: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        /// Answers must be whole numbers (`type: integer`)
        integer: bool,
    },
    Confirm {
        #[serde(skip_serializing_if = "Option::is_none")]
        initial: Option<bool>,
    },
}

impl QuestionKind {
    /// A plain free-text prompt with no default
    pub fn text() -> Self {
        QuestionKind::Text { initial: None }
    }
}

/// Outcome of type dispatch for a single node
#[derive(Debug, Clone, PartialEq)]
pub enum Compiled {
    Question(QuestionKind),
    /// Objects, arrays, union types and anything unrecognized
    Skipped,
}

/// Decide the prompt kind for a node from its `type`
///
/// Defaults of the wrong JSON type are dropped rather than coerced, except for
/// text prompts where any scalar default is shown as its JSON text.
pub fn classify(node: &SchemaNode) -> Compiled {
    match node.type_name() {
        Some("string") => Compiled::Question(QuestionKind::Text {
            initial: node.default.as_ref().map(|d| match d {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        }),
        Some(ty @ ("integer" | "number")) => Compiled::Question(QuestionKind::Number {
            initial: node.default.as_ref().and_then(Value::as_f64),
            min: node.lower_bound(),
            max: node.upper_bound(),
            integer: ty == "integer",
        }),
        Some("boolean") => Compiled::Question(QuestionKind::Confirm {
            initial: node.default.as_ref().and_then(Value::as_bool),
        }),
        _ => Compiled::Skipped,
    }
}

/// A compiled, engine-agnostic prompt descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub path: FieldPath,
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Compile a schema into its ordered question list
///
/// The root node itself never becomes a question.
pub fn compile_questions(schema: &SchemaNode) -> Vec<Question> {
    SchemaWalker::new(schema)
        .filter(|visit| !visit.path.is_root())
        .filter_map(|visit| match classify(visit.node) {
            Compiled::Question(kind) => Some(Question {
                required: visit.is_required(),
                path: visit.path,
                kind,
            }),
            Compiled::Skipped => None,
        })
        .collect()
}
