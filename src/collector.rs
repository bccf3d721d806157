//! Sequential collection of answers into structured results

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use tracing::{debug, info};

use crate::error::CollectError;
use crate::prompt::{Prompt, PromptEngine};
use crate::question::{compile_questions, FieldPath, Question};
use crate::schema::SchemaNode;
use crate::style::Style;

/// Nested answers keyed by property name
pub type ResultObject = Map<String, Value>;

/// One entry of a flat argument list
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// Prompt for every question compiled from `schema` and assemble the answers
///
/// An absent schema, or one without properties, yields an empty object without
/// prompting. Blank answers are left out of the result. Cancellation at any
/// prompt aborts the remaining questions.
pub async fn collect_schema_inputs(
    engine: &mut dyn PromptEngine,
    schema: Option<&SchemaNode>,
    style: &Style,
) -> Result<ResultObject, CollectError> {
    let mut results = ResultObject::new();
    let Some(schema) = schema.filter(|s| !s.is_empty()) else {
        return Ok(results);
    };

    let mut queue: VecDeque<Question> = compile_questions(schema).into();
    debug!(count = queue.len(), "compiled schema questions");

    while let Some(question) = queue.pop_front() {
        let prompt = Prompt {
            message: style.label(question.required, &question.path.to_string()),
            required: question.required,
            kind: question.kind,
        };
        let value = engine.ask(&prompt).await?;
        if value.as_str() == Some("") {
            debug!(path = %question.path, "left blank");
            continue;
        }
        debug!(path = %question.path, "answered");
        set_at_path(&mut results, &question.path, value);
    }

    info!(fields = results.len(), "schema inputs collected");
    Ok(results)
}

/// Prompt once per argument, in order, returning the raw answers
///
/// Blank answers are kept as empty strings.
pub async fn collect_flat_arguments(
    engine: &mut dyn PromptEngine,
    args: Option<&[ArgumentSpec]>,
    style: &Style,
) -> Result<IndexMap<String, String>, CollectError> {
    let mut answers = IndexMap::new();
    let Some(args) = args.filter(|a| !a.is_empty()) else {
        return Ok(answers);
    };

    for arg in args {
        let text = format!(
            "{}: {}",
            arg.name,
            style.description(arg.description.as_deref())
        );
        let prompt = Prompt {
            required: arg.required,
            ..Prompt::text(style.label(arg.required, &text))
        };
        let value = engine.ask(&prompt).await?;
        let answer = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        answers.insert(arg.name.clone(), answer);
    }

    info!(count = answers.len(), "arguments collected");
    Ok(answers)
}

/// Write `value` at `path`, creating intermediate objects as needed
///
/// A non-object value standing where an intermediate object is needed is
/// replaced. Writing at the root path is a no-op.
pub fn set_at_path(target: &mut ResultObject, path: &FieldPath, value: Value) {
    let Some((leaf, parents)) = path.segments().split_last() else {
        return;
    };
    let mut cursor = target;
    for segment in parents {
        let slot = cursor
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return;
        };
        cursor = map;
    }
    cursor.insert(leaf.clone(), value);
}
