//! JSON Schema subset understood by the collector
//!
//! Only the keywords that influence prompting are modelled:
//! `type`, `default`, `minimum`/`exclusiveMinimum`, `maximum`/`exclusiveMaximum`,
//! `properties`, `items` and `required`. Everything else in a document is ignored
//! during deserialization.
//!
//! ## Example
//!
//! ```yaml
//! type: object
//! required: [name]
//! properties:
//!   name:
//!     type: string
//!   age:
//!     type: integer
//!     minimum: 0
//!     maximum: 120
//! ```

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fs, io::Read, path::Path};

/// One node of a schema document
///
/// Property order is kept exactly as declared, since it defines prompt order.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Declared type, either a single name or a list of names
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_decl: Option<TypeDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default value, used as the prompt's initial answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<Bound>,
    /// Child schemas of an `object`, in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    /// Item schema(s) of an `array`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    /// Names of the properties that must be answered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// The `type` keyword
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TypeDecl {
    Single(String),
    /// Union types such as `["string", "null"]`; never dispatched to a prompt
    Union(Vec<String>),
}

/// The `items` keyword: one schema for every element, or a positional tuple
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Items {
    Single(Box<SchemaNode>),
    Tuple(Vec<SchemaNode>),
}

impl Items {
    pub fn schemas(&self) -> Vec<&SchemaNode> {
        match self {
            Items::Single(node) => vec![node.as_ref()],
            Items::Tuple(nodes) => nodes.iter().collect(),
        }
    }
}

/// An `exclusiveMinimum`/`exclusiveMaximum` value
///
/// Draft 6+ documents give a number; draft 4 documents give a boolean flag that
/// modifies `minimum`/`maximum`. Only the numeric form is usable as a bound.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum Bound {
    Value(f64),
    Flag(bool),
}

impl Bound {
    pub fn value(self) -> Option<f64> {
        match self {
            Bound::Value(v) => Some(v),
            Bound::Flag(_) => None,
        }
    }
}

impl SchemaNode {
    /// The single declared type name, if any
    pub fn type_name(&self) -> Option<&str> {
        match &self.type_decl {
            Some(TypeDecl::Single(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.type_name() == Some("array")
    }

    /// A schema with no properties has nothing to prompt for
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Whether `name` appears in this node's `required` list
    pub fn requires(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Lower prompt bound: `minimum`, falling back to `exclusiveMinimum`
    ///
    /// The exclusive bound is used as if it were inclusive.
    pub fn lower_bound(&self) -> Option<f64> {
        self.minimum
            .or_else(|| self.exclusive_minimum.and_then(Bound::value))
    }

    /// Upper prompt bound: `maximum`, falling back to `exclusiveMaximum`
    pub fn upper_bound(&self) -> Option<f64> {
        self.maximum
            .or_else(|| self.exclusive_maximum.and_then(Bound::value))
    }

    /// Parse a schema from JSON or YAML text
    ///
    /// YAML is a superset of JSON, but JSON is tried first for clearer errors on
    /// the common case.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        match serde_json::from_str(text) {
            Ok(node) => Ok(node),
            Err(json_err) => serde_yaml::from_str(text)
                .with_context(|| format!("schema is neither valid JSON ({json_err}) nor YAML")),
        }
    }
}

/// Read a schema document from a file, or from stdin when `path` is `-`
pub fn load_schema(path: &Path) -> anyhow::Result<SchemaNode> {
    let text = read_source(path)?;
    SchemaNode::parse(&text).with_context(|| format!("parsing schema {}", path.display()))
}

/// Read a whole input document, treating `-` as stdin
pub fn read_source(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}
