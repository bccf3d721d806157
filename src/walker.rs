//! Depth-first traversal of a schema tree
//!
//! The walker keeps an explicit worklist of `(node, path, parent)` entries
//! instead of recursing, so traversal order and the array-skip rule can be tested
//! without any prompting involved.

use crate::question::FieldPath;
use crate::schema::SchemaNode;

/// A node reached during traversal
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    pub node: &'a SchemaNode,
    /// Property names from the root down to `node`
    pub path: FieldPath,
    /// The node this one was reached from; `None` for the root
    pub parent: Option<&'a SchemaNode>,
}

impl Visit<'_> {
    /// Whether the parent lists this node's own property name as required
    pub fn is_required(&self) -> bool {
        match (self.parent, self.path.last()) {
            (Some(parent), Some(name)) => parent.requires(name),
            _ => false,
        }
    }
}

/// Pre-order iterator over every promptable position in a schema
///
/// Nodes whose immediate parent is an `array` are never yielded, and nothing
/// below them is visited.
pub struct SchemaWalker<'a> {
    pending: Vec<Visit<'a>>,
}

impl<'a> SchemaWalker<'a> {
    pub fn new(root: &'a SchemaNode) -> Self {
        SchemaWalker {
            pending: vec![Visit {
                node: root,
                path: FieldPath::default(),
                parent: None,
            }],
        }
    }

    fn children(visit: &Visit<'a>) -> Vec<Visit<'a>> {
        let mut out: Vec<Visit<'a>> = visit
            .node
            .properties
            .iter()
            .map(|(name, child)| Visit {
                node: child,
                path: visit.path.child(name),
                parent: Some(visit.node),
            })
            .collect();
        if let Some(items) = &visit.node.items {
            // array markers never become path segments
            out.extend(items.schemas().into_iter().map(|child| Visit {
                node: child,
                path: visit.path.clone(),
                parent: Some(visit.node),
            }));
        }
        out
    }
}

impl<'a> Iterator for SchemaWalker<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(visit) = self.pending.pop() {
            if visit.parent.is_some_and(SchemaNode::is_array) {
                continue;
            }
            // reversed so the first declared property is popped first
            self.pending.extend(Self::children(&visit).into_iter().rev());
            return Some(visit);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    fn paths(root: &SchemaNode) -> Vec<String> {
        SchemaWalker::new(root).map(|v| v.path.to_string()).collect()
    }

    #[test]
    fn test_depth_first_preorder() {
        let root = schema(json!({
            "type": "object",
            "properties": {
                "a": {"type": "object", "properties": {
                    "x": {"type": "string"},
                    "y": {"type": "string"}
                }},
                "b": {"type": "string"}
            }
        }));
        assert_eq!(paths(&root), vec!["", "a", "a.x", "a.y", "b"]);
    }

    #[test]
    fn test_array_items_and_descendants_are_skipped() {
        let root = schema(json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {
                    "type": "object",
                    "properties": {"label": {"type": "string"}}
                }},
                "after": {"type": "boolean"}
            }
        }));
        assert_eq!(paths(&root), vec!["", "tags", "after"]);
    }

    #[test]
    fn test_required_reads_immediate_parent() {
        let root = schema(json!({
            "type": "object",
            "required": ["outer"],
            "properties": {
                "outer": {"type": "object", "required": ["inner"], "properties": {
                    "inner": {"type": "string"},
                    "outer": {"type": "string"}
                }}
            }
        }));
        let flags: Vec<(String, bool)> = SchemaWalker::new(&root)
            .map(|v| (v.path.to_string(), v.is_required()))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("".to_string(), false),
                ("outer".to_string(), true),
                ("outer.inner".to_string(), true),
                ("outer.outer".to_string(), false),
            ]
        );
    }
}
