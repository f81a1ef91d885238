//! JSON-LD Author Parsing
//!
//! Reads Schema.org JSON-LD blocks embedded in the page and returns the first
//! author they attribute the page to. Structured data outranks bylines in
//! meta tags because publishers generate it from the same record that holds
//! the post.

use dom_query::{Document, Selection};
use serde_json::Value;

use crate::dom;

/// Author from the first JSON-LD block that names one.
///
/// Each top-level node (or each element of a top-level array, or of an
/// `@graph` array) is examined in document order. A node yields an author
/// when:
/// - `author` is a string,
/// - `author` is an array whose first element has a `name`,
/// - `author` is an object with a `name`,
/// - or the node itself is typed as a person and has a `name`.
///
/// Blocks that fail to parse are skipped.
#[must_use]
pub fn json_ld_author(doc: &Document) -> Option<String> {
    doc.select(r#"script[type="application/ld+json"]"#)
        .nodes()
        .iter()
        .filter_map(|node| {
            let script = Selection::from(*node);
            let raw = dom::text_content(&script);
            serde_json::from_str::<Value>(raw.trim()).ok()
        })
        .find_map(|data| author_from_value(&data))
}

fn author_from_value(data: &Value) -> Option<String> {
    top_level_nodes(data).into_iter().find_map(author_from_node)
}

/// Flatten a parsed block into the nodes worth inspecting.
fn top_level_nodes(data: &Value) -> Vec<&Value> {
    let roots: Vec<&Value> = match data {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut nodes = Vec::with_capacity(roots.len());
    for root in roots {
        nodes.push(root);
        if let Some(Value::Array(graph)) = root.get("@graph") {
            nodes.extend(graph.iter());
        }
    }
    nodes
}

fn author_from_node(node: &Value) -> Option<String> {
    let obj = node.as_object()?;

    if let Some(author) = obj.get("author") {
        let named = match author {
            Value::String(s) => non_empty(s),
            Value::Array(items) => items.first().and_then(name_of),
            Value::Object(_) => name_of(author),
            _ => None,
        };
        if named.is_some() {
            return named;
        }
    }

    if is_person(node) {
        return name_of(node);
    }

    None
}

fn name_of(value: &Value) -> Option<String> {
    value.get("name").and_then(Value::as_str).and_then(non_empty)
}

/// True when `@type` (string or array of strings) mentions "person".
fn is_person(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => t.to_lowercase().contains("person"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.to_lowercase().contains("person")),
        _ => false,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
