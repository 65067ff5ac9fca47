//! Pull the `colors` object out of a parsed Tailwind config.
//!
//! Handles the usual config shapes (`module.exports = {...}`,
//! `export default {...}`, `theme.extend.colors`) because it simply looks for
//! any `colors: { ... }` pair in the module.

use std::path::Path;

use tree_sitter::Node;

use super::{ColorNode, ColorTree};
use crate::parser::{parse_file, ParseError, ParsedSource};

const COLORS_KEY: &str = "colors";

/// Extract the color tree from a parsed config module.
///
/// Every `colors` object in the module (outside another `colors` object) is
/// merged into one tree in document order; a later top-level key replaces an
/// earlier one. A module with no `colors` object yields an empty tree.
pub fn extract_colors(parsed: &ParsedSource) -> ColorTree {
    let mut colors = ColorTree::new();
    let mut found = 0usize;

    let mut stack = vec![parsed.root()];
    while let Some(node) = stack.pop() {
        if node.kind() == "pair" {
            if let Some(value) = colors_object(parsed, node) {
                found += 1;
                for (key, child) in read_object(parsed, value, COLORS_KEY).into_entries() {
                    colors.insert(key, child);
                }
                continue;
            }
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    if found == 0 {
        tracing::warn!(file = %parsed.file_path, "no `colors` object found in config");
    } else {
        tracing::debug!(file = %parsed.file_path, objects = found, leaves = colors.leaf_count(), "extracted colors");
    }
    colors
}

/// Parse a config file and extract its color tree
pub fn extract_colors_from_file(path: &Path) -> Result<ColorTree, ParseError> {
    Ok(extract_colors(&parse_file(path, None)?))
}

/// The object value of a `colors: { ... }` pair, if `pair` is one.
fn colors_object<'t>(parsed: &ParsedSource, pair: Node<'t>) -> Option<Node<'t>> {
    let key = pair.child_by_field_name("key")?;
    if property_key(parsed, key)? != COLORS_KEY {
        return None;
    }
    let value = pair.child_by_field_name("value")?;
    if value.kind() == "object" {
        Some(value)
    } else {
        tracing::warn!(
            file = %parsed.file_path,
            line = value.start_position().row + 1,
            kind = value.kind(),
            "`colors` is not an object literal, skipping"
        );
        None
    }
}

/// Recursively read an object literal into a color tree.
///
/// `path` is only used for log messages.
fn read_object(parsed: &ParsedSource, object: Node<'_>, path: &str) -> ColorTree {
    let mut tree = ColorTree::new();
    let mut cursor = object.walk();

    for member in object.named_children(&mut cursor) {
        match member.kind() {
            "pair" => {}
            "comment" => continue,
            other => {
                tracing::debug!(path, kind = other, "skipping non-literal object member");
                continue;
            }
        }

        let (Some(key_node), Some(value)) = (
            member.child_by_field_name("key"),
            member.child_by_field_name("value"),
        ) else {
            continue;
        };

        let Some(key) = property_key(parsed, key_node) else {
            tracing::debug!(path, key = parsed.text(key_node), "skipping computed key");
            continue;
        };

        match value.kind() {
            "string" => {
                tree.insert(key, ColorNode::Leaf(string_content(parsed, value).to_string()));
            }
            "template_string" if !has_substitution(value) => {
                tree.insert(key, ColorNode::Leaf(string_content(parsed, value).to_string()));
            }
            "object" => {
                let child_path = format!("{}.{}", path, key);
                let subtree = read_object(parsed, value, &child_path);
                tree.insert(key, ColorNode::Tree(subtree));
            }
            other => {
                tracing::debug!(path, key = %key, kind = other, "skipping non-literal color value");
            }
        }
    }

    tree
}

/// Key text of an object property.
///
/// Identifiers and string keys give their name; numeric keys such as `500`
/// give their raw source text. Computed keys give `None`.
fn property_key(parsed: &ParsedSource, key: Node<'_>) -> Option<String> {
    match key.kind() {
        "property_identifier" | "identifier" | "number" => Some(parsed.text(key).to_string()),
        "string" => Some(string_content(parsed, key).to_string()),
        _ => None,
    }
}

/// Raw text between the delimiters of a string or template literal.
pub(crate) fn string_content<'s>(parsed: &'s ParsedSource, node: Node<'_>) -> &'s str {
    let text = node.utf8_text(parsed.source.as_bytes()).unwrap_or("");
    if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        ""
    }
}

fn has_substitution(template: Node<'_>) -> bool {
    let mut cursor = template.walk();
    let found = template
        .named_children(&mut cursor)
        .any(|c| c.kind() == "template_substitution");
    found
}
