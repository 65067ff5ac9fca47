//! Depth-first flattening of a color tree into `(path, value)` entries.
//!
//! ```text
//! black: '#333',
//! primary: { main: '#f43f5e' }
//! ```
//! becomes `[("black", "#333"), ("primary-main", "#f43f5e")]`.

use serde::Serialize;

use super::{ColorNode, ColorTree};

/// Separator between token names in a flattened path
pub const PATH_SEPARATOR: &str = "-";

/// A single color literal and the joined path of keys leading to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatColorEntry {
    pub path: String,
    pub value: String,
}

impl FlatColorEntry {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        FlatColorEntry { path: path.into(), value: value.into() }
    }
}

/// Flatten a tree into a fresh list, one entry per leaf, in tree order.
pub fn flatten(tree: &ColorTree) -> Vec<FlatColorEntry> {
    flatten_into(tree, "", Vec::new())
}

/// Flatten `tree` under `prefix`, appending to `out` and handing it back.
///
/// Keys are joined with [`PATH_SEPARATOR`]. An empty key at the root would
/// produce an empty path, so such leaves are skipped.
pub fn flatten_into(tree: &ColorTree, prefix: &str, mut out: Vec<FlatColorEntry>) -> Vec<FlatColorEntry> {
    for (key, node) in tree.iter() {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}{}{}", prefix, PATH_SEPARATOR, key)
        };

        match node {
            ColorNode::Tree(subtree) => {
                out = flatten_into(subtree, &path, out);
            }
            ColorNode::Leaf(value) => {
                if path.is_empty() {
                    tracing::debug!(value = %value, "skipping color with empty key");
                    continue;
                }
                out.push(FlatColorEntry { path, value: value.clone() });
            }
        }
    }
    out
}
