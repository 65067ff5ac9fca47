//! Color palettes and the legacy → new path mapping
//!
//! A palette is the nested `colors` object of a Tailwind config. The pipeline is:
//!
//! ```text
//! config source ──extract──▶ ColorTree ──flatten──▶ [FlatColorEntry] ──map──▶ ColorPathMapping
//! ```
//!
//! Trees are built from object literal syntax, so they are always acyclic;
//! the recursive walks below rely on that.

pub mod extract;
pub mod flatten;
pub mod mapping;

use std::path::Path;

use crate::config::MigrateConfig;
use crate::lookup::ClassNameLookup;
use crate::parser::{parse_file, ParseError};

pub use extract::{extract_colors, extract_colors_from_file};
pub use flatten::{flatten, flatten_into, FlatColorEntry, PATH_SEPARATOR};
pub use mapping::{map_legacy_to_new, ColorPathMapping, PathPair, TieBreak};

/// A value in a color tree: either a color literal or a nested group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorNode {
    Leaf(String),
    Tree(ColorTree),
}

/// Insertion-ordered mapping from token name to [`ColorNode`].
///
/// Keys are unique within a level. Inserting an existing key replaces the
/// value but keeps the key's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTree {
    entries: Vec<(String, ColorNode)>,
}

impl ColorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, node: ColorNode) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((key, node)),
        }
    }

    /// Builder-style leaf insertion
    pub fn with_leaf(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, ColorNode::Leaf(value.into()));
        self
    }

    /// Builder-style subtree insertion
    pub fn with_tree(mut self, key: impl Into<String>, tree: ColorTree) -> Self {
        self.insert(key, ColorNode::Tree(tree));
        self
    }

    pub fn get(&self, key: &str) -> Option<&ColorNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_entries(self) -> Vec<(String, ColorNode)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of color literals anywhere in the tree
    pub fn leaf_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| match node {
                ColorNode::Leaf(_) => 1,
                ColorNode::Tree(tree) => tree.leaf_count(),
            })
            .sum()
    }
}

/// Everything derived from a legacy/updated config pair.
#[derive(Debug, Clone)]
pub struct PaletteDiff {
    pub legacy: Vec<FlatColorEntry>,
    pub updated: Vec<FlatColorEntry>,
    pub mapping: ColorPathMapping,
    pub lookup: ClassNameLookup,
}

impl PaletteDiff {
    /// Build the diff from two already-extracted trees
    pub fn from_trees(legacy: &ColorTree, updated: &ColorTree, config: &MigrateConfig) -> Self {
        let legacy = flatten(legacy);
        let updated = flatten(updated);
        let mapping = map_legacy_to_new(&legacy, &updated);
        let lookup = ClassNameLookup::build(&mapping, &config.prefixes, config.tie_break);

        tracing::info!(
            legacy = legacy.len(),
            updated = updated.len(),
            pairs = mapping.pairs().len(),
            classes = lookup.len(),
            "built class name lookup"
        );

        PaletteDiff { legacy, updated, mapping, lookup }
    }

    /// Parse both config files and build the diff
    pub fn from_files(legacy: &Path, updated: &Path, config: &MigrateConfig) -> Result<Self, ParseError> {
        let legacy_tree = extract_colors(&parse_file(legacy, None)?);
        let updated_tree = extract_colors(&parse_file(updated, None)?);
        Ok(Self::from_trees(&legacy_tree, &updated_tree, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position_on_replace() {
        let mut tree = ColorTree::new().with_leaf("black", "#000").with_leaf("white", "#fff");
        tree.insert("black", ColorNode::Leaf("#111".to_string()));
        let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["black", "white"]);
        assert_eq!(tree.get("black"), Some(&ColorNode::Leaf("#111".to_string())));
    }

    #[test]
    fn test_diff_from_trees() {
        let legacy = ColorTree::new()
            .with_tree("primary", ColorTree::new().with_leaf("main", "#f43f5e"));
        let updated = ColorTree::new()
            .with_tree("red", ColorTree::new().with_leaf("500", "#F43F5E"));

        let diff = PaletteDiff::from_trees(&legacy, &updated, &MigrateConfig::default());
        assert_eq!(diff.mapping.pairs(), &[PathPair::new("primary-main", "red-500")]);
        assert_eq!(diff.lookup.get("bg-primary-main"), Some("bg-red-500"));
        assert_eq!(diff.lookup.len(), 3);
    }
}
