//! Survey of the expression shapes used in class-name attributes.
//!
//! Before migrating it helps to know which shapes a codebase actually uses,
//! in particular ones the rewriter leaves alone. Plain string attributes are
//! not recorded; every `{ ... }` value is grouped by the tree-sitter kind of
//! the expression inside it.

use std::collections::BTreeMap;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::MigrateConfig;
use crate::parallel::{expand_targets, ScanError};
use crate::parser::{parse_file, ParsedSource};
use crate::rewrite::find_class_attributes;

/// Distinct attribute snippets grouped by expression kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShapeRecord {
    shapes: BTreeMap<String, Vec<String>>,
}

impl ShapeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `snippet` under `tag` unless it is already there.
    pub fn add(&mut self, tag: &str, snippet: &str) {
        let snippets = self.shapes.entry(tag.to_string()).or_default();
        if !snippets.iter().any(|s| s == snippet) {
            snippets.push(snippet.to_string());
        }
    }

    /// Combine two records, keeping first-seen order within each tag.
    pub fn merge(mut self, other: ShapeRecord) -> ShapeRecord {
        for (tag, snippets) in other.shapes {
            for snippet in snippets {
                self.add(&tag, &snippet);
            }
        }
        self
    }

    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.shapes.get(tag).map(|v| v.as_slice())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Every snippet, each preceded by a blank line, grouped by tag.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for snippet in self.shapes.values().flatten() {
            text.push_str("\n\n");
            text.push_str(snippet);
        }
        text
    }
}

/// Survey the class-name attributes of one parsed file.
pub fn survey_source(parsed: &ParsedSource, attributes: &[String]) -> ShapeRecord {
    let mut record = ShapeRecord::new();

    for attribute in find_class_attributes(parsed, attributes) {
        let Some(value) = attribute.value else {
            continue;
        };
        if value.kind() != "jsx_expression" {
            continue;
        }

        let mut cursor = value.walk();
        let inner = value
            .named_children(&mut cursor)
            .find(|c| c.kind() != "comment");
        let tag = inner.map(|n| n.kind()).unwrap_or("empty");
        record.add(tag, parsed.text(attribute.node));
    }

    record
}

/// Survey a file, or every matching file below a directory.
pub fn survey_path(path: &Path, config: &MigrateConfig) -> Result<ShapeRecord, ScanError> {
    survey_targets(&[path.display().to_string()], config)
}

/// Survey every source file the targets expand to.
///
/// Files are surveyed in parallel, each into its own record, and the records
/// are merged in file order afterwards.
pub fn survey_targets(targets: &[String], config: &MigrateConfig) -> Result<ShapeRecord, ScanError> {
    let files = expand_targets(targets, config)?;

    files
        .par_iter()
        .map(|path| -> Result<ShapeRecord, ScanError> {
            let parsed = parse_file(path, None)?;
            let record = survey_source(&parsed, &config.attributes);
            tracing::debug!(file = %path.display(), shapes = record.shapes.len(), "surveyed class names");
            Ok(record)
        })
        .try_reduce(ShapeRecord::new, |a, b| Ok(a.merge(b)))
}
