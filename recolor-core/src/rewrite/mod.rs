//! Shape-aware rewriting of class names in JSX sources.
//!
//! For every class-name attribute the value is classified into a
//! [`ClassShape`], its literal fragments are run through the
//! [`ClassNameMatcher`], and the replacements are spliced back into the
//! original text. Only fragment bytes ever change.

pub mod jsx;
pub mod shape;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::config::{FailurePolicy, MigrateConfig};
use crate::lookup::ClassNameLookup;
use crate::matcher::{ClassNameMatcher, MatchError, MatchOutcome, MatcherError};
use crate::parser::{parse_file, parse_string, ParseError, ParsedSource};
use crate::report::FileOutcome;
use crate::splice::{apply_edits, write_if_changed, Edit, SpliceError};

pub use jsx::{find_class_attributes, ClassAttribute};
pub use shape::{ClassShape, Fragment, FragmentOrigin};

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{file}: {source}")]
    Splice {
        file: String,
        #[source]
        source: SpliceError,
    },
    #[error("{file}:{line}:{column}: {source}")]
    MatchFailed {
        file: String,
        line: usize,
        column: usize,
        #[source]
        source: MatchError,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Updated source text, or a marker that nothing changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformed {
    Changed(String),
    Unchanged,
}

/// A class name that was replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedHit {
    pub line: usize,
    pub column: usize,
    pub from: String,
    pub to: String,
}

/// A class-name attribute whose value shape we don't rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedSite {
    pub file: String,
    pub line: usize,
    pub column: usize,
    /// Tree-sitter kind of the value expression
    pub kind: String,
    pub snippet: String,
}

/// A fragment the matcher failed on (kept under [`FailurePolicy::Skip`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentFailure {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct RewriteResult {
    pub output: Transformed,
    pub hits: Vec<AppliedHit>,
    pub unsupported: Vec<UnsupportedSite>,
    pub failures: Vec<FragmentFailure>,
}

/// Rewrites class-name attributes using a frozen lookup.
///
/// Holds no per-file state, so one migrator can be shared across threads.
#[derive(Debug, Clone)]
pub struct Migrator {
    matcher: ClassNameMatcher,
    attributes: Vec<String>,
    on_match_error: FailurePolicy,
}

impl Migrator {
    pub fn new(lookup: ClassNameLookup, config: &MigrateConfig) -> Result<Self, MatcherError> {
        Ok(Migrator {
            matcher: ClassNameMatcher::new(lookup)?,
            attributes: config.attributes.clone(),
            on_match_error: config.on_match_error,
        })
    }

    pub fn lookup(&self) -> &ClassNameLookup {
        self.matcher.lookup()
    }

    /// Parse `source` as `lang` and rewrite it
    pub fn rewrite_source(&self, source: &str, lang: &str, file_path: &str) -> Result<RewriteResult, RewriteError> {
        let parsed = parse_string(source.to_string(), lang, file_path.to_string())?;
        self.rewrite_parsed(&parsed)
    }

    pub fn rewrite_parsed(&self, parsed: &ParsedSource) -> Result<RewriteResult, RewriteError> {
        let source = parsed.source.as_str();
        let mut edits = Vec::new();
        let mut hits = Vec::new();
        let mut unsupported = Vec::new();
        let mut failures = Vec::new();

        for attribute in find_class_attributes(parsed, &self.attributes) {
            let Some(value) = attribute.value else {
                continue;
            };

            let shape = ClassShape::classify(value);
            if let ClassShape::Unsupported(node) = shape {
                let (line, column) = offset_to_position(source, node.start_byte());
                tracing::debug!(file = %parsed.file_path, line, column, kind = node.kind(), "unsupported class name shape");
                unsupported.push(UnsupportedSite {
                    file: parsed.file_path.clone(),
                    line,
                    column,
                    kind: node.kind().to_string(),
                    snippet: parsed.text(attribute.node).to_string(),
                });
                continue;
            }

            for fragment in shape.fragments() {
                let text = &source[fragment.start..fragment.end];
                match self.matcher.rewrite(text) {
                    MatchOutcome::NoMatch => {}
                    MatchOutcome::Replaced { text: replaced, hits: fragment_hits } => {
                        if replaced == text {
                            continue;
                        }
                        for hit in fragment_hits.into_iter().filter(|h| h.from != h.to) {
                            let (line, column) = offset_to_position(source, fragment.start + hit.offset);
                            hits.push(AppliedHit { line, column, from: hit.from, to: hit.to });
                        }
                        edits.push(Edit::new(fragment.start, fragment.end, replaced));
                    }
                    MatchOutcome::Failed(error) => {
                        let (line, column) = offset_to_position(source, fragment.start);
                        match self.on_match_error {
                            FailurePolicy::Abort => {
                                return Err(RewriteError::MatchFailed {
                                    file: parsed.file_path.clone(),
                                    line,
                                    column,
                                    source: error,
                                });
                            }
                            FailurePolicy::Skip => {
                                tracing::warn!(file = %parsed.file_path, line, column, error = %error, "class name matching failed, fragment left unchanged");
                                failures.push(FragmentFailure {
                                    file: parsed.file_path.clone(),
                                    line,
                                    column,
                                    error: error.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        }

        let output = if edits.is_empty() {
            Transformed::Unchanged
        } else {
            let updated = apply_edits(source, edits).map_err(|e| RewriteError::Splice {
                file: parsed.file_path.clone(),
                source: e,
            })?;
            if updated == source {
                Transformed::Unchanged
            } else {
                Transformed::Changed(updated)
            }
        };

        Ok(RewriteResult { output, hits, unsupported, failures })
    }

    /// Rewrite a file in place (unless `dry_run`).
    pub fn rewrite_file(&self, path: &Path, dry_run: bool) -> Result<FileOutcome, RewriteError> {
        let parsed = parse_file(path, None)?;
        let result = self.rewrite_parsed(&parsed)?;

        let changed = match &result.output {
            Transformed::Changed(updated) => {
                if !dry_run {
                    write_if_changed(path, &parsed.source, updated).map_err(|e| RewriteError::Write {
                        path: path.display().to_string(),
                        source: e,
                    })?;
                }
                true
            }
            Transformed::Unchanged => false,
        };

        if changed {
            tracing::info!(file = %path.display(), replacements = result.hits.len(), dry_run, "rewrote class names");
        } else {
            tracing::debug!(file = %path.display(), "no class names to rewrite");
        }

        Ok(FileOutcome {
            path: path.display().to_string(),
            changed,
            hits: result.hits,
            unsupported: result.unsupported,
            failures: result.failures,
        })
    }
}

/// 1-based line and byte column of `offset`, matching tree-sitter positions.
pub fn offset_to_position(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map(|i| i + 1).unwrap_or(0);
    (line, offset - line_start + 1)
}
