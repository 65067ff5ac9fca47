//! Per-file outcomes and the run summary they reduce into.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::lookup::ClassNameLookup;
use crate::rewrite::{AppliedHit, FragmentFailure, UnsupportedSite};

/// What happened to one file
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: String,
    pub changed: bool,
    pub hits: Vec<AppliedHit>,
    pub unsupported: Vec<UnsupportedSite>,
    pub failures: Vec<FragmentFailure>,
}

/// Totals for a whole migration run.
///
/// Built with [`RunSummary::default`] and [`RunSummary::absorb`], or by
/// [`RunSummary::merge`] when outcomes are reduced in parallel.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub replacements: usize,
    pub modified_files: Vec<String>,
    pub unsupported: Vec<UnsupportedSite>,
    pub failures: Vec<FragmentFailure>,
    /// Legacy class names that were rewritten at least once
    pub used_keys: BTreeSet<String>,
    /// Lookup keys never seen in any scanned file
    pub unused_keys: Vec<String>,
    /// Legacy color paths with no value match in the updated palette
    pub unmapped_legacy_paths: Vec<String>,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn absorb(&mut self, outcome: FileOutcome) {
        self.files_scanned += 1;
        if outcome.changed {
            self.files_modified += 1;
            self.modified_files.push(outcome.path);
        }
        self.replacements += outcome.hits.len();
        self.used_keys.extend(outcome.hits.into_iter().map(|h| h.from));
        self.unsupported.extend(outcome.unsupported);
        self.failures.extend(outcome.failures);
    }

    pub fn merge(mut self, other: RunSummary) -> RunSummary {
        self.files_scanned += other.files_scanned;
        self.files_modified += other.files_modified;
        self.replacements += other.replacements;
        self.modified_files.extend(other.modified_files);
        self.unsupported.extend(other.unsupported);
        self.failures.extend(other.failures);
        self.used_keys.extend(other.used_keys);
        self.dry_run |= other.dry_run;
        self
    }

    /// Fill `unused_keys` from the lookup and sort per-file lists.
    pub fn finish(mut self, lookup: &ClassNameLookup, unmapped_legacy_paths: Vec<String>) -> RunSummary {
        self.unused_keys = lookup
            .keys()
            .filter(|k| !self.used_keys.contains(*k))
            .map(|k| k.to_string())
            .collect();
        self.unmapped_legacy_paths = unmapped_legacy_paths;
        self.modified_files.sort();
        self.unsupported.sort_by(|a, b| (&a.file, a.line, a.column).cmp(&(&b.file, b.line, b.column)));
        self.failures.sort_by(|a, b| (&a.file, a.line, a.column).cmp(&(&b.file, b.line, b.column)));
        self
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "would modify" } else { "modified" };
        writeln!(
            f,
            "{} files scanned, {} {}, {} class names replaced",
            self.files_scanned, verb, self.files_modified, self.replacements
        )?;
        for file in &self.modified_files {
            writeln!(f, "  {} {}", verb, file)?;
        }
        if !self.unsupported.is_empty() {
            writeln!(f, "{} class name expressions left as-is (unsupported shape):", self.unsupported.len())?;
            for site in &self.unsupported {
                writeln!(f, "  {}:{}:{} {}", site.file, site.line, site.column, site.kind)?;
            }
        }
        if !self.failures.is_empty() {
            writeln!(f, "{} fragments failed to match:", self.failures.len())?;
            for failure in &self.failures {
                writeln!(f, "  {}:{}:{} {}", failure.file, failure.line, failure.column, failure.error)?;
            }
        }
        if !self.unmapped_legacy_paths.is_empty() {
            writeln!(
                f,
                "{} legacy colors have no match in the updated palette: {}",
                self.unmapped_legacy_paths.len(),
                self.unmapped_legacy_paths.join(", ")
            )?;
        }
        if !self.unused_keys.is_empty() {
            writeln!(f, "{} lookup entries never matched", self.unused_keys.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(from: &str, to: &str) -> AppliedHit {
        AppliedHit { line: 1, column: 1, from: from.to_string(), to: to.to_string() }
    }

    fn outcome(path: &str, hits: Vec<AppliedHit>) -> FileOutcome {
        FileOutcome {
            path: path.to_string(),
            changed: !hits.is_empty(),
            hits,
            unsupported: Vec::new(),
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_absorb_and_finish() {
        let lookup: ClassNameLookup = [("text-a", "text-b"), ("bg-a", "bg-b"), ("border-a", "border-b")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut summary = RunSummary::default();
        summary.absorb(outcome("b.tsx", vec![hit("text-a", "text-b"), hit("text-a", "text-b")]));
        summary.absorb(outcome("a.tsx", vec![hit("bg-a", "bg-b")]));
        summary.absorb(outcome("c.tsx", vec![]));
        let summary = summary.finish(&lookup, vec!["gray-100".to_string()]);

        assert_eq!(summary.files_scanned, 3);
        assert_eq!(summary.files_modified, 2);
        assert_eq!(summary.replacements, 3);
        assert_eq!(summary.modified_files, vec!["a.tsx", "b.tsx"]);
        assert_eq!(summary.unused_keys, vec!["border-a"]);
        assert_eq!(summary.unmapped_legacy_paths, vec!["gray-100"]);
    }

    #[test]
    fn test_merge_matches_sequential_absorb() {
        let mut left = RunSummary::default();
        left.absorb(outcome("a.tsx", vec![hit("text-a", "text-b")]));
        let mut right = RunSummary::default();
        right.absorb(outcome("b.tsx", vec![hit("bg-a", "bg-b")]));

        let merged = left.merge(right);
        assert_eq!(merged.files_scanned, 2);
        assert_eq!(merged.replacements, 2);
        assert_eq!(merged.used_keys.len(), 2);
    }

    #[test]
    fn test_display_dry_run() {
        let mut summary = RunSummary { dry_run: true, ..Default::default() };
        summary.absorb(outcome("a.tsx", vec![hit("text-a", "text-b")]));
        let text = summary.to_string();
        assert!(text.starts_with("1 files scanned, would modify 1, 1 class names replaced"));
        assert!(text.contains("  would modify a.tsx"));
    }
}
