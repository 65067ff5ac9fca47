//! Byte-range splicing of replacement text into source.
//!
//! Tree-sitter trees are read-only, so a rewrite is expressed as a list of
//! edits against the original text. Everything outside the edited ranges is
//! copied through untouched.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Replace `source[start..end]` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Edit { start, end, replacement: replacement.into() }
    }
}

/// Errors that can occur while splicing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    /// Two edits overlap, making the result ambiguous.
    OverlappingEdits { first: (usize, usize), second: (usize, usize) },
    /// An edit range falls outside the source or splits a UTF-8 character.
    InvalidRange { start: usize, end: usize, len: usize },
}

impl fmt::Display for SpliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpliceError::OverlappingEdits { first, second } => {
                write!(
                    f,
                    "overlapping edits at bytes {}..{} and {}..{}, replacement is ambiguous",
                    first.0, first.1, second.0, second.1
                )
            }
            SpliceError::InvalidRange { start, end, len } => {
                write!(f, "edit range {}..{} is invalid for source of {} bytes", start, end, len)
            }
        }
    }
}

impl std::error::Error for SpliceError {}

/// Apply `edits` to `content` in a single ascending pass.
///
/// Edits at identical ranges are deduplicated; overlapping edits are rejected.
pub fn apply_edits(content: &str, mut edits: Vec<Edit>) -> Result<String, SpliceError> {
    if edits.is_empty() {
        return Ok(content.to_string());
    }

    edits.sort_by(|a, b| (a.start, a.end).cmp(&(b.start, b.end)));
    edits.dedup_by(|a, b| a.start == b.start && a.end == b.end);

    for edit in &edits {
        let valid = edit.start <= edit.end
            && edit.end <= content.len()
            && content.is_char_boundary(edit.start)
            && content.is_char_boundary(edit.end);
        if !valid {
            return Err(SpliceError::InvalidRange {
                start: edit.start,
                end: edit.end,
                len: content.len(),
            });
        }
    }

    for pair in edits.windows(2) {
        if pair[0].end > pair[1].start {
            return Err(SpliceError::OverlappingEdits {
                first: (pair[0].start, pair[0].end),
                second: (pair[1].start, pair[1].end),
            });
        }
    }

    let mut result = String::with_capacity(content.len());
    let mut last_end = 0;
    for edit in &edits {
        result.push_str(&content[last_end..edit.start]);
        result.push_str(&edit.replacement);
        last_end = edit.end;
    }
    result.push_str(&content[last_end..]);

    Ok(result)
}

/// Write `updated` to `path` unless it equals `original`. Returns whether it wrote.
pub fn write_if_changed(path: &Path, original: &str, updated: &str) -> io::Result<bool> {
    if original == updated {
        return Ok(false);
    }
    fs::write(path, updated)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_single() {
        let content = r#"<div className="text-old" />"#;
        let result = apply_edits(content, vec![Edit::new(16, 24, "text-new")]).unwrap();
        assert_eq!(result, r#"<div className="text-new" />"#);
    }

    #[test]
    fn test_apply_multiple_unsorted() {
        let content = "aaa bbb aaa";
        let edits = vec![Edit::new(8, 11, "xxx"), Edit::new(0, 3, "xxx")];
        assert_eq!(apply_edits(content, edits).unwrap(), "xxx bbb xxx");
    }

    #[test]
    fn test_apply_multiline() {
        let content = "line1\nOLD\nline3";
        assert_eq!(
            apply_edits(content, vec![Edit::new(6, 9, "NEW")]).unwrap(),
            "line1\nNEW\nline3"
        );
    }

    #[test]
    fn test_overlapping_error() {
        let edits = vec![Edit::new(0, 4, "x"), Edit::new(2, 6, "y")];
        let result = apply_edits("abcdefgh", edits);
        assert!(matches!(result, Err(SpliceError::OverlappingEdits { .. })));
    }

    #[test]
    fn test_adjacent_edits_are_not_overlapping() {
        let edits = vec![Edit::new(0, 2, "X"), Edit::new(2, 4, "Y")];
        assert_eq!(apply_edits("abcd", edits).unwrap(), "XY");
    }

    #[test]
    fn test_dedup() {
        let edits = vec![Edit::new(0, 5, "world"), Edit::new(0, 5, "world")];
        assert_eq!(apply_edits("hello", edits).unwrap(), "world");
    }

    #[test]
    fn test_empty_edits() {
        assert_eq!(apply_edits("unchanged", Vec::new()).unwrap(), "unchanged");
    }

    #[test]
    fn test_different_length() {
        assert_eq!(apply_edits("ab", vec![Edit::new(0, 2, "xyz123")]).unwrap(), "xyz123");
        assert_eq!(apply_edits("remove_me", vec![Edit::new(0, 9, "")]).unwrap(), "");
    }

    #[test]
    fn test_invalid_range() {
        let result = apply_edits("ab", vec![Edit::new(1, 4, "x")]);
        assert!(matches!(result, Err(SpliceError::InvalidRange { .. })));

        // 'é' is two bytes; splitting it is rejected
        let result = apply_edits("é", vec![Edit::new(1, 2, "x")]);
        assert!(matches!(result, Err(SpliceError::InvalidRange { .. })));
    }

    #[test]
    fn test_write_if_changed() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Foo.tsx");
        fs::write(&file, "old").unwrap();

        assert!(!write_if_changed(&file, "old", "old").unwrap());
        assert!(write_if_changed(&file, "old", "new").unwrap());
        assert_eq!(fs::read_to_string(&file).unwrap(), "new");
    }
}
