//! Whole-class-name find/replace over text fragments.
//!
//! All lookup keys are compiled into one alternation. A key only matches as a
//! complete class token: the characters on either side must not be word
//! characters or `-`. Variant and modifier syntax still matches
//! (`hover:text-primary-main`, `!bg-primary-main`, `text-primary-main/50`),
//! but `text-primary-main-ish` does not.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use thiserror::Error;

use crate::lookup::ClassNameLookup;

/// Large palettes produce long alternations; the default limit is too tight.
const PATTERN_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Failure to compile the lookup into a pattern
#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("failed to compile class name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failure while rewriting a single fragment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The compiled pattern and the lookup disagree
    #[error("matched `{0}` but it has no lookup entry")]
    MissingEntry(String),
    /// Lookups read from disk can map to empty or multi-token values
    #[error("`{from}` maps to `{to}`, which is not a single class name")]
    InvalidReplacement { from: String, to: String },
}

/// One replaced class name inside a fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    /// Byte offset of the legacy name within the fragment
    pub offset: usize,
    pub from: String,
    pub to: String,
}

/// Result of running the matcher over one fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Replaced { text: String, hits: Vec<Hit> },
    NoMatch,
    Failed(MatchError),
}

impl MatchOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, MatchOutcome::Replaced { .. })
    }
}

/// Compiled matcher over a frozen [`ClassNameLookup`].
#[derive(Debug, Clone)]
pub struct ClassNameMatcher {
    lookup: ClassNameLookup,
    /// `None` when the lookup is empty
    pattern: Option<Regex>,
}

impl ClassNameMatcher {
    pub fn new(lookup: ClassNameLookup) -> Result<Self, MatcherError> {
        let pattern = if lookup.is_empty() {
            None
        } else {
            Some(compile(&lookup)?)
        };
        Ok(ClassNameMatcher { lookup, pattern })
    }

    pub fn lookup(&self) -> &ClassNameLookup {
        &self.lookup
    }

    /// Replace every legacy class name in `text`.
    pub fn rewrite(&self, text: &str) -> MatchOutcome {
        let Some(pattern) = &self.pattern else {
            return MatchOutcome::NoMatch;
        };
        if text.is_empty() {
            return MatchOutcome::NoMatch;
        }

        let mut result = String::with_capacity(text.len());
        let mut hits = Vec::new();
        let mut last_end = 0;
        let mut pos = 0;

        // The pattern consumes the trailing boundary character, so each search
        // resumes at the end of the class name rather than the end of the match.
        while pos <= text.len() {
            let Some(caps) = pattern.captures_at(text, pos) else {
                break;
            };
            let Some(name) = caps.get(1) else {
                break;
            };

            let Some(replacement) = self.lookup.get(name.as_str()) else {
                return MatchOutcome::Failed(MatchError::MissingEntry(name.as_str().to_string()));
            };
            if replacement.is_empty() || replacement.contains(char::is_whitespace) {
                return MatchOutcome::Failed(MatchError::InvalidReplacement {
                    from: name.as_str().to_string(),
                    to: replacement.to_string(),
                });
            }

            result.push_str(&text[last_end..name.start()]);
            result.push_str(replacement);
            hits.push(Hit {
                offset: name.start(),
                from: name.as_str().to_string(),
                to: replacement.to_string(),
            });
            last_end = name.end();
            pos = name.end();
        }

        if hits.is_empty() {
            return MatchOutcome::NoMatch;
        }
        result.push_str(&text[last_end..]);
        MatchOutcome::Replaced { text: result, hits }
    }
}

fn compile(lookup: &ClassNameLookup) -> Result<Regex, MatcherError> {
    // Longest first, so a key that is a prefix of another never shadows it
    let mut keys: Vec<&str> = lookup.keys().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = keys
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    let pattern = RegexBuilder::new(&format!(r"(?:^|[^\w-])({})(?:$|[^\w-])", alternation))
        .size_limit(PATTERN_SIZE_LIMIT)
        .dfa_size_limit(PATTERN_SIZE_LIMIT)
        .build()?;
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(pairs: &[(&str, &str)]) -> ClassNameMatcher {
        let lookup: ClassNameLookup = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClassNameMatcher::new(lookup).unwrap()
    }

    fn replaced(outcome: MatchOutcome) -> String {
        match outcome {
            MatchOutcome::Replaced { text, .. } => text,
            other => panic!("expected a replacement, got {:?}", other),
        }
    }

    #[test]
    fn test_standalone_name() {
        let m = matcher(&[("text-primary-main", "text-red-500")]);
        assert_eq!(replaced(m.rewrite("text-primary-main")), "text-red-500");
    }

    #[test]
    fn test_no_partial_match_inside_longer_token() {
        let m = matcher(&[("text-primary-main", "text-red-500")]);
        assert_eq!(m.rewrite("text-primary-main-ish"), MatchOutcome::NoMatch);
        assert_eq!(m.rewrite("xtext-primary-main"), MatchOutcome::NoMatch);
        assert_eq!(m.rewrite("text-primary-mainly"), MatchOutcome::NoMatch);
        assert_eq!(m.rewrite("my-text-primary-main"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let m = matcher(&[
            ("text-primary-main", "text-red-500"),
            ("bg-primary-light", "bg-red-200"),
        ]);
        let outcome = m.rewrite("flex text-primary-main bg-primary-light hover:text-primary-main");
        let MatchOutcome::Replaced { text, hits } = outcome else {
            panic!("expected replacement");
        };
        assert_eq!(text, "flex text-red-500 bg-red-200 hover:text-red-500");
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].offset, 5);
        assert_eq!(hits[1].from, "bg-primary-light");
    }

    #[test]
    fn test_adjacent_names_separated_by_single_space() {
        let m = matcher(&[("text-a", "text-b"), ("bg-a", "bg-b")]);
        assert_eq!(replaced(m.rewrite("text-a bg-a text-a")), "text-b bg-b text-b");
    }

    #[test]
    fn test_longest_key_wins() {
        let m = matcher(&[
            ("text-primary", "text-red"),
            ("text-primary-main", "text-red-500"),
        ]);
        assert_eq!(replaced(m.rewrite("text-primary text-primary-main")), "text-red text-red-500");
    }

    #[test]
    fn test_modifiers_and_opacity() {
        let m = matcher(&[("bg-primary-main", "bg-red-500")]);
        assert_eq!(replaced(m.rewrite("!bg-primary-main")), "!bg-red-500");
        assert_eq!(replaced(m.rewrite("bg-primary-main/50")), "bg-red-500/50");
        assert_eq!(replaced(m.rewrite("  bg-primary-main\n")), "  bg-red-500\n");
    }

    #[test]
    fn test_keys_are_literal() {
        let m = matcher(&[("bg-black/5", "bg-neutral-900/5")]);
        assert_eq!(m.rewrite("bg-blackx5"), MatchOutcome::NoMatch);
        assert_eq!(replaced(m.rewrite("bg-black/5")), "bg-neutral-900/5");
    }

    #[test]
    fn test_empty_input_and_empty_lookup() {
        let m = matcher(&[("text-a", "text-b")]);
        assert_eq!(m.rewrite(""), MatchOutcome::NoMatch);

        let empty = ClassNameMatcher::new(ClassNameLookup::default()).unwrap();
        assert_eq!(empty.rewrite("text-a"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_replacement_must_be_one_class_name() {
        let m = matcher(&[("text-primary-main", "text-red-500 font-bold"), ("bg-primary-main", "")]);
        assert_eq!(
            m.rewrite("flex text-primary-main"),
            MatchOutcome::Failed(MatchError::InvalidReplacement {
                from: "text-primary-main".to_string(),
                to: "text-red-500 font-bold".to_string(),
            })
        );
        assert!(matches!(
            m.rewrite("bg-primary-main"),
            MatchOutcome::Failed(MatchError::InvalidReplacement { .. })
        ));
        assert_eq!(m.rewrite("flex"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_already_migrated_text_is_untouched() {
        let m = matcher(&[("text-primary-main", "text-red-500")]);
        assert_eq!(m.rewrite("text-red-500"), MatchOutcome::NoMatch);
    }
}
