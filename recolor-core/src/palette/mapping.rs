//! Cross-matching legacy and new palettes by color value.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::FlatColorEntry;

/// Which pair wins when one legacy path matches several new paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// First new path in flattening order
    #[default]
    First,
    /// Last new path in flattening order (historical last-write-wins)
    Last,
}

impl TieBreak {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "first" => Some(TieBreak::First),
            "last" => Some(TieBreak::Last),
            _ => None,
        }
    }
}

/// A legacy path whose color equals the color of a new path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathPair {
    pub legacy: String,
    pub new: String,
}

impl PathPair {
    pub fn new(legacy: impl Into<String>, new: impl Into<String>) -> Self {
        PathPair { legacy: legacy.into(), new: new.into() }
    }
}

/// Every value-equal `(legacy, new)` pair, duplicates included.
///
/// Pairs are ordered by legacy flattening order, then new flattening order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPathMapping {
    pairs: Vec<PathPair>,
    unmapped: Vec<String>,
}

impl ColorPathMapping {
    pub fn pairs(&self) -> &[PathPair] {
        &self.pairs
    }

    /// Legacy paths whose value matched nothing in the new palette
    pub fn unmapped_legacy_paths(&self) -> &[String] {
        &self.unmapped
    }

    /// Legacy paths that matched more than one new path
    pub fn ambiguous_legacy_paths(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut ambiguous = Vec::new();
        for pair in &self.pairs {
            if !seen.insert(pair.legacy.as_str()) && !ambiguous.contains(&pair.legacy.as_str()) {
                ambiguous.push(pair.legacy.as_str());
            }
        }
        ambiguous
    }

    /// Collapse to one new path per legacy path.
    pub fn resolve(&self, tie_break: TieBreak) -> BTreeMap<String, String> {
        let mut resolved = BTreeMap::new();
        for pair in &self.pairs {
            match tie_break {
                TieBreak::First => {
                    resolved.entry(pair.legacy.clone()).or_insert_with(|| pair.new.clone());
                }
                TieBreak::Last => {
                    resolved.insert(pair.legacy.clone(), pair.new.clone());
                }
            }
        }
        resolved
    }
}

/// Full cross join of `legacy` × `new` on case-insensitive value equality.
///
/// Palettes hold tens of entries, so the quadratic scan is fine and keeps
/// every match, including duplicates.
pub fn map_legacy_to_new(legacy: &[FlatColorEntry], new: &[FlatColorEntry]) -> ColorPathMapping {
    let new_values: Vec<String> = new.iter().map(|e| e.value.to_lowercase()).collect();

    let mut mapping = ColorPathMapping::default();
    for entry in legacy {
        let value = entry.value.to_lowercase();
        let before = mapping.pairs.len();

        for (candidate, candidate_value) in new.iter().zip(&new_values) {
            if value == *candidate_value {
                mapping.pairs.push(PathPair::new(entry.path.clone(), candidate.path.clone()));
            }
        }

        if mapping.pairs.len() == before {
            tracing::debug!(path = %entry.path, value = %entry.value, "no matching color in new palette");
            mapping.unmapped.push(entry.path.clone());
        }
    }
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(items: &[(&str, &str)]) -> Vec<FlatColorEntry> {
        items.iter().map(|(p, v)| FlatColorEntry::new(*p, *v)).collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let legacy = entries(&[("primary-main", "#F43F5E")]);
        let new = entries(&[("red-400", "#fb7185"), ("red-500", "#f43f5e")]);
        let mapping = map_legacy_to_new(&legacy, &new);
        assert_eq!(mapping.pairs(), &[PathPair::new("primary-main", "red-500")]);
        assert!(mapping.unmapped_legacy_paths().is_empty());
    }

    #[test]
    fn test_every_value_equal_pair_is_emitted() {
        let legacy = entries(&[("black", "#333"), ("gray-900", "#333"), ("white", "#fff")]);
        let new = entries(&[("neutral-900", "#333"), ("stone-900", "#333")]);
        let mapping = map_legacy_to_new(&legacy, &new);

        for pair in mapping.pairs() {
            let lv = &legacy.iter().find(|e| e.path == pair.legacy).unwrap().value;
            let nv = &new.iter().find(|e| e.path == pair.new).unwrap().value;
            assert_eq!(lv.to_lowercase(), nv.to_lowercase());
        }
        assert_eq!(
            mapping.pairs(),
            &[
                PathPair::new("black", "neutral-900"),
                PathPair::new("black", "stone-900"),
                PathPair::new("gray-900", "neutral-900"),
                PathPair::new("gray-900", "stone-900"),
            ]
        );
        assert_eq!(mapping.unmapped_legacy_paths(), &["white".to_string()]);
    }

    #[test]
    fn test_resolve_tie_break() {
        let legacy = entries(&[("black", "#333")]);
        let new = entries(&[("neutral-900", "#333"), ("stone-900", "#333")]);
        let mapping = map_legacy_to_new(&legacy, &new);

        assert_eq!(mapping.ambiguous_legacy_paths(), vec!["black"]);
        assert_eq!(mapping.resolve(TieBreak::First)["black"], "neutral-900");
        assert_eq!(mapping.resolve(TieBreak::Last)["black"], "stone-900");
    }

    #[test]
    fn test_tie_break_from_str() {
        assert_eq!(TieBreak::from_str("First"), Some(TieBreak::First));
        assert_eq!(TieBreak::from_str("last"), Some(TieBreak::Last));
        assert_eq!(TieBreak::from_str("middle"), None);
    }
}
