//! Legacy class name → new class name dictionary.
//!
//! Tailwind generates `text-*`, `bg-*` and `border-*` utilities for every
//! color path, so a path mapping `primary-main → red-500` expands into
//! `text-primary-main → text-red-500` and so on for each prefix.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::palette::{ColorPathMapping, TieBreak, PATH_SEPARATOR};

/// Utility prefixes expanded by default
pub const DEFAULT_PREFIXES: &[&str] = &["text", "bg", "border"];

/// Flat legacy → new class name map. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassNameLookup {
    entries: BTreeMap<String, String>,
}

impl ClassNameLookup {
    /// Expand a path mapping over `prefixes`.
    ///
    /// Prefixes are visited in order, pairs in mapping order. When one legacy
    /// path maps to several new paths, `tie_break` picks the surviving pair.
    pub fn build<S: AsRef<str>>(mapping: &ColorPathMapping, prefixes: &[S], tie_break: TieBreak) -> Self {
        let mut entries = BTreeMap::new();

        for prefix in prefixes {
            let prefix = prefix.as_ref();
            for pair in mapping.pairs() {
                let legacy = class_name(prefix, &pair.legacy);
                let new = class_name(prefix, &pair.new);
                match tie_break {
                    TieBreak::First => {
                        entries.entry(legacy).or_insert(new);
                    }
                    TieBreak::Last => {
                        entries.insert(legacy, new);
                    }
                }
            }
        }

        ClassNameLookup { entries }
    }

    pub fn get(&self, legacy: &str) -> Option<&str> {
        self.entries.get(legacy).map(String::as_str)
    }

    pub fn contains(&self, legacy: &str) -> bool {
        self.entries.contains_key(legacy)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ClassNameLookup {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        ClassNameLookup { entries: iter.into_iter().collect() }
    }
}

fn class_name(prefix: &str, path: &str) -> String {
    format!("{}{}{}", prefix, PATH_SEPARATOR, path)
}
