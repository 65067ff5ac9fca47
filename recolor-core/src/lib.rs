//! recolor-core: Tailwind color class name migration
//!
//! This library provides:
//! - Extraction of the `colors` tree from Tailwind config modules
//! - Value-based mapping of legacy color paths to new ones
//! - A whole-class-name matcher over the resulting lookup
//! - Shape-aware rewriting of `className` attributes in JSX/TSX
//! - A survey of the class name expression shapes in a codebase

pub mod parser;
pub mod palette;
pub mod lookup;
pub mod matcher;
pub mod splice;
pub mod config;
pub mod rewrite;
pub mod survey;
pub mod report;
pub mod parallel;
pub mod artifacts;

pub use parser::{
    parse_file, parse_string, detect_language, get_language_abi_versions,
    LanguageAbiInfo, ParsedSource, ParseError, SUPPORTED_LANGUAGES,
};
pub use palette::{ColorNode, ColorTree, ColorPathMapping, FlatColorEntry, PaletteDiff, TieBreak};
pub use lookup::{ClassNameLookup, DEFAULT_PREFIXES};
pub use matcher::{ClassNameMatcher, MatchOutcome, MatchError, MatcherError};
pub use config::{ConfigError, FailurePolicy, MigrateConfig};
pub use rewrite::{ClassShape, Migrator, RewriteError, RewriteResult, Transformed};
pub use survey::{survey_path, survey_source, survey_targets, ShapeRecord};
pub use report::{FileOutcome, RunSummary};
pub use parallel::{expand_targets, migrate_files, ScanError};
pub use artifacts::{read_lookup, write_mapping_artifacts, write_survey_artifacts, ArtifactError};
