//! JSON and text artifacts written next to a run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::lookup::ClassNameLookup;
use crate::palette::{PaletteDiff, TieBreak};
use crate::survey::ShapeRecord;

/// Legacy color path → new color path, for spot checks
pub const COLORS_MAP_FILE: &str = "tw-colors-map.json";
/// Legacy class name → new class name, consumed by `migrate --lookup`
pub const CLASSES_MAP_FILE: &str = "tw-classes-map.json";
pub const ANALYSIS_JSON_FILE: &str = "class-names-analysis.json";
pub const ANALYSIS_TEXT_FILE: &str = "class-names-analysis.txt";

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn write_text(path: &Path, content: &str) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ArtifactError::Write {
            path: parent.display().to_string(),
            source: e,
        })?;
    }
    fs::write(path, content).map_err(|e| ArtifactError::Write {
        path: path.display().to_string(),
        source: e,
    })
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ArtifactError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    write_text(path, &json)
}

/// Load a class-name lookup previously written by [`write_mapping_artifacts`].
pub fn read_lookup(path: &Path) -> Result<ClassNameLookup, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|e| ArtifactError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ArtifactError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write the color path map and the class lookup into `out_dir`.
pub fn write_mapping_artifacts(
    out_dir: &Path,
    diff: &PaletteDiff,
    tie_break: TieBreak,
) -> Result<Vec<PathBuf>, ArtifactError> {
    let colors: BTreeMap<String, String> = diff.mapping.resolve(tie_break);
    let colors_path = out_dir.join(COLORS_MAP_FILE);
    write_json(&colors_path, &colors)?;

    let classes_path = out_dir.join(CLASSES_MAP_FILE);
    write_json(&classes_path, &diff.lookup)?;

    tracing::info!(dir = %out_dir.display(), paths = colors.len(), classes = diff.lookup.len(), "wrote mapping artifacts");
    Ok(vec![colors_path, classes_path])
}

/// Write the shape survey as JSON and as a plain text dump.
pub fn write_survey_artifacts(out_dir: &Path, record: &ShapeRecord) -> Result<Vec<PathBuf>, ArtifactError> {
    let json_path = out_dir.join(ANALYSIS_JSON_FILE);
    write_json(&json_path, record)?;

    let text_path = out_dir.join(ANALYSIS_TEXT_FILE);
    write_text(&text_path, &record.to_text())?;

    Ok(vec![json_path, text_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MigrateConfig;
    use crate::palette::ColorTree;

    #[test]
    fn test_mapping_artifacts_round_trip_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = ColorTree::new().with_tree("primary", ColorTree::new().with_leaf("main", "#F43F5E"));
        let updated = ColorTree::new().with_tree("red", ColorTree::new().with_leaf("500", "#f43f5e"));
        let diff = PaletteDiff::from_trees(&legacy, &updated, &MigrateConfig::default());

        let written = write_mapping_artifacts(dir.path(), &diff, TieBreak::First).unwrap();
        assert_eq!(written.len(), 2);

        let colors = fs::read_to_string(dir.path().join(COLORS_MAP_FILE)).unwrap();
        assert_eq!(colors, "{\n  \"primary-main\": \"red-500\"\n}");

        let lookup = read_lookup(&dir.path().join(CLASSES_MAP_FILE)).unwrap();
        assert_eq!(lookup, diff.lookup);
        assert_eq!(lookup.get("border-primary-main"), Some("border-red-500"));
    }

    #[test]
    fn test_survey_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = ShapeRecord::new();
        record.add("ternary_expression", "className={a ? \"b\" : \"c\"}");

        write_survey_artifacts(&dir.path().join("out"), &record).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("out").join(ANALYSIS_JSON_FILE)).unwrap()).unwrap();
        assert_eq!(json["ternary_expression"][0], "className={a ? \"b\" : \"c\"}");
        assert_eq!(
            fs::read_to_string(dir.path().join("out").join(ANALYSIS_TEXT_FILE)).unwrap(),
            "\n\nclassName={a ? \"b\" : \"c\"}"
        );
    }

    #[test]
    fn test_read_lookup_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(read_lookup(&path), Err(ArtifactError::Json { .. })));
        assert!(matches!(read_lookup(&dir.path().join("missing.json")), Err(ArtifactError::Read { .. })));
    }
}
