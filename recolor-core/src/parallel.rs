//! File discovery and parallel rewriting using Rayon

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::MigrateConfig;
use crate::parser::{detect_language, ParseError};
use crate::report::RunSummary;
use crate::rewrite::{Migrator, RewriteError};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Expand targets (files, directories, glob patterns) into source files.
///
/// Directories are walked in name order without descending into
/// `config.skip_dirs` or following symlinks. Everything is filtered by
/// `config.extensions`, except plain file targets, which are kept when a
/// parser exists for them. The result is deduplicated but otherwise keeps
/// target order.
pub fn expand_targets(targets: &[String], config: &MigrateConfig) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();

    for target in targets {
        if target.contains('*') || target.contains('?') || target.contains('[') {
            let paths = glob::glob(target).map_err(|e| ScanError::Pattern {
                pattern: target.clone(),
                source: e,
            })?;
            for entry in paths.flatten() {
                if entry.is_dir() {
                    files.extend(walk_dir(&entry, config)?);
                } else if entry.is_file() && config.accepts_extension(&entry) {
                    files.push(entry);
                }
            }
            continue;
        }

        let path = Path::new(target);
        if path.is_dir() {
            files.extend(walk_dir(path, config)?);
        } else if path.exists() {
            if detect_language(target) == "unknown" {
                tracing::warn!(file = %target, "no parser for this file type, skipping");
                continue;
            }
            files.push(path.to_path_buf());
        } else {
            return Err(ScanError::Io {
                path: target.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            });
        }
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
    Ok(files)
}

fn walk_dir(root: &Path, config: &MigrateConfig) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !config.skip_dirs.iter().any(|d| e.file_name().to_str() == Some(d.as_str()))
        });

    for entry in walker {
        let entry = entry.map_err(|e| ScanError::Walk {
            path: root.display().to_string(),
            source: e,
        })?;
        if entry.file_type().is_file() && config.accepts_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Rewrite `files` in parallel and reduce the outcomes into one summary.
///
/// The first error (parse, I/O, or an aborting match failure) ends the run.
/// With `concurrency` set, a dedicated pool of that size is used.
pub fn migrate_files(
    files: &[PathBuf],
    migrator: &Migrator,
    dry_run: bool,
    concurrency: Option<usize>,
) -> Result<RunSummary, RewriteError> {
    let run = || {
        files
            .par_iter()
            .map(|path| -> Result<RunSummary, RewriteError> {
                let outcome = migrator.rewrite_file(path, dry_run)?;
                let mut summary = RunSummary { dry_run, ..Default::default() };
                summary.absorb(outcome);
                Ok(summary)
            })
            .try_reduce(|| RunSummary { dry_run, ..Default::default() }, |a, b| Ok(a.merge(b)))
    };

    match concurrency {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build thread pool, using the global pool");
                run()
            }
        },
        None => run(),
    }
}
