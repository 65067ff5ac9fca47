//! recolor - Tailwind color class name migration
//!
//! This is the main CLI entry point: it loads configuration, builds the
//! class name lookup and drives the per-file rewrite.

mod cli;
mod logging;
mod version;

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use recolor_core::{
    artifacts::write_json, expand_targets, migrate_files, read_lookup, survey_targets,
    write_mapping_artifacts, write_survey_artifacts, MigrateConfig, Migrator, PaletteDiff,
};

use cli::{AnalyzeArgs, Args, Command, MapArgs, MigrateArgs, Overrides};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("error: {:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<()> {
    if args.version {
        if args.verbose {
            version::print_version_verbose();
        } else {
            version::print_version();
        }
        return Ok(());
    }

    let Some(command) = args.command else {
        bail!("no command given (try `recolor --help`)");
    };

    let base = match &args.config {
        Some(path) => MigrateConfig::from_file(path)?,
        None => MigrateConfig::default(),
    };

    match command {
        Command::Map(map) => {
            let config = configure(base, &map.overrides)?;
            run_map(map, &config)
        }
        Command::Migrate(migrate) => {
            let config = configure(base, &migrate.overrides)?;
            run_migrate(migrate, &config, args.verbose)
        }
        Command::Analyze(analyze) => {
            let config = configure(base, &analyze.overrides)?;
            run_analyze(analyze, &config)
        }
    }
}

fn configure(mut config: MigrateConfig, overrides: &Overrides) -> Result<MigrateConfig> {
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

fn build_palette(legacy: &std::path::Path, updated: &std::path::Path, config: &MigrateConfig) -> Result<PaletteDiff> {
    let diff = PaletteDiff::from_files(legacy, updated, config)
        .with_context(|| format!("failed to read palettes from {} and {}", legacy.display(), updated.display()))?;

    let ambiguous = diff.mapping.ambiguous_legacy_paths();
    if !ambiguous.is_empty() {
        tracing::warn!(
            tie_break = ?config.tie_break,
            paths = %ambiguous.join(", "),
            "legacy colors match several new colors"
        );
    }
    if !diff.mapping.unmapped_legacy_paths().is_empty() {
        tracing::warn!(
            paths = %diff.mapping.unmapped_legacy_paths().join(", "),
            "legacy colors with no match in the updated palette"
        );
    }
    Ok(diff)
}

fn run_map(args: MapArgs, config: &MigrateConfig) -> Result<()> {
    let diff = build_palette(&args.legacy, &args.updated, config)?;
    for path in write_mapping_artifacts(&args.out_dir, &diff, config.tie_break)? {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn run_migrate(args: MigrateArgs, config: &MigrateConfig, verbose: bool) -> Result<()> {
    let (lookup, unmapped) = match (&args.lookup, &args.legacy, &args.updated) {
        (Some(path), _, _) => (read_lookup(path)?, Vec::new()),
        (None, Some(legacy), Some(updated)) => {
            let diff = build_palette(legacy, updated, config)?;
            if !args.dry_run {
                write_mapping_artifacts(&args.out_dir, &diff, config.tie_break)?;
            }
            let unmapped = diff.mapping.unmapped_legacy_paths().to_vec();
            (diff.lookup, unmapped)
        }
        _ => bail!("either --lookup or both --legacy and --updated are required"),
    };

    if lookup.is_empty() {
        tracing::warn!("class name lookup is empty, nothing will be rewritten");
    }

    let files = expand_targets(&args.dir, config)?;
    if files.is_empty() {
        bail!("no {} files found in {}", config.extensions.join("/"), args.dir.join(", "));
    }

    let concurrency = args.concurrency.unwrap_or_else(num_cpus::get);
    let migrator = Migrator::new(lookup, config)?;
    let summary = migrate_files(&files, &migrator, args.dry_run, Some(concurrency))?
        .finish(migrator.lookup(), unmapped);

    print!("{}", summary);
    if verbose {
        for key in &summary.unused_keys {
            println!("  unused {}", key);
        }
    }

    if let Some(report) = &args.report {
        write_json(report, &summary)?;
        println!("wrote {}", report.display());
    }
    Ok(())
}

fn run_analyze(args: AnalyzeArgs, config: &MigrateConfig) -> Result<()> {
    let record = survey_targets(&args.dir, config)?;

    if record.is_empty() {
        tracing::warn!("no class name expressions found");
    }
    for path in write_survey_artifacts(&args.out_dir, &record)? {
        println!("wrote {}", path.display());
    }
    Ok(())
}
