//! CLI argument parsing using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recolor_core::{MigrateConfig, TieBreak};

/// Rewrite legacy Tailwind color class names after a palette rename
#[derive(Parser, Debug)]
#[command(name = "recolor")]
#[command(author, about, long_about = None, disable_version_flag = true)]
#[command(after_help = r#"EXAMPLES:
    # Build the color and class name maps from two Tailwind configs
    recolor map --legacy tailwind.config.old.js --updated tailwind.config.js

    # Rewrite class names under src/ in place
    recolor migrate --legacy tailwind.config.old.js --updated tailwind.config.js --dir src

    # Preview with a previously written lookup, saving a JSON report
    recolor migrate --lookup tw-classes-map.json --dir "src/**/*.tsx" --dry-run --report report.json

    # See which className expression shapes a codebase uses
    recolor analyze --dir src

CONFIGURATION:
    --config recolor.toml sets prefixes, attributes, extensions, skip_dirs,
    tie_break and on_match_error. Command-line flags override the file.
    RECOLOR_LOG sets log filters (e.g. RECOLOR_LOG=recolor_core=debug).
"#)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print version information (add -v for grammar versions)
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// TOML configuration file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write tw-colors-map.json and tw-classes-map.json
    Map(MapArgs),
    /// Rewrite class names in place
    Migrate(MigrateArgs),
    /// Write class-names-analysis.json and class-names-analysis.txt
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
pub struct MapArgs {
    /// Config holding the legacy color tree
    #[arg(long = "legacy")]
    pub legacy: PathBuf,

    /// Config holding the updated color tree
    #[arg(long = "updated")]
    pub updated: PathBuf,

    /// Directory for the JSON artifacts
    #[arg(long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(clap::Args, Debug)]
pub struct MigrateArgs {
    /// Config holding the legacy color tree
    #[arg(long = "legacy", requires = "updated", required_unless_present = "lookup")]
    pub legacy: Option<PathBuf>,

    /// Config holding the updated color tree
    #[arg(long = "updated", requires = "legacy")]
    pub updated: Option<PathBuf>,

    /// Use an existing tw-classes-map.json instead of the configs
    #[arg(long = "lookup", conflicts_with_all = ["legacy", "updated"])]
    pub lookup: Option<PathBuf>,

    /// Files, directories or glob patterns to rewrite
    #[arg(short = 'd', long = "dir", required = true, num_args = 1..)]
    pub dir: Vec<String>,

    /// Report what would change without writing files
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the run summary as JSON
    #[arg(long = "report")]
    pub report: Option<PathBuf>,

    /// Directory for the JSON artifacts (when building from configs)
    #[arg(long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,

    /// Number of parallel workers
    #[arg(short = 'c', long = "concurrency")]
    pub concurrency: Option<usize>,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Files or directories to survey
    #[arg(short = 'd', long = "dir", required = true, num_args = 1..)]
    pub dir: Vec<String>,

    /// Directory for the analysis files
    #[arg(long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Flags that override `recolor.toml`
#[derive(clap::Args, Debug, Default)]
pub struct Overrides {
    /// Utility prefix to expand (repeatable; default text, bg, border)
    #[arg(long = "prefix")]
    pub prefix: Vec<String>,

    /// JSX attribute holding class names (repeatable; default className)
    #[arg(long = "attribute")]
    pub attribute: Vec<String>,

    /// File extension to scan in directories (repeatable; default jsx, tsx)
    #[arg(long = "ext")]
    pub ext: Vec<String>,

    /// Which new path wins when a color value is shared: first or last
    #[arg(long = "tie-break", value_parser = parse_tie_break)]
    pub tie_break: Option<TieBreak>,
}

impl Overrides {
    pub fn apply(&self, config: &mut MigrateConfig) {
        if !self.prefix.is_empty() {
            config.prefixes = self.prefix.clone();
        }
        if !self.attribute.is_empty() {
            config.attributes = self.attribute.clone();
        }
        if !self.ext.is_empty() {
            config.extensions = self.ext.clone();
        }
        if let Some(tie_break) = self.tie_break {
            config.tie_break = tie_break;
        }
    }
}

fn parse_tie_break(s: &str) -> Result<TieBreak, String> {
    TieBreak::from_str(s).ok_or_else(|| format!("expected `first` or `last`, got `{}`", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_requires_source_of_lookup() {
        assert!(Args::try_parse_from(["recolor", "migrate", "--dir", "src"]).is_err());
        assert!(Args::try_parse_from(["recolor", "migrate", "--legacy", "a.js", "--dir", "src"]).is_err());
        assert!(Args::try_parse_from(["recolor", "migrate", "--lookup", "m.json", "--legacy", "a.js", "--dir", "src"]).is_err());
        assert!(Args::try_parse_from(["recolor", "migrate", "--lookup", "m.json", "--dir", "src"]).is_ok());
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::try_parse_from([
            "recolor", "map", "--legacy", "a.js", "--updated", "b.js",
            "--prefix", "text", "--prefix", "ring", "--tie-break", "last",
        ])
        .unwrap();
        let Some(Command::Map(map)) = args.command else {
            panic!("expected map command");
        };

        let mut config = MigrateConfig::default();
        map.overrides.apply(&mut config);
        assert_eq!(config.prefixes, vec!["text", "ring"]);
        assert_eq!(config.tie_break, TieBreak::Last);
        assert_eq!(config.attributes, vec!["className"]);
    }

    #[test]
    fn test_invalid_tie_break() {
        let result = Args::try_parse_from([
            "recolor", "map", "--legacy", "a.js", "--updated", "b.js", "--tie-break", "random",
        ]);
        assert!(result.is_err());
    }
}
