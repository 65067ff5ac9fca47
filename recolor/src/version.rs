//! Version information display

use std::collections::HashMap;

// Include the auto-generated versions from build.rs
include!(concat!(env!("OUT_DIR"), "/versions.rs"));

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit hash (set by build.rs)
pub const GIT_HASH: &str = env!("RECOLOR_GIT_HASH");

/// Git commit date (set by build.rs)
pub const GIT_DATE: &str = env!("RECOLOR_GIT_DATE");

fn print_header() {
    println!("recolor {} ({} {})", VERSION, GIT_HASH, GIT_DATE);
    println!();
    println!("Parser:");

    let max_len = DEPENDENCY_VERSIONS.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    for (name, version) in DEPENDENCY_VERSIONS {
        println!("  {:width$}  {}", name, version, width = max_len);
    }
}

pub fn print_version() {
    print_header();
}

/// Also list the grammar ABI versions and the extensions each language covers
pub fn print_version_verbose() {
    print_header();

    let abi_versions: HashMap<&str, usize> = recolor_core::get_language_abi_versions()
        .into_iter()
        .map(|info| (info.name, info.abi_version))
        .collect();

    println!();
    println!("Languages:");
    let max_len = recolor_core::SUPPORTED_LANGUAGES.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    for (lang, extensions) in recolor_core::SUPPORTED_LANGUAGES {
        let abi = abi_versions
            .get(lang)
            .map(|v| format!("[ABI {}]", v))
            .unwrap_or_default();
        println!("  {:width$}  {:10}  {}", lang, abi, extensions.join(", "), width = max_len);
    }
}
