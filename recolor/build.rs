//! Build script to capture git information and tree-sitter versions at compile time

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");
    println!("cargo:rerun-if-changed=../Cargo.lock");

    let commit_hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    let commit_date = git(&["log", "-1", "--format=%ci"]).unwrap_or_else(|| "unknown".to_string());
    let dirty_suffix = if git(&["status", "--porcelain"]).is_some() { "-dirty" } else { "" };

    println!("cargo:rustc-env=RECOLOR_GIT_HASH={}{}", commit_hash, dirty_suffix);
    println!("cargo:rustc-env=RECOLOR_GIT_DATE={}", commit_date);

    let versions = std::fs::read_to_string("../Cargo.lock")
        .map(|lock| tree_sitter_versions(&lock))
        .unwrap_or_default();

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    let dest_path = Path::new(&out_dir).join("versions.rs");
    let mut f = File::create(&dest_path).expect("create versions.rs");

    writeln!(f, "/// Auto-generated tree-sitter crate versions from Cargo.lock").unwrap();
    writeln!(f, "pub const DEPENDENCY_VERSIONS: &[(&str, &str)] = &[").unwrap();
    for (name, version) in &versions {
        writeln!(f, "    (\"{}\", \"{}\"),", name, version).unwrap();
    }
    writeln!(f, "];").unwrap();
}

/// `(name, version)` for tree-sitter and its grammars, sorted by name
fn tree_sitter_versions(lock: &str) -> Vec<(String, String)> {
    let mut versions = Vec::new();
    let mut name: Option<String> = None;

    for line in lock.lines().map(str::trim) {
        if line == "[[package]]" {
            name = None;
        } else if let Some(value) = line.strip_prefix("name = ") {
            name = Some(value.trim_matches('"').to_string());
        } else if let Some(value) = line.strip_prefix("version = ") {
            if let Some(n) = name.take() {
                let tracked = n == "tree-sitter"
                    || (n.starts_with("tree-sitter-") && n != "tree-sitter-language");
                if tracked {
                    versions.push((n, value.trim_matches('"').to_string()));
                }
            }
        }
    }

    versions.sort();
    versions
}
