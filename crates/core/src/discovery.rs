//! Package discovery and filtering
//!
//! A package is any directory that carries a location descriptor. Discovery
//! is a read-only recursive traversal, sorted by entry name so runs are
//! deterministic.

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// File that marks a directory as a generated package and pins its spec commit
pub const LOCATION_DESCRIPTOR: &str = "tsp-location.yaml";

/// A generated SDK package rooted at `dir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Directory name, used in reports and for filtering
    pub name: String,
    /// Package directory
    pub dir: PathBuf,
    /// Location descriptor inside `dir`
    pub descriptor: PathBuf,
}

/// Compile a service filter into an anchored regex
///
/// The pattern matches from the start of the package name: `netw` matches
/// `network` but `work` does not.
pub fn compile_filter(pattern: &str) -> CoreResult<Regex> {
    Regex::new(&format!("^(?:{pattern})"))
        .map_err(|e| CoreError::InvalidFilter(format!("{pattern}: {e}")))
}

/// Recursively enumerate packages under `root`
///
/// Packages whose directory name does not match `filter` are skipped, but
/// their subdirectories are still searched.
pub fn discover_packages(root: &Path, filter: Option<&Regex>) -> CoreResult<Vec<Package>> {
    if !root.is_dir() {
        return Err(CoreError::MissingFile(root.to_path_buf()));
    }

    let mut packages = Vec::new();
    walk(root, filter, &mut packages)?;
    Ok(packages)
}

fn walk(dir: &Path, filter: Option<&Regex>, out: &mut Vec<Package>) -> CoreResult<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for path in entries {
        if !path.is_dir() {
            continue;
        }

        let descriptor = path.join(LOCATION_DESCRIPTOR);
        if descriptor.is_file() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if filter.map_or(true, |f| f.is_match(name)) {
                    out.push(Package {
                        name: name.to_string(),
                        dir: path.clone(),
                        descriptor,
                    });
                }
            }
        }

        walk(&path, filter, out)?;
    }

    Ok(())
}
