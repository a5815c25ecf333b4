//! List command implementation
//!
//! Read-only preview of what a regeneration run would process: discovered
//! packages with their pinned spec commit and resolved API version.

use crate::error::{CliError, CliResult};
use sdkregen_core::api_version::resolve_api_version;
use sdkregen_core::discovery::{compile_filter, discover_packages};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub struct Options {
    pub sdk_root: String,
    pub service_dir: String,
    pub service_filter: Option<String>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Package information for display
#[derive(Debug, Clone, Serialize)]
pub struct PackageInfo {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocationDescriptor {
    commit: Option<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Listing failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let scan_root = Path::new(&options.sdk_root).join(&options.service_dir);
    let filter = options
        .service_filter
        .as_deref()
        .map(compile_filter)
        .transpose()?;
    let packages = discover_packages(&scan_root, filter.as_ref())?;

    let infos: Vec<PackageInfo> = packages
        .iter()
        .map(|package| PackageInfo {
            name: package.name.clone(),
            path: package.dir.display().to_string(),
            spec_commit: read_spec_commit(&package.descriptor),
            api_version: resolve_api_version(&package.dir),
        })
        .collect();

    match options.format {
        OutputFormat::Json => {
            let serialized = serde_json::to_string_pretty(&infos)
                .map_err(|e| CliError::Message(format!("failed to serialize listing: {e}")))?;
            println!("{serialized}");
        }
        OutputFormat::Table => {
            if infos.is_empty() {
                println!("No packages found under {}", scan_root.display());
                return Ok(());
            }
            println!("{} package(s):", infos.len());
            for info in &infos {
                println!();
                println!("  {}", info.name);
                println!("    Path: {}", info.path);
                if let Some(commit) = &info.spec_commit {
                    println!("    Spec commit: {commit}");
                }
                if let Some(version) = &info.api_version {
                    println!("    API version: {version}");
                }
            }
        }
    }

    Ok(())
}

fn read_spec_commit(descriptor: &Path) -> Option<String> {
    let content = fs::read_to_string(descriptor).ok()?;
    let parsed: LocationDescriptor = serde_yaml::from_str(&content).ok()?;
    parsed.commit.filter(|commit| !commit.is_empty())
}
