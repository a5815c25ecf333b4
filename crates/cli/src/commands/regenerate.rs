//! Regenerate command implementation - the full regeneration pipeline

use crate::error::{CliError, CliResult};
use crate::utils::git;
use sdkregen_core::emitter::{self, EmitterPin};
use sdkregen_core::report::REPORT_FILE;
use sdkregen_core::{CommandRunner, Orchestrator, ProcessRunner, RegenOptions, RunReport};
use std::fs;
use std::path::{Path, PathBuf};

pub struct Options {
    pub sdk_root: String,
    pub service_dir: String,
    pub generator_root: Option<String>,
    pub generator_branch: String,
    pub emitter_version: Option<String>,
    pub use_latest_spec: bool,
    pub service_filter: Option<String>,
    pub no_branch: bool,
    pub no_stage: bool,
    pub report: Option<String>,
}

/// Run the regeneration pipeline
///
/// Exits non-zero only on configuration errors; per-package failures are
/// visible through the report and the log stream.
pub fn run(options: &Options) -> i32 {
    let runner = ProcessRunner;
    match run_inner(options, &runner) {
        Ok(report) => {
            println!("✓ Regeneration run complete");
            println!("  Succeeded: {}", report.succeed_to_regenerate.len());
            println!("  Failed: {}", report.fail_to_regenerate.len());
            if !report.not_found_api_version.is_empty() {
                println!(
                    "  Missing API version: {}",
                    report.not_found_api_version.len()
                );
            }
            if !report.not_found_module_version.is_empty() {
                println!(
                    "  Missing module version: {}",
                    report.not_found_module_version.len()
                );
            }
            0
        }
        Err(e) => {
            eprintln!("✗ Regeneration run failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options, runner: &dyn CommandRunner) -> CliResult<RunReport> {
    let sdk_root = PathBuf::from(&options.sdk_root);

    if !options.no_branch {
        git::prepare_branch(runner, &sdk_root, &options.generator_branch)?;
    }

    if let Some(pin) = emitter_pin(options)? {
        emitter::update_emitter_package(&sdk_root, &pin)?;
        emitter::generate_lock_file(runner, &sdk_root)?;
    }

    let orchestrator = Orchestrator::new(runner);
    let mut report = orchestrator.run(&RegenOptions {
        scan_root: sdk_root.join(&options.service_dir),
        use_latest_spec: options.use_latest_spec,
        service_filter: options.service_filter.clone(),
    })?;

    if let Some(root) = &options.generator_root {
        report.typespec_go_commit_hash = git::head_commit(runner, Path::new(root));
    }

    let report_path = options
        .report
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| sdk_root.join(REPORT_FILE));
    let serialized = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::Message(format!("failed to serialize report: {e}")))?;
    fs::write(&report_path, serialized + "\n")?;
    println!("  Report written to {}", report_path.display());

    if !options.no_stage {
        git::stage_all(runner, &sdk_root);
    }

    Ok(report)
}

/// Pick the dependency mode from the flags
///
/// An explicit released version wins over a generator checkout; with
/// neither flag the descriptor is left alone.
fn emitter_pin(options: &Options) -> CliResult<Option<EmitterPin>> {
    if let Some(version) = &options.emitter_version {
        let version = semver::Version::parse(version).map_err(|e| {
            CliError::Message(format!("invalid emitter version '{version}': {e}"))
        })?;
        return Ok(Some(EmitterPin::Released {
            version: version.to_string(),
        }));
    }

    Ok(options.generator_root.as_ref().map(|root| EmitterPin::Dev {
        generator_root: PathBuf::from(root),
    }))
}
