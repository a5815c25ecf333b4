//! Update-emitter command implementation
//!
//! Pins the generator dependency in the emitter descriptor without running
//! a regeneration.

use crate::error::{CliError, CliResult};
use sdkregen_core::emitter::{self, EmitterPin};
use sdkregen_core::{CommandRunner, ProcessRunner};
use std::path::PathBuf;

pub struct Options {
    pub sdk_root: String,
    pub generator_root: Option<String>,
    pub emitter_version: Option<String>,
    pub no_lock: bool,
}

pub fn run(options: &Options) -> i32 {
    let runner = ProcessRunner;
    match run_inner(options, &runner) {
        Ok(()) => {
            println!("✓ Emitter dependency updated");
            0
        }
        Err(e) => {
            eprintln!("✗ Emitter update failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options, runner: &dyn CommandRunner) -> CliResult<()> {
    let sdk_root = PathBuf::from(&options.sdk_root);

    let pin = match (&options.emitter_version, &options.generator_root) {
        (Some(version), _) => {
            let version = semver::Version::parse(version).map_err(|e| {
                CliError::Message(format!("invalid emitter version '{version}': {e}"))
            })?;
            EmitterPin::Released {
                version: version.to_string(),
            }
        }
        (None, Some(root)) => EmitterPin::Dev {
            generator_root: PathBuf::from(root),
        },
        (None, None) => {
            return Err(CliError::Message(
                "either --generator-root or --emitter-version is required".to_string(),
            ));
        }
    };

    emitter::update_emitter_package(&sdk_root, &pin)?;
    if !options.no_lock {
        emitter::generate_lock_file(runner, &sdk_root)?;
    }

    Ok(())
}
