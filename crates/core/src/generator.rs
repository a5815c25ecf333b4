//! Generator invocation and outcome classification
//!
//! One blocking generator invocation per package, output captured in full.
//! The generator's exit code is not trusted on its own: a zero exit with
//! inline error markers in stdout is still a failure.

use crate::discovery::Package;
use crate::runner::{CommandOutput, CommandRunner};
use tracing::{debug, error, warn};

/// External code-generation CLI
pub const GENERATOR_PROGRAM: &str = "tsp-client";

const INLINE_ERROR_MARKER: &str = "- error ";

/// Classification of one package regeneration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// True when any stdout line carries the generator's inline error marker
pub fn has_inline_errors(stdout: &str) -> bool {
    stdout
        .lines()
        .any(|line| line.to_lowercase().contains(INLINE_ERROR_MARKER))
}

/// Run `tsp-client update` for one package and classify the result
///
/// Failures here never propagate as errors; the caller records the outcome
/// and moves on to the next package.
pub fn regenerate_package(
    runner: &dyn CommandRunner,
    package: &Package,
    api_version: Option<&str>,
) -> Outcome {
    let emitter_option;
    let mut args = vec!["update"];
    if let Some(version) = api_version {
        emitter_option = format!("api-version={version}");
        args.push("--emitter-options");
        args.push(&emitter_option);
    }

    let output = match runner.run(GENERATOR_PROGRAM, &args, Some(&package.dir)) {
        Ok(output) => output,
        Err(e) => {
            error!(package = %package.name, "failed to launch {GENERATOR_PROGRAM}: {e}");
            return Outcome::Failed;
        }
    };

    if !output.success() {
        error!(
            package = %package.name,
            code = ?output.code,
            "generator exited with failure"
        );
        log_capture(&package.name, &output);
        return Outcome::Failed;
    }

    if has_inline_errors(&output.stdout) {
        error!(package = %package.name, "generator reported inline errors");
        log_capture(&package.name, &output);
        return Outcome::Failed;
    }

    debug!(package = %package.name, "generator finished cleanly");
    Outcome::Succeeded
}

fn log_capture(name: &str, output: &CommandOutput) {
    for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
        debug!(package = %name, "stdout: {line}");
    }
    for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
        warn!(package = %name, "stderr: {line}");
    }
}
