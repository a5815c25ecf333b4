//! Upstream spec commit pinning
//!
//! When a run pins to the latest upstream spec, the upstream repository's
//! HEAD is resolved once and every package's location descriptor is
//! rewritten to that commit before its regeneration.

use crate::error::{CoreError, CoreResult};
use crate::runner::CommandRunner;
use std::fs;
use std::path::Path;

/// Source-of-truth repository for service specifications
pub const UPSTREAM_SPEC_REPO: &str = "https://github.com/Azure/azure-rest-api-specs.git";

const COMMIT_MARKER: &str = "commit:";

/// Resolve the upstream spec repository's HEAD commit
///
/// A remote reference query; failure is a configuration error because every
/// descriptor rewrite in the run depends on the result.
pub fn latest_spec_commit(runner: &dyn CommandRunner) -> CoreResult<String> {
    let output = runner.run("git", &["ls-remote", UPSTREAM_SPEC_REPO, "HEAD"], None)?;
    if !output.success() {
        return Err(CoreError::CommandFailed {
            command: "git ls-remote".to_string(),
            detail: output.stderr.trim().to_string(),
        });
    }

    output
        .stdout
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
        .map(str::to_string)
        .filter(|commit| !commit.is_empty())
        .ok_or_else(|| CoreError::CommandFailed {
            command: "git ls-remote".to_string(),
            detail: "empty response".to_string(),
        })
}

/// Replace the first `commit:` line of a location descriptor
///
/// Pure text transformation: all other lines and their order are preserved.
pub fn pin_commit(content: &str, commit_id: &str) -> String {
    let mut replaced = false;
    let mut updated = String::with_capacity(content.len());

    for line in content.lines() {
        if !replaced && line.contains(COMMIT_MARKER) {
            updated.push_str(COMMIT_MARKER);
            updated.push(' ');
            updated.push_str(commit_id);
            replaced = true;
        } else {
            updated.push_str(line);
        }
        updated.push('\n');
    }

    updated
}

/// Rewrite a package's location descriptor in place
pub fn update_descriptor(path: &Path, commit_id: &str) -> CoreResult<()> {
    let content = fs::read_to_string(path)?;
    fs::write(path, pin_commit(&content, commit_id))?;
    Ok(())
}
