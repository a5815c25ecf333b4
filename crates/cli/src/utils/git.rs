//! Git plumbing for branch preparation and staging
//!
//! Branch management stays out of the core crate; the orchestrator only
//! sees its results. Everything goes through the injectable command runner
//! so tests never touch a real remote.

use crate::error::{CliError, CliResult};
use sdkregen_core::{CommandOutput, CommandRunner};
use std::path::Path;
use tracing::{info, warn};

/// Named remote the working branches are fetched from and pushed against
pub const SDK_REMOTE: &str = "azure-sdk";

const SDK_REMOTE_URL: &str = "https://github.com/azure-sdk/azure-sdk-for-go.git";
const BRANCH_PREFIX: &str = "typespec-go";

fn run_git(
    runner: &dyn CommandRunner,
    args: &[&str],
    cwd: &Path,
) -> std::io::Result<CommandOutput> {
    runner.run("git", args, Some(cwd))
}

/// Working branch name for a generator branch
pub fn working_branch(generator_branch: &str) -> String {
    format!("{BRANCH_PREFIX}-{generator_branch}")
}

/// Create or switch to the working branch for a generator branch
///
/// An existing remote branch is fetched and checked out; otherwise a fresh
/// local branch is created. The `main` working branch is additionally
/// synced with the remote main branch, best-effort.
pub fn prepare_branch(
    runner: &dyn CommandRunner,
    sdk_root: &Path,
    generator_branch: &str,
) -> CliResult<()> {
    // Adding a remote that already exists fails; that is fine.
    let _ = run_git(runner, &["remote", "add", SDK_REMOTE, SDK_REMOTE_URL], sdk_root);

    let branch = working_branch(generator_branch);
    let sync_main = generator_branch == "main";

    let fetched = run_git(runner, &["fetch", SDK_REMOTE, &branch], sdk_root)
        .map(|o| o.success())
        .unwrap_or(false);
    let checked_out = fetched
        && run_git(runner, &["checkout", &branch], sdk_root)
            .map(|o| o.success())
            .unwrap_or(false);

    if checked_out {
        if sync_main {
            info!("syncing {branch} with {SDK_REMOTE}/main");
            if let Ok(output) = run_git(runner, &["pull", SDK_REMOTE, "main"], sdk_root) {
                if !output.success() {
                    warn!("failed to sync with {SDK_REMOTE}/main: {}", output.stderr.trim());
                }
            }
        }
        info!("checked out {branch}");
        return Ok(());
    }

    let created = run_git(runner, &["checkout", "-b", &branch], sdk_root)?;
    if created.success() {
        info!("created branch {branch}");
        Ok(())
    } else {
        Err(CliError::Message(format!(
            "failed to create branch {branch}: {}",
            created.stderr.trim()
        )))
    }
}

/// HEAD commit of a repository checkout, if resolvable
pub fn head_commit(runner: &dyn CommandRunner, repo_root: &Path) -> Option<String> {
    let output = run_git(runner, &["rev-parse", "HEAD"], repo_root).ok()?;
    if output.success() {
        let commit = output.stdout.trim().to_string();
        (!commit.is_empty()).then_some(commit)
    } else {
        None
    }
}

/// Stage everything the run touched, best-effort
pub fn stage_all(runner: &dyn CommandRunner, sdk_root: &Path) {
    match run_git(runner, &["add", "."], sdk_root) {
        Ok(output) if output.success() => {}
        Ok(output) => warn!("git add failed: {}", output.stderr.trim()),
        Err(e) => warn!("git add failed: {e}"),
    }
}
