//! Injectable command execution
//!
//! Every external tool the orchestrator touches (the generator CLI, git) is
//! invoked through the [`CommandRunner`] trait, so tests can substitute a
//! scripted runner and never spawn real processes.

use std::path::Path;
use std::process::Command;

/// Captured result of one external command invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Execute-and-capture seam for external commands
///
/// Invocations block until the child exits and capture stdout/stderr in
/// full; nothing is streamed.
pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> std::io::Result<CommandOutput>;
}

/// Runs commands as real child processes
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> std::io::Result<CommandOutput> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let output = command.output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_io_error() {
        let runner = ProcessRunner;
        let result = runner.run("definitely-not-a-real-program-xyz", &[], None);
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_exit_code() {
        let runner = ProcessRunner;
        let output = runner.run("sh", &["-c", "echo hello"], None).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_not_success() {
        let runner = ProcessRunner;
        let output = runner.run("sh", &["-c", "exit 3"], None).unwrap();
        assert!(!output.success());
        assert_eq!(output.code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_respects_working_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let runner = ProcessRunner;
        let output = runner
            .run("sh", &["-c", "pwd"], Some(temp_dir.path()))
            .unwrap();
        let reported = std::path::PathBuf::from(output.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }
}
