//! Test helpers for unit tests
//!
//! Shared utilities for unit tests within the CLI crate. Integration tests
//! have their own helpers under `tests/`.

use sdkregen_core::{CommandOutput, CommandRunner};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Guard for changing the current working directory in tests.
/// Restores the original directory when dropped, even on panic.
pub struct DirGuard {
    original_dir: PathBuf,
}

impl DirGuard {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let original_dir = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(DirGuard { original_dir })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

/// One invocation recorded by [`FakeRunner`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

/// Command runner serving pre-scripted outputs per program, in push order
#[derive(Default)]
pub struct FakeRunner {
    outputs: RefCell<HashMap<String, VecDeque<CommandOutput>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, program: &str, code: i32, stdout: &str, stderr: &str) {
        self.outputs
            .borrow_mut()
            .entry(program.to_string())
            .or_default()
            .push_back(CommandOutput {
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.map(Path::to_path_buf),
        });

        self.outputs
            .borrow_mut()
            .get_mut(program)
            .and_then(|queue| queue.pop_front())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no scripted output for `{program}`"),
                )
            })
    }
}
