//! Scripted command runner shared by unit tests

use crate::runner::{CommandOutput, CommandRunner};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

/// One recorded invocation
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

enum Step {
    Output(CommandOutput),
    IoError(io::ErrorKind),
}

/// Serves pre-scripted results per program, in push order, and records
/// every call for assertions.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    steps: RefCell<HashMap<String, VecDeque<Step>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_output(&self, program: &str, code: i32, stdout: &str, stderr: &str) {
        self.steps
            .borrow_mut()
            .entry(program.to_string())
            .or_default()
            .push_back(Step::Output(CommandOutput {
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }));
    }

    pub fn push_io_error(&self, program: &str, kind: io::ErrorKind) {
        self.steps
            .borrow_mut()
            .entry(program.to_string())
            .or_default()
            .push_back(Step::IoError(kind));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
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

        match self
            .steps
            .borrow_mut()
            .get_mut(program)
            .and_then(|queue| queue.pop_front())
        {
            Some(Step::Output(output)) => Ok(output),
            Some(Step::IoError(kind)) => Err(io::Error::from(kind)),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no scripted step for `{program}`"),
            )),
        }
    }
}
