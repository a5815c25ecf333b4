//! CLI error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regeneration error: {0}")]
    Core(#[from] sdkregen_core::CoreError),

    #[error("{0}")]
    Message(String),
}

pub type CliResult<T> = Result<T, CliError>;
