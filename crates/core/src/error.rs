/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the regeneration core
///
/// Every variant here is a configuration-class failure: callers abort the
/// run when they see one. Per-package generation failures and best-effort
/// lookup misses never surface as errors; they are recorded in the run
/// report instead.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required file not found: {0}")]
    MissingFile(PathBuf),

    #[error("No generator archive (*.tgz) found under {0}")]
    MissingEmitterArchive(PathBuf),

    #[error("Invalid service filter: {0}")]
    InvalidFilter(String),

    #[error("Malformed descriptor {path}: {detail}")]
    MalformedDescriptor { path: PathBuf, detail: String },

    #[error("Command `{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
