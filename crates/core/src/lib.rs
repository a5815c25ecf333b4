//! SDK Regeneration Core Library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library drives bulk regeneration of TypeSpec-generated SDK packages:
//! it discovers package directories by their location descriptors, resolves
//! the API version each package targets, invokes the external generator once
//! per package, preserves pinned module versions across regeneration, and
//! accumulates a run report.
//!
//! All external processes go through the [`CommandRunner`] seam so the whole
//! workflow can be exercised in tests without spawning anything.
//!
//! # Example
//!
//! ```rust,no_run
//! use sdkregen_core::{Orchestrator, ProcessRunner, RegenOptions};
//!
//! let runner = ProcessRunner;
//! let orchestrator = Orchestrator::new(&runner);
//! let report = orchestrator.run(&RegenOptions {
//!     scan_root: "sdk/resourcemanager".into(),
//!     use_latest_spec: false,
//!     service_filter: Some("network".to_string()),
//! })?;
//! println!("{} package(s) regenerated", report.succeed_to_regenerate.len());
//! # Ok::<(), sdkregen_core::CoreError>(())
//! ```

pub mod api_version;
pub mod discovery;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod module_version;
pub mod orchestrator;
pub mod report;
pub mod runner;
pub mod spec_commit;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the public API surface
pub use error::{CoreError, CoreResult};
pub use orchestrator::{Orchestrator, RegenOptions};
pub use report::RunReport;
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
