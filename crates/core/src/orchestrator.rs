//! Regeneration orchestration
//!
//! Sequential, single-threaded workflow over the filtered package set. One
//! package's failure never aborts the batch; only configuration errors (a
//! bad scan root, a bad filter, an unresolvable upstream HEAD) propagate.

use crate::api_version::resolve_api_version;
use crate::discovery::{compile_filter, discover_packages, Package};
use crate::error::CoreResult;
use crate::generator::{regenerate_package, Outcome};
use crate::module_version::{capture_module_version, restore_module_version};
use crate::report::RunReport;
use crate::runner::CommandRunner;
use crate::spec_commit::{latest_spec_commit, update_descriptor};
use std::path::PathBuf;
use tracing::{info, warn};

/// Parameters of one regeneration run
#[derive(Debug, Clone)]
pub struct RegenOptions {
    /// Root scanned for location descriptors
    pub scan_root: PathBuf,
    /// Pin every descriptor to the upstream HEAD before generating
    pub use_latest_spec: bool,
    /// Filter over package directory names, anchored at the start
    pub service_filter: Option<String>,
}

/// Drives the per-package regeneration workflow
///
/// Holds its only external capability, the command runner, explicitly; no
/// ambient state.
pub struct Orchestrator<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Orchestrator<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Process every filtered package and return the finalized report
    pub fn run(&self, options: &RegenOptions) -> CoreResult<RunReport> {
        let filter = options
            .service_filter
            .as_deref()
            .map(compile_filter)
            .transpose()?;
        let packages = discover_packages(&options.scan_root, filter.as_ref())?;
        info!(
            "discovered {} package(s) under {}",
            packages.len(),
            options.scan_root.display()
        );

        let spec_commit = if options.use_latest_spec {
            let commit = latest_spec_commit(self.runner)?;
            info!("pinning packages to upstream spec {commit}");
            Some(commit)
        } else {
            None
        };

        let mut report = RunReport::new();
        for package in &packages {
            self.process_package(package, spec_commit.as_deref(), &mut report);
        }

        report.finalize();
        Ok(report)
    }

    fn process_package(
        &self,
        package: &Package,
        spec_commit: Option<&str>,
        report: &mut RunReport,
    ) {
        info!(package = %package.name, "regenerating");

        let module_version = capture_module_version(&package.dir);
        if module_version.is_none() {
            warn!(package = %package.name, "module version not found");
            report.record_missing_module_version(&package.name);
        }

        let api_version = resolve_api_version(&package.dir);
        match &api_version {
            Some(version) => info!(package = %package.name, "using api version {version}"),
            None => {
                warn!(package = %package.name, "api version not found, generator default applies");
                report.record_missing_api_version(&package.name);
            }
        }

        if let Some(commit) = spec_commit {
            if let Err(e) = update_descriptor(&package.descriptor, commit) {
                warn!(package = %package.name, "failed to pin spec commit: {e}");
                report.record_failure(&package.name);
                return;
            }
        }

        match regenerate_package(self.runner, package, api_version.as_deref()) {
            Outcome::Succeeded => {
                if let Some(version) = module_version {
                    if !restore_module_version(&package.dir, &version) {
                        warn!(package = %package.name, "module version not preserved");
                        report.record_missing_module_version(&package.name);
                    }
                }
                info!(package = %package.name, "regenerated");
                report.record_success(&package.name);
            }
            Outcome::Failed => {
                warn!(package = %package.name, "regeneration failed");
                report.record_failure(&package.name);
            }
        }
    }
}
