//! Run report accumulation
//!
//! A package name lands in exactly one of the succeed/fail lists; the two
//! not-found lists are orthogonal flags and may overlap with either. All
//! fields exist from the start of the run so the serialized schema never
//! varies with the code path taken.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Default file the finished report is written to
pub const REPORT_FILE: &str = "regenerate-sdk-result.json";

/// Aggregate outcome of one regeneration run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub succeed_to_regenerate: Vec<String>,
    pub fail_to_regenerate: Vec<String>,
    pub not_found_api_version: Vec<String>,
    pub not_found_module_version: Vec<String>,
    pub time_to_regenerate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typespec_go_commit_hash: Option<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, name: &str) {
        self.succeed_to_regenerate.push(name.to_string());
    }

    pub fn record_failure(&mut self, name: &str) {
        self.fail_to_regenerate.push(name.to_string());
    }

    pub fn record_missing_api_version(&mut self, name: &str) {
        self.not_found_api_version.push(name.to_string());
    }

    pub fn record_missing_module_version(&mut self, name: &str) {
        self.not_found_module_version.push(name.to_string());
    }

    /// Sort the name lists and stamp the run time
    pub fn finalize(&mut self) {
        self.succeed_to_regenerate.sort();
        self.fail_to_regenerate.sort();
        self.not_found_api_version.sort();
        self.not_found_module_version.sort();
        self.time_to_regenerate = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    }

    /// Number of packages processed in the run
    pub fn total(&self) -> usize {
        self.succeed_to_regenerate.len() + self.fail_to_regenerate.len()
    }
}
