//! API version resolution
//!
//! Two-tier lookup for the API version a package targets: the structured
//! metadata file wins, generated client files are the fallback. Every
//! failure here degrades to "not found" and is logged; resolution is never
//! fatal.

use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

/// Metadata file checked first, relative to the package directory
pub const METADATA_FILE: &str = "testdata/_metadata.json";

/// Suffix of generated client definition files scanned as a fallback
pub const CLIENT_FILE_SUFFIX: &str = "_client.go";

#[derive(Debug, Deserialize)]
struct PackageMetadata {
    #[serde(rename = "apiVersion")]
    api_version: Option<String>,
}

// The token ends at whitespace or a comma, so a marker like
// "Generated from API version 2022-05-01, ..." yields "2022-05-01".
fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Generated from API version ([^\s,]+)").unwrap())
}

/// Resolve the API version a package targets
///
/// Returns `None` when neither the metadata file nor any client file yields
/// a value; the caller records the miss and lets the generator use its own
/// default.
pub fn resolve_api_version(pkg_dir: &Path) -> Option<String> {
    metadata_api_version(pkg_dir).or_else(|| client_api_version(pkg_dir))
}

fn metadata_api_version(pkg_dir: &Path) -> Option<String> {
    let path = pkg_dir.join(METADATA_FILE);
    if !path.is_file() {
        return None;
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("failed to read {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str::<PackageMetadata>(&content) {
        Ok(metadata) => metadata.api_version.filter(|v| !v.is_empty()),
        Err(e) => {
            warn!("malformed metadata {}: {e}", path.display());
            None
        }
    }
}

fn client_api_version(pkg_dir: &Path) -> Option<String> {
    let mut client_files: Vec<PathBuf> = fs::read_dir(pkg_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map_or(false, |n| n.ends_with(CLIENT_FILE_SUFFIX))
        })
        .collect();
    client_files.sort();

    for file in client_files {
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read {}: {e}", file.display());
                continue;
            }
        };

        if let Some(caps) = marker_pattern().captures(&content) {
            return Some(caps[1].to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_metadata(dir: &Path, content: &str) {
        fs::create_dir_all(dir.join("testdata")).unwrap();
        fs::write(dir.join(METADATA_FILE), content).unwrap();
    }

    #[test]
    fn test_metadata_wins_over_client_files() {
        let temp_dir = TempDir::new().unwrap();
        write_metadata(temp_dir.path(), r#"{"apiVersion": "2023-01-01"}"#);
        fs::write(
            temp_dir.path().join("widgets_client.go"),
            "// Generated from API version 2022-05-01\n",
        )
        .unwrap();

        assert_eq!(
            resolve_api_version(temp_dir.path()),
            Some("2023-01-01".to_string())
        );
    }

    #[test]
    fn test_client_file_fallback_stops_at_comma() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("widgets_client.go"),
            "// Generated from API version 2022-05-01, see below\n",
        )
        .unwrap();

        assert_eq!(
            resolve_api_version(temp_dir.path()),
            Some("2022-05-01".to_string())
        );
    }

    #[test]
    fn test_first_client_file_in_sorted_order_wins() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("b_client.go"),
            "// Generated from API version 2021-01-01\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("a_client.go"),
            "// Generated from API version 2020-01-01\n",
        )
        .unwrap();

        assert_eq!(
            resolve_api_version(temp_dir.path()),
            Some("2020-01-01".to_string())
        );
    }

    #[test]
    fn test_empty_metadata_value_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        write_metadata(temp_dir.path(), r#"{"apiVersion": ""}"#);
        fs::write(
            temp_dir.path().join("widgets_client.go"),
            "// Generated from API version 2022-05-01\n",
        )
        .unwrap();

        assert_eq!(
            resolve_api_version(temp_dir.path()),
            Some("2022-05-01".to_string())
        );
    }

    #[test]
    fn test_malformed_metadata_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        write_metadata(temp_dir.path(), "{not json");
        fs::write(
            temp_dir.path().join("widgets_client.go"),
            "// Generated from API version 2022-05-01\n",
        )
        .unwrap();

        assert_eq!(
            resolve_api_version(temp_dir.path()),
            Some("2022-05-01".to_string())
        );
    }

    #[test]
    fn test_non_client_files_are_not_scanned() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("models.go"),
            "// Generated from API version 2022-05-01\n",
        )
        .unwrap();

        assert_eq!(resolve_api_version(temp_dir.path()), None);
    }

    #[test]
    fn test_nothing_resolvable_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(resolve_api_version(temp_dir.path()), None);
    }
}
