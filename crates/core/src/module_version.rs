//! Module version preservation
//!
//! The generator derives a fresh module version from its own defaults,
//! which would silently overwrite an intentionally pinned or pre-release
//! version. Before regeneration the existing declaration is captured; after
//! a successful regeneration the captured value is written back into the
//! freshly generated file. Every step here is best-effort.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

/// Primary version-declaration file inside a package
pub const VERSION_FILE: &str = "version.go";

/// Fallback checked when the primary file is absent or lacks the declaration
pub const FALLBACK_VERSION_FILE: &str = "constants.go";

fn declaration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"(?:const|var)\s+moduleVersion\s*=\s*"([^"]*)""#).unwrap())
}

/// Read the declared module version from the package's version files
pub fn capture_module_version(pkg_dir: &Path) -> Option<String> {
    for file in [VERSION_FILE, FALLBACK_VERSION_FILE] {
        let path = pkg_dir.join(file);
        if !path.is_file() {
            continue;
        }

        match fs::read_to_string(&path) {
            Ok(content) => {
                if let Some(caps) = declaration_pattern().captures(&content) {
                    return Some(caps[1].to_string());
                }
            }
            Err(e) => warn!("failed to read {}: {e}", path.display()),
        }
    }

    None
}

/// Replace the quoted value of the first `moduleVersion` declaration
///
/// Pure text substitution: only the characters between the quotes change,
/// everything else in `content` is preserved byte for byte. Returns `None`
/// when no declaration exists.
pub fn replace_module_version(content: &str, version: &str) -> Option<String> {
    let value = declaration_pattern().captures(content)?.get(1)?;

    let mut updated = String::with_capacity(content.len() + version.len());
    updated.push_str(&content[..value.start()]);
    updated.push_str(version);
    updated.push_str(&content[value.end()..]);
    Some(updated)
}

/// Write the captured version back into the regenerated version file
///
/// Checks the primary file, then the fallback. Returns `true` when a
/// declaration was rewritten (or already carries the value); a miss leaves
/// the tree untouched and is reported by the caller, never fatal.
pub fn restore_module_version(pkg_dir: &Path, version: &str) -> bool {
    for file in [VERSION_FILE, FALLBACK_VERSION_FILE] {
        let path = pkg_dir.join(file);
        if !path.is_file() {
            continue;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read {}: {e}", path.display());
                continue;
            }
        };

        let Some(updated) = replace_module_version(&content, version) else {
            continue;
        };

        if updated == content {
            return true;
        }
        match fs::write(&path, updated) {
            Ok(()) => return true,
            Err(e) => {
                warn!("failed to rewrite {}: {e}", path.display());
                return false;
            }
        }
    }

    false
}
