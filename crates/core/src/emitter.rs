//! Generator dependency descriptor management
//!
//! The SDK repository pins its generator through a dependency descriptor.
//! Dev runs point the pin at a locally packed archive from a generator
//! checkout; release validation runs pin a published version. Either way
//! the descriptor's lock file is regenerated afterwards. Failures here are
//! configuration errors: without a coherent generator pin the whole run is
//! meaningless.

use crate::error::{CoreError, CoreResult};
use crate::generator::GENERATOR_PROGRAM;
use crate::runner::CommandRunner;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Dependency descriptor, relative to the SDK root
pub const EMITTER_PACKAGE_FILE: &str = "eng/emitter-package.json";

/// Dependency key owned by this tool
pub const EMITTER_DEPENDENCY: &str = "@azure-tools/typespec-go";

const ARCHIVE_STEM: &str = "typespec-go";

/// How the generator dependency is pinned
#[derive(Debug, Clone)]
pub enum EmitterPin {
    /// Archive packed inside a local generator checkout
    Dev { generator_root: PathBuf },
    /// Published package version
    Released { version: String },
}

/// Locate the packed generator archive inside a generator checkout
///
/// Entries are sorted so the pick is deterministic when several archives
/// are present.
pub fn find_emitter_archive(generator_root: &Path) -> CoreResult<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(generator_root)
        .map_err(|_| CoreError::MissingEmitterArchive(generator_root.to_path_buf()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    entries
        .into_iter()
        .find(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.contains(ARCHIVE_STEM) && n.ends_with(".tgz"))
        })
        .ok_or_else(|| CoreError::MissingEmitterArchive(generator_root.to_path_buf()))
}

/// Rewrite the descriptor's dependency entry for the generator
///
/// Only the one key changes; every other dependency and field survives the
/// round trip. The descriptor is written back as 2-space-indented JSON.
pub fn update_emitter_package(sdk_root: &Path, pin: &EmitterPin) -> CoreResult<()> {
    let path = sdk_root.join(EMITTER_PACKAGE_FILE);
    if !path.is_file() {
        return Err(CoreError::MissingFile(path));
    }

    let target = match pin {
        EmitterPin::Dev { generator_root } => {
            let archive = find_emitter_archive(generator_root)?;
            let archive = archive.canonicalize().unwrap_or(archive);
            archive.to_string_lossy().replace('\\', "/")
        }
        EmitterPin::Released { version } => version.clone(),
    };

    let content = fs::read_to_string(&path)?;
    let mut descriptor: Value =
        serde_json::from_str(&content).map_err(|e| CoreError::MalformedDescriptor {
            path: path.clone(),
            detail: e.to_string(),
        })?;

    let dependencies = descriptor
        .get_mut("dependencies")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| CoreError::MalformedDescriptor {
            path: path.clone(),
            detail: "missing dependencies map".to_string(),
        })?;
    dependencies.insert(EMITTER_DEPENDENCY.to_string(), Value::String(target.clone()));

    let serialized =
        serde_json::to_string_pretty(&descriptor).map_err(|e| CoreError::MalformedDescriptor {
            path: path.clone(),
            detail: e.to_string(),
        })?;
    fs::write(&path, serialized + "\n")?;

    info!("pinned {EMITTER_DEPENDENCY} to {target}");
    Ok(())
}

/// Regenerate the descriptor lock file
pub fn generate_lock_file(runner: &dyn CommandRunner, sdk_root: &Path) -> CoreResult<()> {
    let output = runner.run(GENERATOR_PROGRAM, &["generate-lock-file"], Some(sdk_root))?;
    if !output.success() {
        return Err(CoreError::CommandFailed {
            command: format!("{GENERATOR_PROGRAM} generate-lock-file"),
            detail: output.stderr.trim().to_string(),
        });
    }
    Ok(())
}
