//! Archive staging: unpack an apworld into an ephemeral directory

use std::fs::{self, File};
use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, info};
use zip::ZipArchive;

use crate::error::ExtractError;

/// An apworld unpacked into a temporary staging directory.
///
/// Owns the directory: dropping the value removes the whole staging tree, so
/// cleanup happens on success and failure paths alike.
pub struct StagedArchive {
    dir: TempDir,
    package_name: String,
}

impl StagedArchive {
    /// Directory the archive was unpacked into.
    pub fn root_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Name of the single top-level package directory, which doubles as the
    /// plugin's importable package name.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }
}

/// Unpack the archive at `archive_path` into a fresh staging directory and
/// identify the plugin's package root.
pub fn stage(archive_path: &Path) -> Result<StagedArchive, ExtractError> {
    let file = File::open(archive_path).map_err(|e| ExtractError::Archive {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| ExtractError::Archive {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let dir = tempfile::Builder::new().prefix("apworld-").tempdir()?;
    archive
        .extract(dir.path())
        .map_err(|e| ExtractError::Archive {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;
    debug!(
        "Unpacked {} entries into {:?}",
        archive.len(),
        dir.path()
    );

    let package_name = single_package_root(dir.path())?;
    info!(
        "Staged {:?} as package `{}`",
        archive_path, package_name
    );

    Ok(StagedArchive { dir, package_name })
}

/// An apworld is expected to unpack to exactly one top-level directory named
/// after the plugin package. Anything else is ambiguous and rejected.
fn single_package_root(root: &Path) -> Result<String, ExtractError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(root)? {
        entries.push(entry?);
    }

    if entries.len() != 1 {
        return Err(ExtractError::Layout(format!(
            "expected exactly one top-level entry, found {}",
            entries.len()
        )));
    }

    let entry = &entries[0];
    if !entry.path().is_dir() {
        return Err(ExtractError::Layout(format!(
            "top-level entry `{}` is not a directory",
            entry.file_name().to_string_lossy()
        )));
    }

    entry.file_name().into_string().map_err(|name| {
        ExtractError::Layout(format!(
            "package name `{}` is not valid UTF-8",
            name.to_string_lossy()
        ))
    })
}
