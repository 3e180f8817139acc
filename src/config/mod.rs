//! Invocation configuration for one extraction run

use std::path::PathBuf;

use crate::error::ExtractError;

/// Validated inputs of one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the apworld archive to extract.
    pub archive_path: PathBuf,

    /// Path to the Archipelago repository checkout the plugin imports from.
    pub archipelago_repo: PathBuf,

    /// Pretty-print indent width; `None` means compact output.
    pub indent: Option<usize>,
}

impl Config {
    /// Resolve raw CLI/environment input into a validated configuration.
    ///
    /// Both paths are required and must exist; everything here is checked
    /// before any staging side effect happens.
    pub fn resolve(
        archive: Option<PathBuf>,
        archipelago_repo: Option<PathBuf>,
        indent: Option<String>,
    ) -> Result<Self, ExtractError> {
        let archive_path = archive.ok_or_else(|| {
            ExtractError::Configuration(
                "no apworld archive given; pass one as an argument or set APWORLD_PATH".to_string(),
            )
        })?;
        let archipelago_repo = archipelago_repo.ok_or_else(|| {
            ExtractError::Configuration(
                "no Archipelago repository given; pass --archipelago-repo or set \
                 ARCHIPELAGO_REPO_PATH"
                    .to_string(),
            )
        })?;

        let config = Self {
            archive_path,
            archipelago_repo,
            indent: indent.as_deref().and_then(parse_indent),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate that the configured paths point at the right kind of entry.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if !self.archive_path.is_file() {
            return Err(ExtractError::Configuration(format!(
                "apworld archive {} is not a readable file",
                self.archive_path.display()
            )));
        }
        if !self.archipelago_repo.is_dir() {
            return Err(ExtractError::Configuration(format!(
                "Archipelago repository {} is not a directory",
                self.archipelago_repo.display()
            )));
        }
        Ok(())
    }
}

/// Indent widths are plain digit strings; anything else disables pretty
/// printing instead of failing the run.
fn parse_indent(raw: &str) -> Option<usize> {
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}
