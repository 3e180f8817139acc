//! Error types for the extraction pipeline

use std::path::PathBuf;

/// Failure categories of one extraction run.
///
/// Configuration problems are raised before any staging side effect; every
/// later category maps to one pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Required input missing or invalid, detected before extraction starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The archive is missing, unreadable, or not a valid zip.
    #[error("cannot read apworld archive {}: {reason}", .path.display())]
    Archive { path: PathBuf, reason: String },

    /// The archive does not unpack to exactly one top-level package root.
    #[error("invalid apworld layout: {0}")]
    Layout(String),

    /// The package's data module is missing or no loadable unit could be
    /// built from it.
    #[error("cannot prepare data module of package `{package}`: {reason}")]
    Spec { package: String, reason: String },

    /// The data module's own top-level code failed while running. The engine
    /// diagnostic is usually the actionable message, so it is carried
    /// verbatim.
    #[error("data module of package `{package}` failed: {message}")]
    ModuleExecution { package: String, message: String },

    /// A required table attribute is absent after successful execution.
    #[error("data module does not define required table `{table}`")]
    MissingTable { table: &'static str },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot encode table document: {0}")]
    Json(#[from] serde_json::Error),
}
