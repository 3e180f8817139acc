//! Apworld Table Extractor
//!
//! A Rust library and CLI for turning the data-definition scripts embedded in
//! an Archipelago apworld package into plain JSON tables, without wiring the
//! plugin's scripting runtime into downstream tools.

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod tables;

pub use archive::StagedArchive;
pub use config::Config;
pub use error::ExtractError;
pub use loader::DataModule;
pub use tables::TableDocument;

/// One-shot extraction pipeline: stage the archive, execute its data module,
/// serialize the table document.
pub struct Extractor {
    config: Config,
}

impl Extractor {
    /// Create an extractor for a validated configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the pipeline and return the JSON text.
    ///
    /// The staging directory lives exactly as long as this call; it is
    /// removed before returning, on error paths included.
    pub fn run(&self) -> Result<String, ExtractError> {
        let staged = archive::stage(&self.config.archive_path)?;
        let module = loader::load(
            staged.root_dir(),
            staged.package_name(),
            &self.config.archipelago_repo,
        )?;
        let document = TableDocument::from_module(&module)?;
        tables::render(&document, self.config.indent)
    }
}
