//! CLI surface of the extractor

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::Extractor;

/// Extract the embedded data tables of an apworld package as JSON.
#[derive(Debug, Parser)]
#[command(name = "apworld-extract", version)]
pub struct Args {
    /// Path to the apworld archive to extract
    #[arg(value_name = "APWORLD", env = "APWORLD_PATH")]
    pub archive: Option<PathBuf>,

    /// Path to the Archipelago repository checkout the plugin imports from
    #[arg(long, value_name = "DIR", env = "ARCHIPELAGO_REPO_PATH")]
    pub archipelago_repo: Option<PathBuf>,

    /// Indent width for pretty-printed output; non-numeric values are ignored
    #[arg(long, value_name = "WIDTH", env = "DEBUG_INDENT")]
    pub indent: Option<String>,
}

/// Parse the invocation, run one extraction, and write the JSON document to
/// stdout. Diagnostics and logs go to stderr only.
pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = Config::resolve(args.archive, args.archipelago_repo, args.indent)?;

    let json = Extractor::new(config).run()?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
