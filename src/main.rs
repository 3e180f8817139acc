//! apworld-extract CLI binary

use anyhow::Result;

fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for the extracted JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apworld_extract=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    apworld_extract::cli::run()
}
