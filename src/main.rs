// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Validate the options and build the HTTP fetcher
// 4. Run the mirror pipeline
// 5. Exit with proper code (0 = success, 1 = error)
// =============================================================================

use anyhow::{Context, Result};
use api_mirror::cli::Cli;
use api_mirror::fetch::HttpFetcher;
use api_mirror::{logging, mirror, MirrorOptions};
use clap::Parser;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole cause chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let options = MirrorOptions::from_cli(cli)?;
    let fetcher = HttpFetcher::new(options.timeout).context("failed to create HTTP client")?;

    let summary = mirror::run(&fetcher, &options).await?;

    tracing::info!(
        "Wrote {} file(s) to {} ({} document(s), {} downloaded file(s))",
        summary.written.len(),
        options.output_directory.display(),
        summary.documents,
        summary.files
    );

    Ok(())
}
