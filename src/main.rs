//! rustpubmed - PubMed Non-Academic Author Extraction Pipeline
//!
//! Fetches papers for a search query from PubMed, flags authors with
//! pharmaceutical/biotech company affiliations, and writes a CSV summary.
//!
//! ## Usage
//!
//! ```bash
//! rustpubmed "cancer treatment" -f results.csv
//! ```

use anyhow::Result;
use clap::Parser;
use rustpubmed::{entrez::EntrezClient, filters::CompanyKeywords, output};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Fetch research papers from PubMed and flag non-academic authors
#[derive(Parser)]
#[command(name = "rustpubmed")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Search query for PubMed
    query: String,

    /// Output CSV file name
    #[arg(short, long, default_value = "papers.csv")]
    file: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    if cli.debug {
        println!("Fetching papers for query: {}", cli.query);
    }

    let client = EntrezClient::new()?;
    let keywords = CompanyKeywords::default();

    let papers = client.fetch_papers(&cli.query, &keywords).await?;
    info!(count = papers.len(), "Fetched papers");

    output::save_csv(&cli.file, &papers)?;
    println!("Results saved to {}", cli.file.display());

    Ok(())
}
