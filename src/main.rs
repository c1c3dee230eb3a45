// src/main.rs
mod extractors;
mod scrape;
mod source;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;

use source::PageDocument;
use storage::Exporter;
use utils::error::ScrapeError;
use utils::AppError;

/// Command Line Interface for the profile scraper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the profile page to fetch
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Path to a saved profile page (HTML) to read instead of fetching
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Source URL recorded in the output when reading from a file
    #[arg(long, requires = "file")]
    source_url: Option<String>,

    /// Output directory for the exported profile
    #[arg(short, long, default_value = "./output")]
    output_dir: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting with args: {:?}", args);

    // 3. Obtain the page
    let page: PageDocument = if let Some(url) = &args.url {
        source::client::fetch_page(url).await?
    } else if let Some(path) = &args.file {
        source::client::load_file(path, args.source_url.clone())?
    } else {
        return Err(AppError::Config(
            "either --url or --file is required".to_string(),
        ));
    };

    // 4. Refuse non-profile addresses before any extraction starts
    if !page.is_profile_page() {
        println!("Not a LinkedIn profile page.");
        return Ok(());
    }

    println!("Scraping...");

    // 5. Run the scrape through the worker boundary
    let scraper = scrape::spawn_scraper();
    match scraper.scrape(page).await {
        Ok(record) => {
            let exporter = Exporter::new(&args.output_dir)?;
            match exporter.export(&record) {
                Ok(path) => {
                    tracing::info!("Exported profile for '{}' to {}", record.name, path.display());
                    println!("Done!");
                }
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    println!("Error: {}", e);
                }
            }
        }
        Err(ScrapeError::Failed) => {
            tracing::error!("Scrape response carried no record");
            println!("Failed to scrape.");
        }
        Err(e) => {
            tracing::error!("Scrape request failed: {}", e);
            println!("Error: {}", e);
        }
    }

    Ok(())
}
