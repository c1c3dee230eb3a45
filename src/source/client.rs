// src/source/client.rs
use std::path::Path;

use reqwest::header;

use crate::source::PageDocument;
use crate::utils::error::SourceError;

const PAGE_USER_AGENT: &str = "Mozilla/5.0 (compatible; profile_scraper/0.1)";

/// Creates a reqwest client configured for page fetching.
fn build_page_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(PAGE_USER_AGENT)
        .build()
}

/// Fetches a single rendered page from its URL. One request, no retries.
pub async fn fetch_page(url: &str) -> Result<PageDocument, SourceError> {
    let client = build_page_client()?;

    tracing::info!("Fetching page from: {}", url);

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as SourceError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::PageNotFound(url.to_string()));
        }
        return Err(SourceError::Http(status));
    }

    let html = response.text().await?;
    tracing::debug!("Successfully fetched {} bytes from {}", html.len(), url);

    Ok(PageDocument {
        url: url.to_string(),
        html,
    })
}

/// Reads a saved page from disk. The record's source address is the
/// explicit override when given, otherwise a file:// URL for the path.
pub fn load_file(path: &Path, source_url: Option<String>) -> Result<PageDocument, SourceError> {
    let html = std::fs::read_to_string(path)?;
    let url = source_url.unwrap_or_else(|| format!("file://{}", path.display()));
    tracing::debug!("Loaded {} bytes from {}", html.len(), path.display());
    Ok(PageDocument { url, html })
}
