// src/scrape/mod.rs
//
// Message-passing seam between the trigger (CLI) and the extraction
// worker. One request in flight at a time; the reply is awaited under an
// explicit timeout so a vanished worker can never block the caller
// indefinitely.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

use crate::extractors::{ProfileExtractor, ProfileRecord};
use crate::source::PageDocument;
use crate::utils::error::ScrapeError;

const SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);

/// A request to scrape one page, with the channel to answer on.
#[derive(Debug)]
pub struct ScrapeRequest {
    pub page: PageDocument,
    reply: oneshot::Sender<ScrapeResponse>,
}

/// Wire-shaped response: `data` carries the record on success and is
/// absent on failure.
#[derive(Debug)]
pub struct ScrapeResponse {
    pub data: Option<ProfileRecord>,
}

/// Caller-side handle to the extraction worker.
pub struct ScrapeHandle {
    tx: mpsc::Sender<ScrapeRequest>,
    timeout: Duration,
}

/// Starts the extraction worker and returns a handle to it.
///
/// The worker parses and extracts synchronously per request; the document
/// tree never crosses an await point.
pub fn spawn_scraper() -> ScrapeHandle {
    let (tx, mut rx) = mpsc::channel::<ScrapeRequest>(1);

    tokio::spawn(async move {
        let extractor = ProfileExtractor::new();
        while let Some(request) = rx.recv().await {
            tracing::debug!("Scrape request for {}", request.page.url);
            let record = extractor.extract_html(&request.page.html, &request.page.url);
            // A dropped caller is not the worker's problem
            let _ = request.reply.send(ScrapeResponse { data: Some(record) });
        }
        tracing::debug!("Scrape worker shutting down");
    });

    ScrapeHandle {
        tx,
        timeout: SCRAPE_TIMEOUT,
    }
}

impl ScrapeHandle {
    /// Sends one scrape request and awaits the record.
    pub async fn scrape(&self, page: PageDocument) -> Result<ProfileRecord, ScrapeError> {
        let (reply, response_rx) = oneshot::channel();

        self.tx
            .send(ScrapeRequest { page, reply })
            .await
            .map_err(|_| ScrapeError::NoResponder)?;

        let response = timeout(self.timeout, response_rx)
            .await
            .map_err(|_| ScrapeError::Timeout)?
            .map_err(|_| ScrapeError::NoResponder)?;

        response.data.ok_or(ScrapeError::Failed)
    }
}
