// src/crawl/observer.rs
// =============================================================================
// Crawl event reporting.
//
// The engine never prints anything itself. Everything worth reporting
// (fetched pages, failures, the end of a run) goes to a CrawlObserver, so
// the caller decides where it ends up: tracing logs in the CLI, a
// recording list in tests, or nowhere at all.
// =============================================================================

use tracing::{debug, info, warn};
use url::Url;

use crate::error::Error;

/// How a crawl run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Every discovered page was processed
    Drained,
    /// The cancellation token fired first; the sitemap is partial
    Cancelled,
}

/// Counters reported when a crawl run ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// URLs accepted by the frontier, including the seed
    pub urls_accepted: usize,
    /// Pages fetched and parsed successfully
    pub pages_scanned: usize,
    /// Pages that failed to fetch or parse
    pub errors: usize,
}

/// Receives events from a running crawl.
///
/// Every method has an empty default, so implementors only override what
/// they care about. Methods are called from worker tasks concurrently.
pub trait CrawlObserver: Send + Sync {
    /// A response arrived for `url` and is about to be parsed
    fn on_page_fetched(&self, _url: &Url, _status: u16) {}

    /// `url` was parsed and yielded these same-site links
    fn on_page_scanned(&self, _url: &Url, _links: &[Url]) {}

    /// `url` could not be fetched or parsed; it is dropped, not retried
    fn on_scan_error(&self, _url: &Url, _error: &Error) {}

    /// The run reached a terminal state
    fn on_crawl_finished(&self, _outcome: CrawlOutcome, _summary: &CrawlSummary) {}
}

// Discards every event
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {}

// Forwards crawl events to the `tracing` subscriber
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_page_fetched(&self, url: &Url, status: u16) {
        if (200..300).contains(&status) {
            debug!(%url, status, "fetched");
        } else {
            debug!(%url, status, "fetched non-success status, parsing anyway");
        }
    }

    fn on_page_scanned(&self, url: &Url, links: &[Url]) {
        info!(%url, links = links.len(), "scanning");
    }

    fn on_scan_error(&self, url: &Url, error: &Error) {
        // Include the underlying reqwest error, Display alone hides it
        let cause = std::error::Error::source(error)
            .map(|source| format!(": {source}"))
            .unwrap_or_default();
        warn!(%url, "could not scan url: {error}{cause}");
    }

    fn on_crawl_finished(&self, outcome: CrawlOutcome, summary: &CrawlSummary) {
        match outcome {
            CrawlOutcome::Drained => info!(
                accepted = summary.urls_accepted,
                scanned = summary.pages_scanned,
                errors = summary.errors,
                "crawl finished"
            ),
            CrawlOutcome::Cancelled => warn!(
                accepted = summary.urls_accepted,
                scanned = summary.pages_scanned,
                errors = summary.errors,
                "crawl cancelled, sitemap is partial"
            ),
        }
    }
}
