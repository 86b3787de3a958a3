// src/crawl/crawler.rs
// =============================================================================
// The crawl orchestrator.
//
// How a run goes:
// 1. The seed URL is added to an empty frontier
// 2. N workers start; each one loops:
//      claim a URL -> fetch + parse -> fold into the sitemap
//      -> queue the new links -> mark the URL complete
// 3. The run ends when either
//      - the frontier drains (nothing pending, nothing in flight), or
//      - the cancellation token fires
// 4. The frontier is closed, every worker is joined, and the sitemap built
//    so far is returned. A cancelled run returns a partial sitemap, not an
//    error.
//
// Rust concepts:
// - tokio::spawn: Runs each worker as an independent task
// - tokio::select!: Waits on several futures, acting on whichever is first
// - Arc: Shares the frontier and sitemap between all workers
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use super::observer::{CrawlObserver, CrawlOutcome, CrawlSummary, NoopObserver};
use super::queue::Frontier;
use super::task::CrawlTask;
use crate::error::{Error, Result};
use crate::scan::{Fetch, Scanner};
use crate::sitemap::{Aggregator, Sitemap};

pub struct Crawler {
    site: Url,
    workers: usize,
    fetcher: Arc<dyn Fetch>,
    observer: Arc<dyn CrawlObserver>,
}

impl Crawler {
    // Creates a crawler for one site
    //
    // Parameters:
    //   seed: the URL to start from; also defines which hosts are "same-site"
    //   workers: how many pages may be processed at once (0 becomes 1)
    //   fetcher: the HTTP transport
    //
    // Returns: Error::InvalidUrl if the seed can't be parsed
    pub fn new(seed: &str, workers: usize, fetcher: Arc<dyn Fetch>) -> Result<Self> {
        let site = Url::parse(seed).map_err(|source| Error::InvalidUrl {
            url: seed.to_string(),
            source,
        })?;

        Ok(Self {
            site,
            workers: workers.max(1),
            fetcher,
            observer: Arc::new(NoopObserver),
        })
    }

    // Sends crawl events to `observer` instead of discarding them
    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn site(&self) -> &Url {
        &self.site
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    // Crawls the site and returns its sitemap
    //
    // Never fails: pages that can't be fetched are reported to the observer
    // and left out. Cancelling `cancel` stops the crawl early; the result
    // then holds whatever was folded in before that.
    pub async fn crawl(&self, cancel: CancellationToken) -> Sitemap {
        let frontier = Arc::new(Frontier::new());
        let aggregator = Arc::new(Aggregator::new());
        let counters = Arc::new(Counters::default());
        let scanner = Arc::new(Scanner::new(
            self.site.clone(),
            self.fetcher.clone(),
            self.observer.clone(),
        ));

        frontier.add(self.site.clone());

        let handles: Vec<_> = (0..self.workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    frontier: frontier.clone(),
                    aggregator: aggregator.clone(),
                    scanner: scanner.clone(),
                    observer: self.observer.clone(),
                    counters: counters.clone(),
                    cancel: cancel.clone(),
                };
                tokio::spawn(worker.run())
            })
            .collect();

        debug!(site = %self.site, workers = self.workers, "crawl started");

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => CrawlOutcome::Cancelled,
            _ = frontier.await_drained() => CrawlOutcome::Drained,
        };

        // Wakes every worker still waiting for a URL
        frontier.close();

        for result in join_all(handles).await {
            if let Err(e) = result {
                warn!("crawl worker stopped abnormally: {e}");
            }
        }

        let summary = CrawlSummary {
            urls_accepted: frontier.snapshot().len(),
            pages_scanned: counters.pages_scanned.load(Ordering::Relaxed),
            errors: counters.errors.load(Ordering::Relaxed),
        };
        debug!(outstanding = frontier.outstanding(), "workers joined");
        self.observer.on_crawl_finished(outcome, &summary);

        // Every worker has been joined, so normally nobody else holds it
        match Arc::try_unwrap(aggregator) {
            Ok(aggregator) => aggregator.into_sitemap(),
            Err(shared) => shared.snapshot(),
        }
    }
}

#[derive(Default)]
struct Counters {
    pages_scanned: AtomicUsize,
    errors: AtomicUsize,
}

// Everything one worker task needs
struct Worker {
    id: usize,
    frontier: Arc<Frontier>,
    aggregator: Arc<Aggregator>,
    scanner: Arc<Scanner>,
    observer: Arc<dyn CrawlObserver>,
    counters: Arc<Counters>,
    cancel: CancellationToken,
}

impl Worker {
    async fn run(self) {
        loop {
            let url = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                next = self.frontier.next() => match next {
                    Some(url) => url,
                    None => break,
                },
            };

            // Completes the URL when dropped, whichever way this iteration ends
            let task = CrawlTask::claim(&self.frontier, url);

            let scanned = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                scanned = self.scanner.scan(task.url()) => scanned,
            };

            match scanned {
                Ok(links) => {
                    self.counters.pages_scanned.fetch_add(1, Ordering::Relaxed);
                    self.observer.on_page_scanned(task.url(), &links);
                    self.aggregator.add(task.url(), &links);

                    // Everything is queued: "/about.html" may still link to pages.
                    // A fetched asset folds into nothing, see Sitemap::add.
                    if !self.frontier.add_bulk(links) {
                        debug!(url = %task.url(), "no new pages discovered");
                    }
                }
                Err(error) => {
                    self.counters.errors.fetch_add(1, Ordering::Relaxed);
                    self.observer.on_scan_error(task.url(), &error);
                }
            }

            // Only now, after its links were queued
            drop(task);
        }

        debug!(worker = self.id, "worker stopped");
    }
}
