// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - A fixed pool of concurrent workers sharing one frontier
// - Same-site restriction (subdomains included, other hosts ignored)
// - Every page is visited at most once
// - Cooperative cancellation with a partial result instead of an error
//
// Submodules:
// - queue: The frontier (dedup, pending URLs, outstanding-work counter)
// - task: Guard that marks a claimed URL complete on every exit path
// - observer: Where crawl events are reported
// - crawler: The orchestrator tying it all together
// =============================================================================

mod crawler;
mod observer;
mod queue;
mod task;

pub use crawler::Crawler;
pub use observer::{CrawlObserver, TracingObserver};

#[cfg(test)]
pub use observer::NoopObserver;
