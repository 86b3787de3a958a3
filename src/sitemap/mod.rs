// src/sitemap/mod.rs
// =============================================================================
// This module folds crawled pages into a tree, one tree per host.
//
// For every scanned page we get (page URL, links found on it):
// - The page URL is split into path segments and walked down the host's tree
//   ("https://test/a/b" -> test -> /a -> /b), creating pages as needed
// - Links that point at assets are recorded on that page
// - Links to other pages are not recorded here; they get crawled and
//   show up in the tree when their own scan is folded in
//
// An "asset" is anything whose last path segment has a file extension.
// There is no MIME sniffing: "/report.pdf" is an asset, "/report" is a page.
//
// Aggregator wraps the Sitemap in a Mutex so every worker can fold results
// into the same tree.
// =============================================================================

mod page;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use url::Url;

pub use page::Page;

// The whole crawl result: host name -> root page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sitemap {
    pub hosts: BTreeMap<String, Page>,
}

impl Sitemap {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    // Folds one scanned page and its links into the tree
    //
    // Parameters:
    //   page_url: the page that was scanned
    //   links: every link found on it; only assets are kept
    //
    // Asset URLs are never pages, so adding one is a no-op.
    pub fn add(&mut self, page_url: &Url, links: &[Url]) {
        if is_asset(page_url) {
            return;
        }

        let Some(host) = page_url.host_str() else {
            return;
        };

        let segments = page_url.path().split('/').filter(|s| !s.is_empty());
        let page = self
            .hosts
            .entry(host.to_string())
            .or_default()
            .descend(segments);

        for link in links.iter().filter(|link| is_asset(link)) {
            page.assets.insert(link.to_string());
        }
    }

    // Total number of pages across every host, roots included
    pub fn page_count(&self) -> usize {
        self.hosts.values().map(Page::page_count).sum()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

// Checks whether a URL points at a file rather than a page
//
// Same rule as a file extension check: the last path segment contains a dot.
//   "/img/logo.png" -> true
//   "/blog/"        -> false (last segment is empty)
//   "/v1.2/docs"    -> false (the dot is in an earlier segment)
pub fn is_asset(url: &Url) -> bool {
    url.path()
        .rsplit('/')
        .next()
        .is_some_and(|last| last.contains('.'))
}

// A Sitemap shared by every crawl worker
#[derive(Debug, Default)]
pub struct Aggregator {
    sitemap: Mutex<Sitemap>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    // Same as Sitemap::add; concurrent callers are serialized
    pub fn add(&self, page_url: &Url, links: &[Url]) {
        self.lock().add(page_url, links);
    }

    // A copy of the tree as it is right now
    pub fn snapshot(&self) -> Sitemap {
        self.lock().clone()
    }

    pub fn into_sitemap(self) -> Sitemap {
        self.sitemap
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Sitemap> {
        self.sitemap.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
