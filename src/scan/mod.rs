// src/scan/mod.rs
// =============================================================================
// This module turns one URL into the list of same-site links it contains.
//
// Submodules:
// - http: Downloads pages (the Fetch trait and its reqwest implementation)
// - html: Parses HTML and filters the links we want to follow
//
// A failure here only affects the URL being scanned. The caller reports it
// and moves on to the next URL.
// =============================================================================

mod html;
mod http;

use std::sync::Arc;

use url::Url;

use crate::crawl::CrawlObserver;
use crate::error::Result;

pub use http::{Fetch, HttpFetcher};

// Only test transports build pages by hand
#[cfg(test)]
pub use http::FetchedPage;

// Fetch + parse, bound to one crawl's site URL
pub struct Scanner {
    site: Url,
    fetcher: Arc<dyn Fetch>,
    observer: Arc<dyn CrawlObserver>,
}

impl Scanner {
    pub fn new(site: Url, fetcher: Arc<dyn Fetch>, observer: Arc<dyn CrawlObserver>) -> Self {
        Self {
            site,
            fetcher,
            observer,
        }
    }

    // Downloads `url` and returns the same-site links found in it
    pub async fn scan(&self, url: &Url) -> Result<Vec<Url>> {
        let page = self.fetcher.get(url).await?;
        self.observer.on_page_fetched(url, page.status);

        Ok(html::extract_links(&page.body, &self.site))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::NoopObserver;
    use crate::error::Error;
    use async_trait::async_trait;

    // Serves one fixed body for every URL
    struct FixedBody(&'static str);

    #[async_trait]
    impl Fetch for FixedBody {
        async fn get(&self, _url: &Url) -> Result<FetchedPage> {
            Ok(FetchedPage {
                status: 200,
                body: self.0.to_string(),
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl Fetch for Unreachable {
        async fn get(&self, url: &Url) -> Result<FetchedPage> {
            Err(Error::Transport {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    fn scanner(fetcher: Arc<dyn Fetch>) -> Scanner {
        Scanner::new(
            Url::parse("https://test").unwrap(),
            fetcher,
            Arc::new(NoopObserver),
        )
    }

    #[tokio::test]
    async fn test_scan_returns_same_site_links() {
        let html = r##"<a href="https://test/a">A</a><a href="https://other/b">B</a><a href="#frag">F</a>"##;
        let scanner = scanner(Arc::new(FixedBody(html)));

        let links = scanner
            .scan(&Url::parse("https://test/").unwrap())
            .await
            .unwrap();

        assert_eq!(links, vec![Url::parse("https://test/a").unwrap()]);
    }

    #[tokio::test]
    async fn test_relative_links_resolve_against_site_not_page() {
        let scanner = scanner(Arc::new(FixedBody(r#"<a href="next">Next</a>"#)));

        let links = scanner
            .scan(&Url::parse("https://test/deep/nested/page").unwrap())
            .await
            .unwrap();

        assert_eq!(links, vec![Url::parse("https://test/next").unwrap()]);
    }

    #[tokio::test]
    async fn test_fetch_error_is_returned() {
        let scanner = scanner(Arc::new(Unreachable));

        let result = scanner.scan(&Url::parse("https://test/").unwrap()).await;

        assert!(matches!(result, Err(Error::Transport { .. })));
    }
}
