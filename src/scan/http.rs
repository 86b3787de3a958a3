// src/scan/http.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// The crawler only needs one capability from the network: "GET this URL and
// give me the status and body". That capability is the Fetch trait, so the
// crawler can run against reqwest in production and against an in-memory
// site in tests.
//
// Rust concepts:
// - Traits: A shared interface (like an interface in Java/TypeScript)
// - async-trait: Allows async methods in trait objects (Arc<dyn Fetch>)
// - map_err: Converts one error type into another
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{Error, Result};

// A downloaded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Transport used by the crawler to download pages.
///
/// Any HTTP response counts as success, whatever its status; only transport
/// failures (and unreadable bodies) are errors.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &Url) -> Result<FetchedPage>;
}

// The production transport, backed by a reqwest Client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher whose requests give up after `timeout`
    //
    // Redirects are followed (reqwest's default policy, up to 10 hops)
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| Error::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();

        // text() decodes using the charset from Content-Type, lossy on bad bytes
        let body = response.text().await.map_err(|source| Error::Parse {
            url: url.to_string(),
            source,
        })?;

        Ok(FetchedPage { status, body })
    }
}
