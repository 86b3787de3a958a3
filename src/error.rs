// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// Only one of these is ever fatal: InvalidUrl, raised when the seed URL can't
// be parsed. Everything else describes a single page that could not be
// scanned. Those errors are handed to the observer and the crawl moves on.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[source]: keeps the underlying error reachable for error chains
// =============================================================================

use thiserror::Error;

/// Errors produced while building or running a crawl.
#[derive(Debug, Error)]
pub enum Error {
    /// The seed URL could not be parsed
    #[error("invalid url '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be built (TLS backend initialisation)
    #[error("could not build http client")]
    Client(#[source] reqwest::Error),

    /// The GET request itself failed (DNS, connect, timeout, TLS...)
    #[error("could not get url {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but its body could not be read for parsing
    #[error("could not parse response body of {url}")]
    Parse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A failure reported by an in-memory test transport
    #[cfg(test)]
    #[error("could not get url {url}: {reason}")]
    Transport { url: String, reason: String },
}

// Shorthand used across the engine
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_message_names_the_input() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = Error::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert_eq!(err.to_string(), "invalid url 'not a url'");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_transport_message() {
        let err = Error::Transport {
            url: "https://test/".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not get url https://test/: connection refused"
        );
    }
}
