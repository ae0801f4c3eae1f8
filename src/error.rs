// src/error.rs
// =============================================================================
// Error types for the crawl.
//
// Only two kinds of error ever reach the caller of a search:
// - Config: the crawl was set up wrong (bad seed, zero connections, ...)
// - Pattern: the search word is not a valid regular expression
//
// Transport, HttpStatus and MalformedUrl errors are produced per page or per
// link. The crawler logs them and moves on; they never abort a crawl.
// =============================================================================

use std::fmt;
use thiserror::Error;

/// Everything that can go wrong while crawling.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The request never produced a usable response.
    #[error("failed to fetch {url}: {failure}")]
    Transport {
        url: String,
        failure: TransportFailure,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} answered HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// A link on a page could not be resolved against the page URL.
    #[error("cannot resolve link '{href}' against {base}: {source}")]
    MalformedUrl {
        href: String,
        base: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl CrawlError {
    /// HTTP status code carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CrawlError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the failure happened below HTTP (DNS, connect, timeout, ...).
    pub fn is_transport(&self) -> bool {
        matches!(self, CrawlError::Transport { .. })
    }
}

/// Why a request failed before a status code was available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    Timeout,
    Connect(String),
    TooManyRedirects,
    Body(String),
    Other(String),
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Timeout => write!(f, "request timed out"),
            TransportFailure::Connect(detail) => write!(f, "connection failed: {}", detail),
            TransportFailure::TooManyRedirects => write!(f, "too many redirects"),
            TransportFailure::Body(detail) => write!(f, "could not read body: {}", detail),
            TransportFailure::Other(detail) => write!(f, "{}", detail),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
