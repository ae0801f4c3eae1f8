// src/lib.rs
// =============================================================================
// link-seeker: follow links breadth-first from a seed URL until a page
// matches a pattern, and report the path that got there.
//
// Modules:
// - crawl: the Crawler, its configuration and the frontier queue
// - fetch: the Fetcher trait and the reqwest-backed HttpFetcher
// - page: pattern matching, link extraction and Unicode normalization
// - error: CrawlError
//
// The binary (src/main.rs) is a thin clap front end over this library.
// =============================================================================

pub mod crawl;
pub mod error;
pub mod fetch;
pub mod page;

pub use crawl::{CrawlConfig, CrawlResult, Crawler, DepthPolicy};
pub use error::{CrawlError, TransportFailure};
pub use fetch::{Fetcher, HttpFetcher};
pub use page::{MatchOptions, Page};
