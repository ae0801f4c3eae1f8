// src/crawl/mod.rs
// =============================================================================
// This module runs the search itself.
//
// Features:
// - Breadth-first crawling starting from a seed URL, so the first match is
//   on a shortest path (with one connection)
// - Optional domain allowlist and depth limit
// - Several pages in flight at once, if asked for
// - Polite crawling with a wait after each page
//
// Submodules:
// - config: CrawlConfig and DepthPolicy
// - frontier: the FIFO queue of VisitRecords
// - result: CrawlResult, what a search returns
// - search: the Crawler that ties it all together
// =============================================================================

mod config;
mod frontier;
mod result;
mod search;

pub use config::{CrawlConfig, DepthPolicy};
pub use frontier::{Frontier, VisitRecord};
pub use result::CrawlResult;
pub use search::Crawler;
