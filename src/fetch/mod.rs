// src/fetch/mod.rs
// =============================================================================
// This module downloads pages.
//
// The crawler never talks to reqwest directly. It only knows the Fetcher
// trait, so tests can hand it an in-memory site instead of a real network.
//
// Submodules:
// - http: the reqwest-backed Fetcher used by the CLI
//
// Rust concepts:
// - Traits: a shared interface (like an interface in Java/TypeScript)
// - async-trait: lets a trait have async methods and still be used with Arc
// =============================================================================

mod http;

use crate::error::Result;
use async_trait::async_trait;

pub use http::{HttpFetcher, HttpFetcherBuilder};

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Issues one GET per call.
///
/// Implementations must not retry. Non-2xx answers are reported as
/// `CrawlError::HttpStatus`, network failures as `CrawlError::Transport`.
/// No timeout is imposed by the crawler, so an implementation that never
/// returns holds a connection slot forever; `HttpFetcher` lets the caller
/// configure one.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Response>;
}
