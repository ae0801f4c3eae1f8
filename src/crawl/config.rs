// src/crawl/config.rs
// =============================================================================
// Settings for one crawl.
//
// All numeric limits are unsigned, so "negative depth" can't even be written
// down. The one thing left to check is that at least one connection is
// allowed, which validate() does when the Crawler is created.
// =============================================================================

use crate::error::{CrawlError, Result};
use std::collections::HashSet;
use std::time::Duration;

/// What to do when a record is deeper than `max_depth`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepthPolicy {
    /// Skip that record only; shallower branches keep going.
    #[default]
    Prune,
    /// Stop the whole crawl and report "not found".
    Abort,
}

/// Crawl limits and behavior.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Deepest hop to visit, counting the seed as 1. 0 means unlimited.
    pub max_depth: u32,
    /// Pages fetched at the same time. 1 gives an exact shortest path.
    pub max_concurrency: usize,
    /// Pause after each page before its connection slot is released.
    pub wait: Duration,
    /// NFKC-normalize the pattern and every page before matching.
    pub normalize: bool,
    /// Hostnames the crawl may visit. Empty means any host.
    pub allowed_domains: HashSet<String>,
    pub depth_policy: DepthPolicy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 0,
            max_concurrency: 1,
            wait: Duration::ZERO,
            normalize: false,
            allowed_domains: HashSet::new(),
            depth_policy: DepthPolicy::default(),
        }
    }
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(CrawlError::Config(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// True if `step` is past the depth limit.
    pub fn too_deep(&self, step: u32) -> bool {
        self.max_depth > 0 && step > self.max_depth
    }

    /// True if `host` may be visited.
    pub fn allows_host(&self, host: Option<&str>) -> bool {
        if self.allowed_domains.is_empty() {
            return true;
        }
        host.is_some_and(|host| self.allowed_domains.contains(host))
    }
}
