// src/crawl/search.rs
// =============================================================================
// The crawler: a breadth-first search for the first page matching a pattern.
//
// How it works:
// 1. Put the seed URL in the frontier (a FIFO queue)
// 2. Take records off the frontier while fewer than `max_concurrency` pages
//    are being fetched, and spawn one task per record
// 3. Each task checks the record (visited? allowed host? javascript:? too
//    deep?), fetches the page and tests the pattern
// 4. A match publishes the result and the crawl stops admitting work. A miss
//    queues every link on the page as a child record
// 5. When the frontier is empty and nothing is in flight, the answer is
//    "not found"
//
// Shared state (frontier, visited set, in-flight count, result) lives in one
// mutex. The lock is only held for short bookkeeping, never across an await,
// so the only work that really runs in parallel is fetching and parsing.
//
// Stopping is cooperative: tasks already fetching when the result is
// published keep running in the background, but they can't replace the
// result (first writer wins) and nobody drains what they enqueue.
//
// Rust concepts:
// - Arc: shared ownership between the control loop and every task
// - JoinSet: a set of spawned tasks we can wait on one at a time
// - Drop: the Slot guard gives the connection slot back on every exit path
// =============================================================================

use super::config::{CrawlConfig, DepthPolicy};
use super::frontier::{Frontier, VisitRecord};
use super::result::CrawlResult;
use crate::error::{CrawlError, Result};
use crate::fetch::Fetcher;
use crate::page::{self, MatchOptions, Page};
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

/// Searches a site breadth-first, starting from one seed URL.
///
/// A crawler runs exactly one search; `search` consumes it.
pub struct Crawler<F> {
    seed: String,
    config: CrawlConfig,
    fetcher: Arc<F>,
}

impl<F: Fetcher + 'static> Crawler<F> {
    /// Checks the configuration and the seed URL up front.
    pub fn new(seed: impl Into<String>, config: CrawlConfig, fetcher: Arc<F>) -> Result<Self> {
        let seed = seed.into();
        config.validate()?;
        Url::parse(&seed)
            .map_err(|e| CrawlError::Config(format!("seed '{}' is not an absolute URL: {}", seed, e)))?;

        Ok(Self {
            seed,
            config,
            fetcher,
        })
    }

    /// Crawls until a page matches `pattern` or there is nothing left to visit.
    ///
    /// Only an invalid pattern makes this fail. Pages that can't be fetched
    /// are skipped.
    pub async fn search(self, pattern: &str, options: MatchOptions) -> Result<CrawlResult> {
        let pattern = if self.config.normalize {
            page::normalize(pattern)
        } else {
            pattern.to_string()
        };
        let regex = options.compile(&pattern)?;

        info!(seed = %self.seed, pattern = %pattern, "starting search");

        let max_concurrency = self.config.max_concurrency;
        let shared = Arc::new(Shared {
            config: self.config,
            fetcher: self.fetcher,
            regex,
            state: Mutex::new(CrawlState::default()),
        });
        shared.state.lock().frontier.enqueue(VisitRecord::seed(self.seed));

        let mut tasks = JoinSet::new();
        loop {
            {
                let mut state = shared.state.lock();
                if state.outcome.is_none() && state.frontier.is_empty() && state.in_flight == 0 {
                    state.outcome = Some(CrawlResult::NotFound);
                }

                let outcome = state.outcome.clone();
                if let Some(outcome) = outcome {
                    drop(state);
                    if !tasks.is_empty() {
                        debug!(running = tasks.len(), "leaving in-flight pages to finish on their own");
                    }
                    tasks.detach_all();
                    return Ok(outcome);
                }

                while state.in_flight < max_concurrency {
                    let Some(record) = state.frontier.dequeue() else {
                        break;
                    };
                    state.in_flight += 1;
                    let slot = Slot {
                        shared: Arc::clone(&shared),
                    };
                    tasks.spawn(dispatch(slot, record));
                }
            }

            // Every finished task has already given its slot back
            if let Some(Err(e)) = tasks.join_next().await {
                warn!(error = %e, "page task did not complete");
            }
        }
    }
}

/// Everything the tasks of one crawl share.
struct Shared<F> {
    config: CrawlConfig,
    fetcher: Arc<F>,
    regex: Regex,
    state: Mutex<CrawlState>,
}

#[derive(Default)]
struct CrawlState {
    frontier: Frontier,
    visited: HashSet<String>,
    in_flight: usize,
    outcome: Option<CrawlResult>,
}

enum Admission {
    Proceed,
    Skip(&'static str),
    TooDeep,
}

impl<F> Shared<F> {
    // Runs the per-record checks and, if they pass, marks the URL visited.
    // Both happen under one lock, so two tasks can never fetch the same URL.
    fn admit(&self, record: &VisitRecord) -> Admission {
        let url = match Url::parse(&record.url) {
            Ok(url) => url,
            Err(_) => return Admission::Skip("not an absolute URL"),
        };

        let mut state = self.state.lock();
        if state.visited.contains(url.as_str()) {
            return Admission::Skip("already visited");
        }
        if !self.config.allows_host(url.host_str()) {
            return Admission::Skip("domain not allowed");
        }
        if url.scheme() == "javascript" {
            return Admission::Skip("javascript link");
        }
        if self.config.too_deep(record.step) {
            return Admission::TooDeep;
        }

        state.visited.insert(url.into());
        Admission::Proceed
    }

    /// Sets the crawl result unless one is already set.
    fn publish(&self, outcome: CrawlResult) -> bool {
        let mut state = self.state.lock();
        if state.outcome.is_some() {
            return false;
        }
        state.outcome = Some(outcome);
        state.frontier.clear();
        true
    }

    // Links already fetched are dropped here; admit() still catches the
    // ones that get visited while their record waits in the frontier.
    fn expand(&self, record: &VisitRecord, links: Vec<String>) {
        let mut state = self.state.lock();
        for link in links {
            if state.visited.contains(&link) {
                continue;
            }
            state.frontier.enqueue(record.child(link));
        }
    }

    fn release_slot(&self) {
        let mut state = self.state.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        if state.in_flight == 0 && state.frontier.is_empty() && state.outcome.is_none() {
            state.outcome = Some(CrawlResult::NotFound);
        }
    }
}

// One connection slot; returned when dropped
struct Slot<F> {
    shared: Arc<Shared<F>>,
}

impl<F> Drop for Slot<F> {
    fn drop(&mut self) {
        self.shared.release_slot();
    }
}

async fn dispatch<F: Fetcher>(slot: Slot<F>, record: VisitRecord) {
    let shared = &slot.shared;

    match shared.admit(&record) {
        Admission::Proceed => {}
        Admission::Skip(reason) => {
            debug!(url = %record.url, reason, "skipping");
            return;
        }
        Admission::TooDeep => {
            match shared.config.depth_policy {
                DepthPolicy::Abort => {
                    info!(url = %record.url, step = record.step, "max depth exceeded, aborting crawl");
                    shared.publish(CrawlResult::NotFound);
                }
                DepthPolicy::Prune => {
                    debug!(url = %record.url, step = record.step, "max depth exceeded, pruning");
                }
            }
            return;
        }
    }

    info!(step = record.step, url = %record.url, "crawling");

    let response = match shared.fetcher.fetch(&record.url).await {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "fetch failed");
            return;
        }
    };

    let body = if shared.config.normalize {
        page::normalize(&response.body)
    } else {
        response.body
    };
    let page = Page::new(body);

    if page.is_match(&shared.regex) {
        let found = CrawlResult::Found {
            matched_url: record.url.clone(),
            step: record.step,
            path: record.path,
        };
        if shared.publish(found) {
            info!(url = %record.url, step = record.step, "match found");
        } else {
            debug!(url = %record.url, "match found after the crawl finished, ignoring");
        }
        return;
    }

    let links = page.extract_links(Some(&record.url));
    debug!(url = %record.url, links = links.len(), "queueing links");
    shared.expand(&record, links);

    if !shared.config.wait.is_zero() {
        tokio::time::sleep(shared.config.wait).await;
    }
}
