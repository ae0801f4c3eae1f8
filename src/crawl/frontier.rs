// src/crawl/frontier.rs
// =============================================================================
// The queue of pages waiting to be visited.
//
// Breadth-first search needs a first-in-first-out queue: every page one hop
// from the seed is queued before any page two hops away, so the first match
// we find (with one connection) is on a shortest path.
//
// Each record carries the full path from the seed. Children get their own
// copy of the path, so two branches never share (or mutate) the same Vec.
//
// The Frontier is not thread-safe on its own. The crawler keeps it behind
// its state lock.
// =============================================================================

use std::collections::VecDeque;

/// One page waiting to be visited, and how we got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRecord {
    pub url: String,
    /// Hops from the seed; the seed itself is step 1
    pub step: u32,
    /// Every URL from the seed to `url`, both included
    pub path: Vec<String>,
}

impl VisitRecord {
    pub fn seed(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            path: vec![url.clone()],
            url,
            step: 1,
        }
    }

    /// The record for a link found on this record's page.
    pub fn child(&self, link: impl Into<String>) -> Self {
        let link = link.into();
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().cloned());
        path.push(link.clone());

        Self {
            url: link,
            step: self.step + 1,
            path,
        }
    }
}

/// FIFO queue of visit records.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<VisitRecord>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, record: VisitRecord) {
        self.queue.push_back(record);
    }

    pub fn dequeue(&mut self) -> Option<VisitRecord> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops everything still queued.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
