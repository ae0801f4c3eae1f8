// src/crawl/result.rs
// =============================================================================
// The answer a crawl gives back.
//
// "Not found" is an ordinary result, not an error: the crawl ran fine, the
// pattern just isn't reachable from the seed (within the limits).
// =============================================================================

use serde::Serialize;

/// How a crawl ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CrawlResult {
    /// A page matched. `path` runs from the seed to `matched_url` and has
    /// exactly `step` entries.
    Found {
        matched_url: String,
        step: u32,
        path: Vec<String>,
    },
    NotFound,
}

impl CrawlResult {
    pub fn is_found(&self) -> bool {
        matches!(self, CrawlResult::Found { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let found = CrawlResult::Found {
            matched_url: "https://example.com/c".to_string(),
            step: 2,
            path: vec![
                "https://example.com/".to_string(),
                "https://example.com/c".to_string(),
            ],
        };
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["step"], 2);
        assert_eq!(json["path"][1], "https://example.com/c");

        let json = serde_json::to_value(CrawlResult::NotFound).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "not_found" }));
    }
}
