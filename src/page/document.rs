// src/page/document.rs
// =============================================================================
// A fetched page: pattern matching and link extraction.
//
// We use the `scraper` crate to find <a href> elements and the `url` crate to
// resolve relative links against the page they were found on.
//
// The search word is a regular expression, not a literal string. Callers who
// want to search for "a.b" literally must escape it themselves ("a\.b").
//
// Note: scraper's Html type can't be sent between threads, so we parse the
// body inside extract_links and drop the tree before returning. Page itself
// only holds the body text and is safe to use from async tasks.
// =============================================================================

use crate::error::{CrawlError, Result};
use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// How the search pattern is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Case-insensitive matching
    pub ignore_case: bool,
    /// `^` and `$` match at line boundaries, not only at the ends of the body
    pub multiline: bool,
}

impl MatchOptions {
    /// Builds a Unicode-aware regex for `pattern` with these options.
    pub fn compile(&self, pattern: &str) -> Result<Regex> {
        RegexBuilder::new(pattern)
            .unicode(true)
            .case_insensitive(self.ignore_case)
            .multi_line(self.multiline)
            .build()
            .map_err(CrawlError::from)
    }
}

/// The body of one fetched page.
#[derive(Debug, Clone)]
pub struct Page {
    body: String,
}

impl Page {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns true if `pattern` occurs anywhere in the body.
    pub fn matches(&self, pattern: &str, options: MatchOptions) -> Result<bool> {
        let regex = options.compile(pattern)?;
        Ok(self.is_match(&regex))
    }

    /// Same as `matches`, with a pattern compiled once by the caller.
    pub fn is_match(&self, regex: &Regex) -> bool {
        regex.is_match(&self.body)
    }

    /// Collects every anchor target in document order, without duplicates.
    ///
    /// With a `base`, targets are resolved to absolute URLs and their
    /// `#fragment` is dropped, so `/a#x` and `/a#y` become one entry. Without
    /// one, the raw `href` values are returned as written.
    pub fn extract_links(&self, base: Option<&str>) -> Vec<String> {
        let base = match base.map(Url::parse) {
            Some(Ok(url)) => Some(url),
            Some(Err(e)) => {
                debug!(error = %e, "base URL is not absolute, no links extracted");
                return Vec::new();
            }
            None => None,
        };

        let document = Html::parse_document(&self.body);
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&ANCHOR) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let link = match &base {
                Some(base) => match resolve_link(base, href) {
                    Ok(link) => link,
                    Err(e) => {
                        debug!(error = %e, "skipping link");
                        continue;
                    }
                },
                None => href.to_string(),
            };

            if seen.insert(link.clone()) {
                links.push(link);
            }
        }

        links
    }
}

// Resolves `href` against `base` and clears the fragment
//
// Examples (base = "https://example.com/docs/page"):
//   "/a#x"              -> "https://example.com/a"
//   "other"             -> "https://example.com/docs/other"
//   "https://x.org/?q"  -> "https://x.org/?q"
//   "javascript:void(0)" is kept; the crawler refuses to dispatch it
fn resolve_link(base: &Url, href: &str) -> Result<String> {
    let mut url = base.join(href).map_err(|source| CrawlError::MalformedUrl {
        href: href.to_string(),
        base: base.to_string(),
        source,
    })?;
    url.set_fragment(None);
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_plain_word() {
        let page = Page::new("<p>μ's live</p>");
        assert!(page.matches("μ's", MatchOptions::default()).unwrap());
        assert!(!page.matches("Printemps", MatchOptions::default()).unwrap());
    }

    #[test]
    fn test_ignore_case_is_opt_in() {
        let page = Page::new("<p>Printemps</p>");
        assert!(!page.matches("printemps", MatchOptions::default()).unwrap());

        let options = MatchOptions {
            ignore_case: true,
            ..Default::default()
        };
        assert!(page.matches("printemps", options).unwrap());
    }

    #[test]
    fn test_multiline_anchors() {
        let page = Page::new("first line\nsecond line");
        assert!(!page.matches("^second", MatchOptions::default()).unwrap());

        let options = MatchOptions {
            multiline: true,
            ..Default::default()
        };
        assert!(page.matches("^second", options).unwrap());
    }

    #[test]
    fn test_pattern_is_a_regex() {
        let page = Page::new("version 1x2");
        assert!(page.matches(r"1.2", MatchOptions::default()).unwrap());
        assert!(!page.matches(r"1\.2", MatchOptions::default()).unwrap());
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let page = Page::new("anything");
        let result = page.matches("(unclosed", MatchOptions::default());
        assert!(matches!(result, Err(CrawlError::Pattern(_))));
    }

    #[test]
    fn test_raw_links_without_base() {
        let page = Page::new(
            r#"<a href="./muse.html">muse</a>
               <a href="./aqours.html">aqours</a>
               <a href="./muse.html">again</a>"#,
        );
        assert_eq!(page.extract_links(None), vec!["./muse.html", "./aqours.html"]);
    }

    #[test]
    fn test_no_links() {
        let page = Page::new("<html><body><p>nothing here</p><a>no href</a></body></html>");
        assert!(page.extract_links(None).is_empty());
        assert!(page.extract_links(Some("https://example.com/")).is_empty());
    }

    #[test]
    fn test_fragments_collapse_with_base() {
        let page = Page::new(r#"<a href="/a#x">x</a><a href="/a#y">y</a><a href="/b">b</a>"#);
        assert_eq!(
            page.extract_links(Some("https://example.com/index.html")),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_query_strings_stay_distinct() {
        let page = Page::new(r#"<a href="/a?x=1">1</a><a href="/a?x=2">2</a>"#);
        assert_eq!(
            page.extract_links(Some("https://example.com/")),
            vec!["https://example.com/a?x=1", "https://example.com/a?x=2"]
        );
    }

    #[test]
    fn test_relative_and_absolute_links_resolve() {
        let page = Page::new(
            r#"<a href="other.html">o</a>
               <a href="../up.html">u</a>
               <a href="https://www.rust-lang.org">r</a>"#,
        );
        assert_eq!(
            page.extract_links(Some("https://example.com/docs/page.html")),
            vec![
                "https://example.com/docs/other.html",
                "https://example.com/up.html",
                "https://www.rust-lang.org/",
            ]
        );
    }

    #[test]
    fn test_malformed_link_is_skipped_individually() {
        let page = Page::new(r#"<a href="http://[bad">bad</a><a href="/good">good</a>"#);
        assert_eq!(
            page.extract_links(Some("https://example.com/")),
            vec!["https://example.com/good"]
        );
    }

    #[test]
    fn test_invalid_base_yields_nothing() {
        let page = Page::new(r#"<a href="/good">good</a>"#);
        assert!(page.extract_links(Some("not a url")).is_empty());
    }
}
