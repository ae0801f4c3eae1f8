// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   link-seeker [OPTIONS] <URL> <WORD>
//
// Besides parsing, this is where the flags are turned into the library's
// settings: CrawlConfig (limits), MatchOptions (how WORD is matched) and an
// HttpFetcher (timeouts and headers).
// =============================================================================

use clap::{ArgAction, Parser, ValueEnum};
use link_seeker::{CrawlConfig, DepthPolicy, HttpFetcher, MatchOptions};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "link-seeker",
    version,
    about = "Follow links from a URL until a page matches a word, and print the shortest path",
    long_about = "link-seeker crawls breadth-first from URL, following every link, until it finds \
                  a page whose content matches WORD (a regular expression). It then prints how \
                  many steps it took and every page on the way."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    pub url: String,

    /// Word to search for; interpreted as a regular expression
    pub word: String,

    /// Ignore case when matching
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Let ^ and $ match at the start and end of every line
    #[arg(short = 'm', long)]
    pub multiline: bool,

    /// Normalize word and pages (NFKC, invisible characters removed) before matching
    #[arg(short = 'n', long)]
    pub normalize: bool,

    /// Milliseconds to wait after each page before fetching the next one
    #[arg(short = 'w', long, default_value_t = 0, value_name = "MS")]
    pub wait: u64,

    /// Maximum number of steps from URL, counting URL itself as 1 (0 = no limit)
    #[arg(short = 'd', long, default_value_t = 0)]
    pub depth: u32,

    /// What to do with pages past --depth
    #[arg(long, value_enum, default_value_t = DepthPolicyArg::Prune)]
    pub depth_policy: DepthPolicyArg,

    /// Only visit this host (repeat for more; exact match, subdomains are separate)
    #[arg(short = 'a', long = "allow-domain", value_name = "HOST")]
    pub allow_domains: Vec<String>,

    /// Pages fetched at the same time (1 guarantees the shortest path)
    #[arg(short = 'c', long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub connections: u64,

    /// Per-request timeout in seconds (default: wait forever)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Extra request header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// --depth-policy values
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthPolicyArg {
    /// Skip pages that are too deep, keep crawling the rest
    Prune,
    /// Give up the whole search at the first page that is too deep
    Abort,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.depth,
            max_concurrency: usize::try_from(self.connections).unwrap_or(usize::MAX),
            wait: Duration::from_millis(self.wait),
            normalize: self.normalize,
            // Url::host_str() is always lowercase
            allowed_domains: self
                .allow_domains
                .iter()
                .map(|host| host.to_ascii_lowercase())
                .collect(),
            depth_policy: match self.depth_policy {
                DepthPolicyArg::Prune => DepthPolicy::Prune,
                DepthPolicyArg::Abort => DepthPolicy::Abort,
            },
        }
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            ignore_case: self.ignore_case,
            multiline: self.multiline,
        }
    }

    pub fn fetcher(&self) -> link_seeker::error::Result<HttpFetcher> {
        let mut builder = HttpFetcher::builder().timeout(self.timeout.map(Duration::from_secs));
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        for (name, value) in &self.headers {
            builder = builder.header(name.clone(), value.clone());
        }
        builder.build()
    }

    /// Log filter used when RUST_LOG is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

// "Accept-Language: ja" -> ("Accept-Language", "ja")
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name missing in '{}'", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
