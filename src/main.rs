// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so stdout stays clean for the result)
// 3. Run the search
// 4. Print the path (or JSON) and exit with the proper code
//    (0 = found, 100 = not found, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use link_seeker::{CrawlResult, Crawler};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const EXIT_FOUND: i32 = 0;
const EXIT_NOT_FOUND: i32 = 100;
const EXIT_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let fetcher = cli.fetcher().context("setting up the HTTP client")?;
    let crawler = Crawler::new(cli.url.clone(), cli.crawl_config(), Arc::new(fetcher))
        .context("invalid crawl settings")?;

    let result = crawler
        .search(&cli.word, cli.match_options())
        .await
        .with_context(|| format!("cannot search for '{}'", cli.word))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(if result.is_found() {
        EXIT_FOUND
    } else {
        EXIT_NOT_FOUND
    })
}

// Steps: 3
// Path:
//     1: https://example.com
//     2: https://example.com/b
//     3: https://example.com/c
fn print_result(result: &CrawlResult) {
    match result {
        CrawlResult::Found { step, path, .. } => {
            println!("Steps: {}", step);
            println!("Path:");
            for (index, url) in path.iter().enumerate() {
                println!("\t{}: {}", index + 1, url);
            }
        }
        CrawlResult::NotFound => eprintln!("Not found"),
    }
}
