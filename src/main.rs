// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only, stdout is reserved for the sitemap)
// 3. Crawl the site until it is exhausted or the user presses Ctrl-C
// 4. Print the sitemap, even a partial one
// 5. Exit with proper code (0 = complete, 130 = interrupted, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod crawl;    // src/crawl/ - frontier, workers and the orchestrator
mod error;    // src/error.rs - error types
mod output;   // src/output.rs - JSON and text rendering
mod scan;     // src/scan/ - fetching pages and extracting links
mod sitemap;  // src/sitemap/ - the page tree

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use crawl::{Crawler, TracingObserver};
use scan::HttpFetcher;

// Exit code for a run stopped by SIGINT, as shells report it
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    init_logging(&cli)?;

    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout))?;
    let crawler = Crawler::new(&cli.url, cli.workers(), Arc::new(fetcher))
        .context("could not initialise crawler")?
        .with_observer(Arc::new(TracingObserver));

    info!(url = %crawler.site(), workers = crawler.workers(), "crawling");

    let cancel = CancellationToken::new();
    tokio::spawn(catch_signal(cancel.clone()));

    let sitemap = crawler.crawl(cancel.clone()).await;
    info!(pages = sitemap.page_count(), hosts = sitemap.hosts.len(), "sitemap built");

    output::print_sitemap(&sitemap, cli.format)?;

    // An interrupted run still printed what it had, but isn't a clean exit
    if cancel.is_cancelled() {
        Ok(EXIT_INTERRUPTED)
    } else {
        Ok(0)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("could not install the log subscriber")
}

// Cancels the crawl on the first Ctrl-C
async fn catch_signal(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            warn!("interrupted, finishing with a partial sitemap");
            cancel.cancel();
        }
        Err(e) => warn!("could not listen for Ctrl-C: {e}"),
    }
}
