// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Example:
//   sitemapper --url https://example.com --workers 8 --format text -v
// =============================================================================

use clap::{ArgAction, Parser, ValueEnum};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "sitemapper",
    version,
    about = "Crawl a website and print a sitemap of its pages and assets",
    long_about = "sitemapper follows every same-site link from a starting URL and prints \
                  the pages it found as a tree, with the images, scripts and other files \
                  each page references. Press Ctrl-C to stop early and print what was found."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    #[arg(long)]
    pub url: String,

    /// Number of pages fetched concurrently (default: twice the CPU count)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// How to print the sitemap
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON: {"hosts": {host: page}}
    Json,
    /// Indented tree, one line per page or asset
    Text,
}

impl Cli {
    // The worker count to use, falling back to twice the available parallelism
    pub fn workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get() * 2)
                .unwrap_or(2)
        })
    }

    // Log level selected by -v/-q; warnings only by default
    pub fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::ERROR,
            (false, 0) => Level::WARN,
            (false, 1) => Level::INFO,
            (false, _) => Level::DEBUG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sitemapper", "--url", "https://test"]).unwrap();
        assert_eq!(cli.url, "https://test");
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.log_level(), Level::WARN);
        assert!(cli.workers() >= 2);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "sitemapper", "--url", "https://test", "--workers", "0", "--timeout", "3",
            "--format", "text", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.workers(), 0);
        assert_eq!(cli.timeout, 3);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["sitemapper"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sitemapper", "--url", "https://test", "-q", "-v"]).is_err());
        let cli = Cli::try_parse_from(["sitemapper", "--url", "https://test", "-q"]).unwrap();
        assert_eq!(cli.log_level(), Level::ERROR);
    }
}
