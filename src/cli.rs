//! Command-line interface definitions.
//!
//! The only required argument is the site identifier. Its valid values come
//! from the configuration file, so it is checked after loading the
//! configuration with [`Cli::validate_site`], which reports failures through
//! clap the same way a bad `value_parser` value would.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Scrape the first valid article from a configured site
/// news_scraper eluniversal
///
/// # Every article, with a custom config, into ./out
/// news_scraper eluniversal --all -c sites.yaml -o ./out
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The news site that you want to scrape
    pub news_site: String,

    /// Path to the site configuration file
    #[arg(short, long, env = "NEWS_SCRAPER_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Directory the CSV file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Fetch every article link instead of stopping at the first valid article
    #[arg(long)]
    pub all: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Cli {
    /// Check `news_site` against the configured identifiers.
    pub fn check_site(&self, choices: &[&str]) -> Result<(), clap::Error> {
        if choices.contains(&self.news_site.as_str()) {
            return Ok(());
        }
        Err(Cli::command().error(
            ErrorKind::InvalidValue,
            format!(
                "invalid value '{}' for '<NEWS_SITE>'\n  [possible values: {}]",
                self.news_site,
                choices.join(", ")
            ),
        ))
    }

    /// Like [`Cli::check_site`], but prints the usage error and exits.
    pub fn validate_site(&self, choices: &[&str]) {
        if let Err(e) = self.check_site(choices) {
            e.exit();
        }
    }
}
