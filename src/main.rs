//! # News Scraper
//!
//! Fetches a configured news site's homepage, follows its article links and
//! exports the articles it finds to a dated CSV file.
//!
//! ## Usage
//!
//! ```sh
//! news_scraper eluniversal
//! # -> ./eluniversal_2025_05_06_articles.csv
//! ```
//!
//! ## Pipeline
//!
//! 1. **Configuration**: load `config.yaml` and check the requested site
//! 2. **Indexing**: fetch the homepage and collect candidate links
//! 3. **Fetching**: resolve and fetch each link in order, skipping failures
//! 4. **Output**: write the collected records to
//!    `{site}_{YYYY_MM_DD}_{articles|ud_programs}.csv`

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod fetch;
mod links;
mod models;
mod outputs;
mod pages;
mod scrapers;
mod utils;

use cli::Cli;
use config::{NewsConfig, SiteKind};
use fetch::HttpFetcher;
use scrapers::articles::ArticleScraper;
use scrapers::programs::ProgramScraper;
use scrapers::{FetchLimit, fetch_homepage, scrape_site};
use utils::{ensure_writable_dir, run_date};

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let config = match NewsConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load site configuration");
            return Err(e.into());
        }
    };
    args.validate_site(&config.site_ids());

    let site_id = args.news_site.as_str();
    let site = &config.news_sites[site_id];
    let queries = site.queries(site_id)?;
    info!(site = site_id, host = %site.url, kind = ?site.kind, "Selected site");

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Index ----
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let homepage = match fetch_homepage(&fetcher, &site.url, &queries).await {
        Ok(homepage) => homepage,
        Err(e) => {
            error!(host = %site.url, error = %e, "Failed to fetch homepage");
            return Err(e.into());
        }
    };

    // ---- Fetch & export ----
    let date = run_date();
    let written = match site.kind {
        SiteKind::Articles => {
            let limit = if args.all {
                FetchLimit::All
            } else {
                FetchLimit::First
            };
            let scraper = ArticleScraper::new(&fetcher, &queries, limit);
            scrape_site(&scraper, &site.url, &homepage, site_id, &args.output_dir, date).await?
        }
        SiteKind::Programs => {
            let scraper = ProgramScraper::new(&fetcher, &queries);
            scrape_site(&scraper, &site.url, &homepage, site_id, &args.output_dir, date).await?
        }
    };

    match written {
        Some(path) => info!(path = %path.display(), "Export complete"),
        None => info!(site = site_id, "No valid records found; no file written"),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
