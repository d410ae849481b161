//! Scrapers: turn a site's homepage into a list of exportable records.
//!
//! Every scraper follows the same two-phase pattern:
//!
//! 1. **Indexing**: fetch the homepage and collect its candidate links
//!    ([`fetch_homepage`])
//! 2. **Fetching**: resolve, fetch, parse and validate each link in order
//!    ([`collect`]), keeping only the successes
//!
//! # Variants
//!
//! - `kind: articles` uses [`articles::ArticleScraper`]: follows
//!   `homepage_article_links` and stops at the first valid
//!   [`Article`](crate::models::Article) unless `--all` is given
//! - `kind: programs` uses [`programs::ProgramScraper`]: follows
//!   `homepage_program_links` and keeps every
//!   [`Program`](crate::models::Program) it can fetch
//!
//! Per-link failures are always local: they are logged, reported as
//! [`FetchOutcome::Skipped`] and the loop moves on.

use crate::config::Queries;
use crate::fetch::{FetchError, PageFetcher};
use crate::links::{LinkForm, resolve};
use crate::outputs::csv::{Exportable, write_records};
use crate::pages::HomePage;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::error::Error;
use std::future::{Future, ready};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

pub mod articles;
pub mod programs;

/// Why a link produced no record.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    /// The page could not be fetched.
    #[error("network failure: {0}")]
    Network(#[source] FetchError),
    /// The page was fetched and parsed but has no body.
    #[error("page has no body")]
    EmptyBody,
}

/// Result of processing a single link.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Fetched(T),
    Skipped(SkipReason),
}

impl<T> FetchOutcome<T> {
    pub fn fetched(self) -> Option<T> {
        match self {
            FetchOutcome::Fetched(record) => Some(record),
            FetchOutcome::Skipped(_) => None,
        }
    }
}

/// How many valid records the fetch loop collects before it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchLimit {
    /// Stop at the first valid record.
    First,
    /// Process every link.
    All,
}

impl FetchLimit {
    fn max(self) -> usize {
        match self {
            FetchLimit::First => 1,
            FetchLimit::All => usize::MAX,
        }
    }
}

/// A site scraper producing one kind of record.
pub trait Scraper {
    type Record: Exportable;

    /// Process the homepage's candidate links in order and return the valid
    /// records.
    async fn scrape(&self, host: &str, homepage: &HomePage) -> Vec<Self::Record>;
}

/// Fetch and parse a site's homepage.
///
/// Unlike article fetches, a homepage failure ends the run: there is
/// nothing to scrape without it.
///
/// # Arguments
///
/// * `fetcher` - Transport used for the request
/// * `host` - The site's host URL, fetched as-is
/// * `queries` - The site's compiled selectors
///
/// # Returns
///
/// The [`HomePage`] with its article and program links.
///
/// # Errors
///
/// Returns the [`FetchError`] if the homepage cannot be fetched or answers
/// with a non-success status.
#[instrument(level = "info", skip(fetcher, queries))]
pub async fn fetch_homepage<F: PageFetcher>(
    fetcher: &F,
    host: &str,
    queries: &Queries,
) -> Result<HomePage, FetchError> {
    info!("Beginning scraper");
    let html = fetcher.fetch(host).await?;
    let homepage = HomePage::parse(&html, queries);
    info!(
        article_links = homepage.article_links.len(),
        program_links = homepage.program_links.len(),
        "Indexed homepage"
    );
    debug!(links = ?homepage.article_links, "Article links");
    Ok(homepage)
}

/// Resolve `link` against `host` and fetch it.
///
/// Returns the absolute URL with the page body, or the network failure
/// that prevented it (already logged).
pub(crate) async fn fetch_link<F: PageFetcher>(
    fetcher: &F,
    host: &str,
    link: &str,
) -> Result<(String, String), SkipReason> {
    let url = resolve(host, link);
    info!(%link, %url, form = ?LinkForm::of(link), "Start fetching");
    match fetcher.fetch(&url).await {
        Ok(html) => Ok((url, html)),
        Err(e) => {
            warn!(%url, error = %e, "Error while fetching the page");
            Err(SkipReason::Network(e))
        }
    }
}

/// Drive `step` over `links` one at a time, in order, keeping the fetched
/// records.
///
/// Stops pulling links as soon as `limit` records have been collected, so
/// links after that point are never fetched. Returns an empty vector when
/// nothing succeeded.
pub async fn collect<'a, T, F, Fut>(links: &'a [String], limit: FetchLimit, mut step: F) -> Vec<T>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = FetchOutcome<T>>,
{
    let records: Vec<T> = stream::iter(links)
        .then(|link| step(link.as_str()))
        .filter_map(|outcome| {
            if let FetchOutcome::Skipped(reason) = &outcome {
                debug!(%reason, "Link skipped");
            }
            ready(outcome.fetched())
        })
        .take(limit.max())
        .collect()
        .await;

    info!(
        candidates = links.len(),
        collected = records.len(),
        ?limit,
        "Fetch loop finished"
    );
    records
}

/// Run `scraper` over an already fetched homepage and export what it found.
///
/// Returns the CSV path, or `None` when no record was valid.
///
/// # Errors
///
/// Only export failures surface here; per-link failures are skipped.
#[instrument(level = "info", skip(scraper, homepage, output_dir))]
pub async fn scrape_site<S: Scraper>(
    scraper: &S,
    host: &str,
    homepage: &HomePage,
    site_id: &str,
    output_dir: &Path,
    date: NaiveDate,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let records = scraper.scrape(host, homepage).await;
    write_records(output_dir, site_id, date, &records).await
}
