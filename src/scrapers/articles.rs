//! News article scraper.
//!
//! Walks a homepage's article links, fetching each one until the first
//! article with a body is found. `FetchLimit::All` lifts that limit.

use super::{FetchLimit, FetchOutcome, Scraper, SkipReason, collect, fetch_link};
use crate::config::Queries;
use crate::fetch::PageFetcher;
use crate::models::Article;
use crate::pages::{ArticlePage, HomePage};
use crate::utils::truncate_for_log;
use tracing::{debug, info, instrument, warn};

/// Scraper for `kind: articles` sites.
pub struct ArticleScraper<'a, F> {
    fetcher: &'a F,
    queries: &'a Queries,
    limit: FetchLimit,
}

impl<'a, F: PageFetcher> ArticleScraper<'a, F> {
    pub fn new(fetcher: &'a F, queries: &'a Queries, limit: FetchLimit) -> Self {
        Self {
            fetcher,
            queries,
            limit,
        }
    }
}

impl<F: PageFetcher> Scraper for ArticleScraper<'_, F> {
    type Record = Article;

    #[instrument(level = "info", skip_all, fields(%host, limit = ?self.limit))]
    async fn scrape(&self, host: &str, homepage: &HomePage) -> Vec<Article> {
        let articles = collect(&homepage.article_links, self.limit, |link| {
            fetch_article(self.fetcher, self.queries, host, link)
        })
        .await;
        info!(count = articles.len(), "Fetched articles");
        articles
    }
}

/// Resolve, fetch, parse and validate a single article link.
///
/// # Arguments
///
/// * `fetcher` - Transport used for the request
/// * `queries` - The site's compiled selectors
/// * `host` - Host URL the link is resolved against
/// * `link` - The link as found on the homepage
///
/// # Returns
///
/// [`FetchOutcome::Fetched`] with the parsed [`Article`], or
/// [`FetchOutcome::Skipped`] when the page could not be fetched or has no
/// body. Both skip cases are logged as warnings; this function never fails.
#[instrument(level = "info", skip(fetcher, queries, host))]
pub async fn fetch_article<F: PageFetcher>(
    fetcher: &F,
    queries: &Queries,
    host: &str,
    link: &str,
) -> FetchOutcome<Article> {
    let (url, html) = match fetch_link(fetcher, host, link).await {
        Ok(page) => page,
        Err(reason) => return FetchOutcome::Skipped(reason),
    };

    let article = ArticlePage::parse(&url, &html, queries);
    if !article.is_valid() {
        warn!(%url, "Invalid article. There is no body");
        return FetchOutcome::Skipped(SkipReason::EmptyBody);
    }

    info!(%url, title = %article.title, "Article fetched");
    debug!(body = %truncate_for_log(&article.body, 200), "Article body");
    FetchOutcome::Fetched(article)
}
