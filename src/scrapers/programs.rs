//! Academic program scraper.
//!
//! Sites configured with `kind: programs` list program information pages on
//! their homepage instead of news. Every listed page is fetched.

use super::{FetchLimit, FetchOutcome, Scraper, collect, fetch_link};
use crate::config::Queries;
use crate::fetch::PageFetcher;
use crate::models::Program;
use crate::pages::{HomePage, ProgramPage};
use tracing::{info, instrument};

/// Scraper for `kind: programs` sites.
pub struct ProgramScraper<'a, F> {
    fetcher: &'a F,
    queries: &'a Queries,
}

impl<'a, F: PageFetcher> ProgramScraper<'a, F> {
    pub fn new(fetcher: &'a F, queries: &'a Queries) -> Self {
        Self { fetcher, queries }
    }
}

impl<F: PageFetcher> Scraper for ProgramScraper<'_, F> {
    type Record = Program;

    #[instrument(level = "info", skip_all, fields(%host))]
    async fn scrape(&self, host: &str, homepage: &HomePage) -> Vec<Program> {
        let programs = collect(&homepage.program_links, FetchLimit::All, |link| {
            fetch_program(self.fetcher, self.queries, host, link)
        })
        .await;
        info!(count = programs.len(), "Fetched programs");
        programs
    }
}

/// Resolve, fetch and parse a single program page.
#[instrument(level = "info", skip(fetcher, queries, host))]
pub async fn fetch_program<F: PageFetcher>(
    fetcher: &F,
    queries: &Queries,
    host: &str,
    link: &str,
) -> FetchOutcome<Program> {
    match fetch_link(fetcher, host, link).await {
        Ok((url, html)) => {
            let program = ProgramPage::parse(&url, &html, queries);
            info!(%url, name = %program.name, "Info fetched");
            FetchOutcome::Fetched(program)
        }
        Err(reason) => FetchOutcome::Skipped(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewsConfig;
    use crate::scrapers::test_support::FakeFetcher;

    #[tokio::test]
    async fn test_processes_every_program_link() {
        let config = NewsConfig::from_yaml(
            r#"
news_sites:
  udistrital:
    url: https://u.edu
    kind: programs
    queries:
      homepage_program_links: ".programs a"
      program_name: "h1"
"#,
        )
        .unwrap();
        let queries = config.news_sites["udistrital"].queries("udistrital").unwrap();
        let fetcher = FakeFetcher::default()
            .page("https://u.edu/p/1", "<h1>Sistemas</h1>")
            .fail("https://u.edu/p/2")
            .page("https://u.edu/p/3", "<h1>Catastral</h1>");
        let homepage = HomePage {
            article_links: Vec::new(),
            program_links: vec!["/p/1".into(), "p/2".into(), "https://u.edu/p/3".into()],
        };

        let programs = ProgramScraper::new(&fetcher, &queries)
            .scrape("https://u.edu", &homepage)
            .await;

        let names: Vec<_> = programs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Sistemas", "Catastral"]);
        assert_eq!(fetcher.requested().len(), 3);
    }
}
