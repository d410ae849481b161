//! Records produced by a scrape run.
//!
//! - [`Article`]: one news article fetched from a site's homepage links
//! - [`Program`]: one academic program page, for sites configured with
//!   `kind: programs`
//!
//! Both are built once by the page parsers, never mutated, and written once
//! to CSV at the end of the run.

/// A news article parsed from a single article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// The article text. Empty means the page is not a usable article.
    pub body: String,
    /// Publication date as printed by the site, or empty if none was found.
    pub publication_date: String,
    /// The headline.
    pub title: String,
    /// The absolute URL the article was fetched from.
    pub url: String,
}

impl Article {
    /// An article is kept only when it has a body.
    pub fn is_valid(&self) -> bool {
        !self.body.is_empty()
    }
}

/// An academic program parsed from a program information page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub description: String,
    pub faculty: String,
    pub name: String,
    pub url: String,
}
