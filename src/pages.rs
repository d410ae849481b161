//! HTML page objects.
//!
//! Each page type wraps a parsed document and pulls fields out of it using
//! the site's configured selectors. Missing selectors or unmatched queries
//! yield empty strings, never errors.

use crate::config::Queries;
use crate::models::{Article, Program};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static PUBLISHED_META: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="article:published_time"]"#).expect("valid meta selector")
});
static JSON_LD: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid JSON-LD selector")
});
static TIME_DATETIME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time[datetime]").expect("valid time selector"));

/// Text content of an element with whitespace runs collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).join(" ")
}

/// Text of the first element matched by `selector`, or empty.
fn first_text(document: &Html, selector: Option<&Selector>) -> String {
    selector
        .and_then(|s| document.select(s).next())
        .map(element_text)
        .unwrap_or_default()
}

/// `href` values of every element matched by `selector`, in document order,
/// first occurrence only.
fn hrefs(document: &Html, selector: Option<&Selector>) -> Vec<String> {
    let Some(selector) = selector else {
        return Vec::new();
    };
    document
        .select(selector)
        .filter_map(|e| e.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}

/// A site's landing page: the source of candidate links.
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    pub article_links: Vec<String>,
    pub program_links: Vec<String>,
}

impl HomePage {
    pub fn parse(html: &str, queries: &Queries) -> Self {
        let document = Html::parse_document(html);
        Self {
            article_links: hrefs(&document, queries.homepage_article_links.as_ref()),
            program_links: hrefs(&document, queries.homepage_program_links.as_ref()),
        }
    }
}

/// A single news article page.
pub struct ArticlePage;

impl ArticlePage {
    /// Parse an article fetched from `url`.
    pub fn parse(url: &str, html: &str, queries: &Queries) -> Article {
        let document = Html::parse_document(html);
        Article {
            body: first_text(&document, queries.article_body.as_ref()),
            publication_date: publication_date(&document, queries.article_date.as_ref()),
            title: first_text(&document, queries.article_title.as_ref()),
            url: url.to_string(),
        }
    }
}

/// Publication date, trying in order: the configured selector (its
/// `datetime`/`content` attribute, then its text), the Open Graph
/// `article:published_time` meta tag, JSON-LD `datePublished`, and the first
/// `<time datetime>` element.
fn publication_date(document: &Html, selector: Option<&Selector>) -> String {
    let configured = selector.and_then(|s| document.select(s).next()).map(|e| {
        e.value()
            .attr("datetime")
            .or_else(|| e.value().attr("content"))
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| element_text(e))
    });

    let meta = || {
        document
            .select(&PUBLISHED_META)
            .filter_map(|e| e.value().attr("content"))
            .map(|v| v.trim().to_string())
            .next()
    };

    let json_ld = || {
        document.select(&JSON_LD).find_map(|script| {
            let raw = script.text().collect::<String>();
            let value: serde_json::Value = serde_json::from_str(&raw).ok()?;
            date_published(&value)
        })
    };

    let time = || {
        document
            .select(&TIME_DATETIME)
            .filter_map(|e| e.value().attr("datetime"))
            .map(|v| v.trim().to_string())
            .next()
    };

    configured
        .filter(|d| !d.is_empty())
        .or_else(meta)
        .filter(|d| !d.is_empty())
        .or_else(json_ld)
        .filter(|d| !d.is_empty())
        .or_else(time)
        .unwrap_or_default()
}

/// `datePublished` from a JSON-LD value, looking through arrays and `@graph`.
fn date_published(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::Object(map) => map
            .get("datePublished")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| map.get("@graph").and_then(date_published)),
        Value::Array(items) => items.iter().find_map(date_published),
        _ => None,
    }
}

/// An academic program information page.
pub struct ProgramPage;

impl ProgramPage {
    pub fn parse(url: &str, html: &str, queries: &Queries) -> Program {
        let document = Html::parse_document(html);
        Program {
            description: first_text(&document, queries.program_description.as_ref()),
            faculty: first_text(&document, queries.program_faculty.as_ref()),
            name: first_text(&document, queries.program_name.as_ref()),
            url: url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewsConfig;

    fn queries() -> Queries {
        let yaml = r#"
news_sites:
  test:
    url: https://x.com
    queries:
      homepage_article_links: ".headlines a"
      homepage_program_links: ".programs a"
      article_title: "h1"
      article_body: ".body"
      program_name: "h1"
      program_faculty: ".faculty"
      program_description: ".about"
"#;
        let config = NewsConfig::from_yaml(yaml).unwrap();
        config.news_sites["test"].queries("test").unwrap()
    }

    #[test]
    fn test_homepage_links_in_order_without_duplicates() {
        let html = r#"
            <div class="headlines">
              <a href="/b">B</a>
              <a href="https://x.com/a/1">A</a>
              <a href="/b">B again</a>
              <a>no href</a>
              <a href="  ">blank</a>
              <a href="c">C</a>
            </div>
            <a href="/outside">ignored</a>
        "#;
        let home = HomePage::parse(html, &queries());
        assert_eq!(home.article_links, vec!["/b", "https://x.com/a/1", "c"]);
        assert!(home.program_links.is_empty());
    }

    #[test]
    fn test_article_fields() {
        let html = r#"
            <html><head>
              <meta property="article:published_time" content="2025-05-06T10:00:00Z">
            </head><body>
              <h1>  Big   News </h1>
              <div class="body"><p>First.</p>
                <p>Second.</p></div>
            </body></html>
        "#;
        let article = ArticlePage::parse("https://x.com/a", html, &queries());
        assert_eq!(article.title, "Big News");
        assert_eq!(article.body, "First. Second.");
        assert_eq!(article.publication_date, "2025-05-06T10:00:00Z");
        assert_eq!(article.url, "https://x.com/a");
    }

    #[test]
    fn test_article_without_body_has_empty_body() {
        let article = ArticlePage::parse("https://x.com/a", "<h1>Only a title</h1>", &queries());
        assert_eq!(article.title, "Only a title");
        assert!(article.body.is_empty());
        assert!(article.publication_date.is_empty());
    }

    #[test]
    fn test_date_from_json_ld_graph() {
        let html = r#"
            <script type="application/ld+json">
              {"@graph": [
                {"@type": "WebPage"},
                {"@type": "NewsArticle", "datePublished": "2025-01-02"}
              ]}
            </script>
            <time datetime="1999-01-01">old</time>
        "#;
        let article = ArticlePage::parse("https://x.com/a", html, &queries());
        assert_eq!(article.publication_date, "2025-01-02");
    }

    #[test]
    fn test_date_falls_back_to_time_element() {
        let html = r#"<script type="application/ld+json">not json</script>
            <time datetime="2025-03-04">March 4</time>"#;
        let article = ArticlePage::parse("https://x.com/a", html, &queries());
        assert_eq!(article.publication_date, "2025-03-04");
    }

    #[test]
    fn test_configured_date_selector_wins() {
        let yaml = r#"
news_sites:
  test:
    url: https://x.com
    queries:
      homepage_article_links: "a"
      article_date: ".dateline"
"#;
        let config = NewsConfig::from_yaml(yaml).unwrap();
        let queries = config.news_sites["test"].queries("test").unwrap();
        let html = r#"
            <meta property="article:published_time" content="2025-05-06">
            <span class="dateline">6 de mayo de 2025</span>
        "#;
        let article = ArticlePage::parse("https://x.com/a", html, &queries);
        assert_eq!(article.publication_date, "6 de mayo de 2025");
    }

    #[test]
    fn test_program_fields() {
        let html = r#"
            <h1>Ingeniería de Sistemas</h1>
            <span class="faculty">Facultad de Ingeniería</span>
            <div class="about">Five-year program.</div>
        "#;
        let program = ProgramPage::parse("https://u.edu/p/1", html, &queries());
        assert_eq!(program.name, "Ingeniería de Sistemas");
        assert_eq!(program.faculty, "Facultad de Ingeniería");
        assert_eq!(program.description, "Five-year program.");
        assert_eq!(program.url, "https://u.edu/p/1");
    }
}
