//! Site configuration.
//!
//! Sites are described in a YAML file:
//!
//! ```yaml
//! news_sites:
//!   eluniversal:
//!     url: https://www.eluniversal.com.mx
//!     queries:
//!       homepage_article_links: ".field-content a"
//!       article_body: ".field-name-body"
//!       article_title: ".pane-content h1"
//!   udistrital:
//!     url: https://www.udistrital.edu.co
//!     kind: programs
//!     queries:
//!       homepage_program_links: ".programas a"
//!       program_name: "h1.title"
//!       program_faculty: ".facultad"
//! ```
//!
//! The loader compiles every selector once so a typo fails the run at
//! start-up instead of silently matching nothing on every page.

use scraper::Selector;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

/// Errors raised while loading the site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("site {site}: query {query} has invalid selector {selector:?}: {reason}")]
    Selector {
        site: String,
        query: String,
        selector: String,
        reason: String,
    },
    #[error("site {site}: required query {query} is not configured")]
    MissingQuery { site: String, query: &'static str },
}

/// Which kind of records a site produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    /// News articles, exported as `*_articles.csv`.
    #[default]
    Articles,
    /// Academic programs, exported as `*_ud_programs.csv`.
    Programs,
}

/// CSS selectors used to pick fields out of a site's pages, as written in
/// the YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQueries {
    pub homepage_article_links: Option<String>,
    pub homepage_program_links: Option<String>,
    pub article_title: Option<String>,
    pub article_body: Option<String>,
    pub article_date: Option<String>,
    pub program_name: Option<String>,
    pub program_faculty: Option<String>,
    pub program_description: Option<String>,
}

/// One configured site.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Host URL without a trailing slash, e.g. `https://www.example.com`.
    pub url: String,
    #[serde(default)]
    pub kind: SiteKind,
    #[serde(default)]
    pub queries: RawQueries,
}

/// The whole configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    pub news_sites: BTreeMap<String, SiteConfig>,
}

impl NewsConfig {
    /// Read and parse the configuration at `path`, validating every selector.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|e| match e {
            ConfigError::Yaml { source, .. } => ConfigError::Yaml {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        info!(sites = config.news_sites.len(), "Loaded site configuration");
        Ok(config)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: NewsConfig =
            serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
                path: "<inline>".to_string(),
                source,
            })?;
        for (uid, site) in &config.news_sites {
            site.queries(uid)?;
        }
        Ok(config)
    }

    /// Configured site identifiers, in sorted order.
    pub fn site_ids(&self) -> Vec<&str> {
        self.news_sites.keys().map(String::as_str).collect()
    }
}

/// Selectors compiled from [`RawQueries`].
#[derive(Debug, Clone)]
pub struct Queries {
    pub homepage_article_links: Option<Selector>,
    pub homepage_program_links: Option<Selector>,
    pub article_title: Option<Selector>,
    pub article_body: Option<Selector>,
    pub article_date: Option<Selector>,
    pub program_name: Option<Selector>,
    pub program_faculty: Option<Selector>,
    pub program_description: Option<Selector>,
}

impl SiteConfig {
    /// Compile this site's selectors.
    ///
    /// The homepage link query matching the site's [`SiteKind`] is required;
    /// everything else is optional and yields empty fields when absent.
    pub fn queries(&self, uid: &str) -> Result<Queries, ConfigError> {
        let raw = &self.queries;
        let compile =
            |query: &str, value: &Option<String>| -> Result<Option<Selector>, ConfigError> {
                value
                    .as_deref()
                    .map(|css| {
                        Selector::parse(css).map_err(|e| ConfigError::Selector {
                            site: uid.to_string(),
                            query: query.to_string(),
                            selector: css.to_string(),
                            reason: e.to_string(),
                        })
                    })
                    .transpose()
            };

        let queries = Queries {
            homepage_article_links: compile("homepage_article_links", &raw.homepage_article_links)?,
            homepage_program_links: compile("homepage_program_links", &raw.homepage_program_links)?,
            article_title: compile("article_title", &raw.article_title)?,
            article_body: compile("article_body", &raw.article_body)?,
            article_date: compile("article_date", &raw.article_date)?,
            program_name: compile("program_name", &raw.program_name)?,
            program_faculty: compile("program_faculty", &raw.program_faculty)?,
            program_description: compile("program_description", &raw.program_description)?,
        };

        let required = match self.kind {
            SiteKind::Articles => (
                "homepage_article_links",
                queries.homepage_article_links.is_some(),
            ),
            SiteKind::Programs => (
                "homepage_program_links",
                queries.homepage_program_links.is_some(),
            ),
        };
        if !required.1 {
            return Err(ConfigError::MissingQuery {
                site: uid.to_string(),
                query: required.0,
            });
        }

        Ok(queries)
    }
}
