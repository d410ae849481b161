//! Page transport.
//!
//! The scrape loop only needs "give me the HTML at this URL", so that is all
//! [`PageFetcher`] asks for. [`HttpFetcher`] is the real implementation on
//! top of `reqwest`; tests substitute in-memory fetchers.

use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Network-layer failure while fetching a page.
///
/// Both variants are recoverable per link: the caller logs and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout, redirect or body-read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Something that can turn a URL into an HTML document.
pub trait PageFetcher {
    /// Fetch the page at `url` and return its body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_status_error_display() {
        let e = FetchError::Status {
            url: "http://x.com/a".to_string(),
            status: 404,
        };
        assert_eq!(e.to_string(), "request to http://x.com/a returned HTTP 404");
        assert!(e.source().is_none());
    }

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("news_scraper/"));
    }

    #[test]
    fn test_transport_error_keeps_its_source() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let e = FetchError::Transport {
            url: "http://x.com/a".to_string(),
            source,
        };
        assert!(e.to_string().starts_with("request to http://x.com/a failed: "));
        assert!(e.source().is_some());
    }

    #[test]
    fn test_fetcher_builds_with_timeout() {
        assert!(HttpFetcher::new(Duration::from_secs(2)).is_ok());
    }
}
