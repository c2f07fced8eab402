//! Page retrieval
//!
//! The pipeline only needs one thing from the network: the markup behind a
//! URL. [`PageFetcher`] is that capability; [`HttpFetcher`] implements it
//! with `reqwest`. Timeouts belong to the fetcher, not the pipeline.

use crate::config::AnalyzerConfig;
use crate::error::{Error, FetchError, INVALID_URL_MESSAGE};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

/// Raw response from a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase for the status, if known
    pub reason: String,
    /// Response body as text
    pub body: String,
}

impl FetchedPage {
    /// A 200 OK page with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            reason: "OK".to_string(),
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body of a successful response; non-2xx becomes an error
    pub fn into_markup(self) -> Result<String, FetchError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(FetchError::Status {
                status: self.status,
                reason: self.reason,
            })
        }
    }
}

/// Capability: retrieve the markup behind an absolute URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`, returning status and body.
    ///
    /// Implementations return `Ok` for any HTTP response, including error
    /// statuses; `Err` is reserved for transport failures.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// `reqwest`-backed fetcher sending a fixed User-Agent
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher from the analyzer configuration
    pub fn new(config: &AnalyzerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.fetch_timeout())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(skip(self, url), fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        info!("Fetching page");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Fetched {} bytes with status {}", body.len(), status.as_u16());

        Ok(FetchedPage {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// URL validation utilities
pub struct UrlValidator;

impl UrlValidator {
    /// Parse and check a URL for analysis.
    ///
    /// Only absolute `http`/`https` URLs with a host are accepted.
    pub fn validate(input: &str) -> Result<Url, Error> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input(INVALID_URL_MESSAGE));
        }

        let url = Url::parse(trimmed).map_err(|_| Error::invalid_input(INVALID_URL_MESSAGE))?;

        let has_host = url.host_str().is_some_and(|h| !h.is_empty());
        if !matches!(url.scheme(), "http" | "https") || !has_host {
            return Err(Error::invalid_input(INVALID_URL_MESSAGE));
        }

        Ok(url)
    }

    /// Hostname of a URL string, if it parses
    pub fn host(url: &str) -> Option<String> {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(String::from))
    }
}
