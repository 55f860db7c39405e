//! Page fetching.
//!
//! [`Fetcher`] is the seam between the job pipeline and the network. The
//! production implementation, [`HttpFetcher`], is a blocking `reqwest` client
//! that follows redirects, identifies with a browser-like user agent and
//! accepts any TLS certificate.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use tracing::debug;
use url::Url;

use crate::encoding::decode_page;
use crate::error::{Error, Result};
use crate::Options;

/// Maximum redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// Raw response body of a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Body bytes, undecoded.
    pub body: Vec<u8>,
    /// `Content-Type` response header, if any.
    pub content_type: Option<String>,
}

impl FetchedPage {
    /// Page holding UTF-8 markup.
    #[must_use]
    pub fn html(markup: impl Into<String>) -> Self {
        Self {
            body: markup.into().into_bytes(),
            content_type: Some("text/html; charset=utf-8".to_string()),
        }
    }

    /// Decode the body to UTF-8 using the declared charset.
    #[must_use]
    pub fn text(&self) -> String {
        decode_page(&self.body, self.content_type.as_deref())
    }
}

/// Source of raw page bytes.
///
/// Any failure (network, timeout, DNS, non-success status) is reported as
/// [`Error::Fetch`]; no partial body is returned.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// Blocking HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the timeout and user agent from `opts`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the TLS backend cannot be initialised.
    pub fn new(opts: &Options) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(opts.timeout_secs))
            .user_agent(opts.user_agent.as_str())
            .redirect(Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {status} for {url}")));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = response
            .bytes()
            .map_err(|e| Error::Fetch(e.to_string()))?
            .to_vec();

        debug!(%url, bytes = body.len(), "fetched");
        Ok(FetchedPage { body, content_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_page_text_uses_header_charset() {
        let page = FetchedPage {
            body: b"<p>caf\xe9</p>".to_vec(),
            content_type: Some("text/html; charset=ISO-8859-1".to_string()),
        };
        assert_eq!(page.text(), "<p>caf\u{e9}</p>");
    }

    #[test]
    fn test_html_constructor() {
        let page = FetchedPage::html("<p>x</p>");
        assert_eq!(page.text(), "<p>x</p>");
    }

    #[test]
    fn test_client_builds_from_default_options() {
        assert!(HttpFetcher::new(&Options::default()).is_ok());
    }
}
