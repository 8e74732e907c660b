//! Backlink verification - the free plan's admission gate.
//!
//! Fetches the candidate project's public page with reqwest, parses the
//! anchors with the scraper crate, and passes when any href points at the
//! directory's host. A page that loads but carries no link is a clean
//! "not verified", not an error; only the fetch itself can fail.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Outbound page fetching, behind a trait so verification logic is testable
/// without network access.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// Production fetcher using reqwest.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("altdir-backlink-check/0.1")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        response.text().await.context("Failed to read response body")
    }
}

/// Checks candidate pages for a link back to the directory.
pub struct BacklinkVerifier {
    fetcher: Arc<dyn PageFetcher>,
    directory_host: String,
}

impl BacklinkVerifier {
    pub fn new(fetcher: Arc<dyn PageFetcher>, directory_host: String) -> Self {
        Self {
            fetcher,
            directory_host: normalize_host(&directory_host),
        }
    }

    /// Fetch `website_url` and report whether any anchor on the page links
    /// to the directory host.
    ///
    /// # Errors
    ///
    /// Only when the fetch itself fails; an unlinked page returns
    /// `Ok(false)`.
    pub async fn verify(&self, website_url: &str) -> Result<bool> {
        let html = self.fetcher.fetch_html(website_url).await?;
        let base = Url::parse(website_url).ok();
        let verified = page_links_to_host(&html, base.as_ref(), &self.directory_host);
        debug!(%website_url, verified, "Backlink verification completed");
        Ok(verified)
    }
}

fn normalize_host(host: &str) -> String {
    host.trim()
        .trim_start_matches("www.")
        .to_lowercase()
}

/// Scan the document's anchors for one resolving to `host`. Relative hrefs
/// are resolved against `base` and therefore never match a foreign host.
fn page_links_to_host(html: &str, base: Option<&Url>, host: &str) -> bool {
    let document = Html::parse_document(html);
    let anchors = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return false,
    };

    for element in document.select(&anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let resolved = match Url::parse(href) {
            Ok(url) => Some(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                base.and_then(|b| b.join(href).ok())
            }
            Err(_) => None,
        };
        if let Some(url) = resolved {
            if let Some(link_host) = url.host_str() {
                if normalize_host(link_host) == host {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubFetcher {
        html: String,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_html(&self, _url: &str) -> Result<String> {
            Ok(self.html.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch_html(&self, url: &str) -> Result<String> {
            anyhow::bail!("HTTP 503 for {}", url)
        }
    }

    fn verifier(html: &str) -> BacklinkVerifier {
        BacklinkVerifier::new(
            Arc::new(StubFetcher {
                html: html.to_string(),
            }),
            "altdir.dev".to_string(),
        )
    }

    #[tokio::test]
    async fn page_with_directory_link_verifies() {
        let v = verifier(
            r#"<html><body>
                <a href="https://altdir.dev/alternatives/my-project">Listed on AltDir</a>
            </body></html>"#,
        );
        assert!(v.verify("https://myproject.org").await.unwrap());
    }

    #[tokio::test]
    async fn www_prefix_still_matches() {
        let v = verifier(r#"<a href="https://www.altdir.dev/">directory</a>"#);
        assert!(v.verify("https://myproject.org").await.unwrap());
    }

    #[tokio::test]
    async fn unlinked_page_is_clean_false() {
        let v = verifier(r#"<a href="https://example.com/">elsewhere</a>"#);
        assert!(!v.verify("https://myproject.org").await.unwrap());
    }

    #[tokio::test]
    async fn relative_links_do_not_match_foreign_host() {
        // A relative "/altdir.dev" path resolves against the candidate's
        // own host, so it must not count as a backlink.
        let v = verifier(r#"<a href="/altdir.dev">fake</a>"#);
        assert!(!v.verify("https://myproject.org").await.unwrap());
    }

    #[tokio::test]
    async fn fetch_failure_is_an_error_not_false() {
        let v = BacklinkVerifier::new(Arc::new(FailingFetcher), "altdir.dev".to_string());
        assert!(v.verify("https://myproject.org").await.is_err());
    }
}
