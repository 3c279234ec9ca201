use crate::models::AnalyzeError;
use anyhow::Result;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use url::Url;

/// Common HTTP headers used for all requests
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3 Safari/605.1.15";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const CONNECTION: &str = "keep-alive";

/// Creates a reqwest client with standard browser-like headers and configuration
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, ACCEPT.parse().unwrap());
    headers.insert(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE.parse().unwrap());
    headers.insert(header::CONNECTION, CONNECTION.parse().unwrap());

    let client = ClientBuilder::new()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    Ok(client)
}

/// Raw outcome of fetching a page, before any HTML parsing.
#[derive(Debug)]
pub struct FetchedPage {
    pub status_ok: bool,
    pub status_text: String,
    pub body: String,
}

/// Retrieves the document at `url`.
///
/// Transport failures (DNS, refused connections, timeouts) become
/// [`AnalyzeError::Fetch`]. HTTP error statuses are not an error here;
/// they come back through `status_ok` and `status_text` so the caller
/// decides what to do with them.
pub async fn fetch_html(client: &Client, url: &Url) -> Result<FetchedPage, AnalyzeError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| AnalyzeError::Fetch(e.to_string()))?;

    let status = response.status();
    let status_text = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string());

    let body = response
        .text()
        .await
        .map_err(|e| AnalyzeError::Fetch(e.to_string()))?;

    Ok(FetchedPage {
        status_ok: status.is_success(),
        status_text,
        body,
    })
}
