use crate::analyzer;
use crate::cache::AnalysisCache;
use crate::extractor;
use crate::http_client::{build_http_client, fetch_html};
use crate::models::{Analysis, AnalyzeError};
use anyhow::Result;
use reqwest::Client;
use url::Url;

/// Audits pages one URL at a time.
///
/// Results are cached by normalized URL, so repeated requests for the same
/// page (or a fragment-only variant of it) are served without touching the
/// network.
pub struct Auditor {
    client: Client,
    cache: AnalysisCache,
}

impl Auditor {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            cache: AnalysisCache::new(),
        })
    }

    /// Number of analyses currently cached.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Fetches, extracts and scores a single page.
    ///
    /// The URL must be absolute with an http or https scheme. A response
    /// with a non-success status aborts the audit; nothing is cached for
    /// failed attempts.
    pub async fn analyze_url(&mut self, url: &str) -> Result<Analysis, AnalyzeError> {
        let parsed = Url::parse(url).map_err(|_| AnalyzeError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AnalyzeError::InvalidUrl(url.to_string()));
        }

        if let Some(hit) = self.cache.get(&parsed) {
            tracing::debug!(url = %url, "serving analysis from cache");
            return Ok(hit.clone());
        }

        let page = fetch_html(&self.client, &parsed).await?;
        if !page.status_ok {
            tracing::warn!(url = %url, status = %page.status_text, "page returned an error status");
            return Err(AnalyzeError::Fetch(page.status_text));
        }

        let record = extractor::extract(&page.body, url);
        let analysis = analyzer::analyze(record);
        self.cache.put(&parsed, analysis.clone());

        Ok(analysis)
    }
}
