use crate::models::Analysis;
use std::collections::HashMap;
use url::Url;

/// In-memory store of completed analyses, keyed by normalized URL.
///
/// Entries live for the lifetime of the process; there is no eviction.
/// Storing under a key that already exists replaces the previous entry.
pub struct AnalysisCache {
    entries: HashMap<String, Analysis>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, url: &Url) -> Option<&Analysis> {
        self.entries.get(&cache_key(url))
    }

    pub fn put(&mut self, url: &Url, analysis: Analysis) {
        self.entries.insert(cache_key(url), analysis);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache key for a URL: the fragment is stripped, and parsing has already
/// lowercased the scheme and host and dropped default ports. Path, query
/// and non-default ports stay significant.
pub fn cache_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}
