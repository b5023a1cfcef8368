//! Page types - search hits, crawl candidates and extraction inputs.

use serde::{Deserialize, Serialize};

/// A single search-result entry returned for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// URL of the result
    pub url: String,

    /// Result title (may be empty)
    #[serde(default)]
    pub title: String,

    /// Snippet/description from the search provider (may be empty)
    #[serde(default)]
    pub snippet: String,
}

impl SearchHit {
    /// Create a new hit for a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            snippet: String::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Host of the hit URL, lowercased, without a leading `www.`.
    pub fn host(&self) -> Option<String> {
        host_of(&self.url)
    }
}

/// A page discovered by crawling outward from a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlCandidate {
    /// Page URL
    pub url: String,

    /// Raw page content (may be empty)
    #[serde(default)]
    pub raw_content: String,
}

impl CrawlCandidate {
    /// Create a new candidate.
    pub fn new(url: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            raw_content: raw_content.into(),
        }
    }
}

/// Everything the extractor knows about one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSource {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub content: String,
}

impl ExtractionSource {
    /// Extract directly from a search hit plus whatever content was fetched for it.
    pub fn from_hit(hit: &SearchHit, content: impl Into<String>) -> Self {
        Self {
            url: hit.url.clone(),
            title: hit.title.clone(),
            snippet: hit.snippet.clone(),
            content: content.into(),
        }
    }

    /// Extract from a crawled candidate, keeping the originating hit's context.
    pub fn from_candidate(hit: &SearchHit, candidate: &CrawlCandidate) -> Self {
        Self {
            url: candidate.url.clone(),
            title: hit.title.clone(),
            snippet: hit.snippet.clone(),
            content: candidate.raw_content.clone(),
        }
    }
}

/// Lowercased host of a URL with any `www.` prefix removed.
pub fn host_of(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
}
