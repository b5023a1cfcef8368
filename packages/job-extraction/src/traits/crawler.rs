//! Crawler trait for expanding a hit into sub-pages.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ProviderResult;
use crate::types::{config::CrawlOptions, page::CrawlCandidate};

/// One crawl invocation as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlRequest {
    pub url: String,
    pub instructions: String,
    pub max_depth: usize,
    pub max_breadth: usize,
    pub limit: usize,
    pub include_domains: Vec<String>,
}

impl CrawlRequest {
    /// Build a request for `url` from the crawl options.
    pub fn new(url: impl Into<String>, options: &CrawlOptions) -> Self {
        Self {
            url: url.into(),
            instructions: options.instructions.clone(),
            max_depth: options.max_depth,
            max_breadth: options.max_breadth,
            limit: options.limit,
            include_domains: options.include_domains.clone(),
        }
    }
}

/// Crawl capability.
#[async_trait]
pub trait Crawler: Send + Sync {
    /// Discover pages reachable from `request.url` within its bounds.
    ///
    /// The result may include the origin itself; filtering is the caller's job.
    async fn crawl(&self, request: &CrawlRequest) -> ProviderResult<Vec<CrawlCandidate>>;

    /// Fetch the raw content of a single page.
    ///
    /// Returns an empty string when the provider has nothing for the URL.
    async fn fetch_content(&self, url: &str) -> ProviderResult<String>;
}

#[async_trait]
impl<T: Crawler + ?Sized> Crawler for std::sync::Arc<T> {
    async fn crawl(&self, request: &CrawlRequest) -> ProviderResult<Vec<CrawlCandidate>> {
        (**self).crawl(request).await
    }

    async fn fetch_content(&self, url: &str) -> ProviderResult<String> {
        (**self).fetch_content(url).await
    }
}
