//! Web search trait for hit discovery.
//!
//! Abstracts over search providers (Tavily, SerpAPI, ...). The pipeline only
//! needs `search(query, depth, max_results) -> hits`; how the provider ranks
//! or paginates is its own business.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::{config::SearchOptions, page::SearchHit};

/// Web search capability.
///
/// # Implementations
///
/// - `TavilyClient` - Tavily API
/// - `MockSearcher` - For testing
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Search the web for pages matching the query.
    ///
    /// Returns at most `options.max_results` hits. An empty vector means
    /// "no matches", not failure.
    async fn search(&self, query: &str, options: &SearchOptions) -> ProviderResult<Vec<SearchHit>>;
}

#[async_trait]
impl<T: Searcher + ?Sized> Searcher for std::sync::Arc<T> {
    async fn search(&self, query: &str, options: &SearchOptions) -> ProviderResult<Vec<SearchHit>> {
        (**self).search(query, options).await
    }
}
