//! Tavily-powered search and crawl.
//!
//! One client covers three endpoints:
//! - `/search` for hits ([`Searcher`])
//! - `/crawl` for bounded sub-page discovery ([`Crawler::crawl`])
//! - `/extract` for a single page's raw content ([`Crawler::fetch_content`])

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};
use crate::security::Credential;
use crate::traits::{
    crawler::{CrawlRequest, Crawler},
    searcher::Searcher,
};
use crate::types::{
    config::SearchOptions,
    page::{CrawlCandidate, SearchHit},
};

const PROVIDER: &str = "tavily";

/// Tavily search request.
#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    query: &'a str,
    search_depth: &'static str,
    max_results: usize,
}

/// Tavily search response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResultItem>,
}

/// A single Tavily search result.
#[derive(Debug, Deserialize)]
struct SearchResultItem {
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Tavily crawl request.
#[derive(Debug, Serialize)]
struct CrawlBody<'a> {
    url: &'a str,
    instructions: &'a str,
    max_depth: usize,
    max_breadth: usize,
    limit: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    select_domains: Vec<String>,
}

/// Tavily extract request.
#[derive(Debug, Serialize)]
struct ExtractBody<'a> {
    urls: Vec<&'a str>,
}

/// Page list returned by both `/crawl` and `/extract`.
#[derive(Debug, Deserialize)]
struct PagesResponse {
    #[serde(default)]
    results: Vec<PageItem>,
}

#[derive(Debug, Deserialize)]
struct PageItem {
    url: String,
    #[serde(default)]
    raw_content: Option<String>,
}

/// Turn `lawctopus.com` into the anchored pattern Tavily expects.
fn domain_pattern(domain: &str) -> String {
    let domain = domain.trim().trim_start_matches("www.");
    format!(r"^(.*\.)?{}$", domain.replace('.', r"\."))
}

/// Client for the Tavily API.
#[derive(Clone)]
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: Credential,
    base_url: String,
}

impl TavilyClient {
    /// Create a new Tavily client.
    pub fn new(api_key: impl Into<Credential>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.tavily.com".to_string(),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> ProviderResult<R>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .header("Content-Type", "application/json")
            .bearer_auth(self.api_key.expose())
            .json(body)
            .send()
            .await
            .map_err(ProviderError::http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status,
                body,
            });
        }

        response.json().await.map_err(ProviderError::http)
    }
}

#[async_trait]
impl Searcher for TavilyClient {
    async fn search(&self, query: &str, options: &SearchOptions) -> ProviderResult<Vec<SearchHit>> {
        let body = SearchBody {
            query,
            search_depth: options.depth.as_str(),
            max_results: options.max_results,
        };
        let response: SearchResponse = self.post("search", &body).await?;

        Ok(response
            .results
            .into_iter()
            .map(|r| SearchHit {
                url: r.url,
                title: r.title.unwrap_or_default(),
                snippet: r.content.unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl Crawler for TavilyClient {
    async fn crawl(&self, request: &CrawlRequest) -> ProviderResult<Vec<CrawlCandidate>> {
        if url::Url::parse(&request.url).is_err() {
            return Err(ProviderError::InvalidUrl {
                url: request.url.clone(),
            });
        }

        let body = CrawlBody {
            url: &request.url,
            instructions: &request.instructions,
            max_depth: request.max_depth,
            max_breadth: request.max_breadth,
            limit: request.limit,
            select_domains: request
                .include_domains
                .iter()
                .map(|d| domain_pattern(d))
                .collect(),
        };
        let response: PagesResponse = self.post("crawl", &body).await?;

        Ok(response
            .results
            .into_iter()
            .map(|p| CrawlCandidate::new(p.url, p.raw_content.unwrap_or_default()))
            .collect())
    }

    async fn fetch_content(&self, url: &str) -> ProviderResult<String> {
        let body = ExtractBody { urls: vec![url] };
        let response: PagesResponse = self.post("extract", &body).await?;

        Ok(response
            .results
            .into_iter()
            .next()
            .and_then(|p| p.raw_content)
            .unwrap_or_default())
    }
}
