//! Testing utilities including mock implementations.
//!
//! These are useful for testing the pipeline and applications built on it
//! without making real search, crawl or LLM calls.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{ProviderError, ProviderResult};
use crate::traits::{
    crawler::{CrawlRequest, Crawler},
    generator::TextGenerator,
    searcher::Searcher,
};
use crate::types::{
    config::{SearchDepth, SearchOptions},
    page::{CrawlCandidate, SearchHit},
};

fn mock_failure(provider: &'static str) -> ProviderError {
    ProviderError::Status {
        provider,
        status: 503,
        body: "mock failure".to_string(),
    }
}

/// Record of a search call made to the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub query: String,
    pub max_results: usize,
    pub depth: SearchDepth,
}

/// Mock searcher with canned hits per query.
#[derive(Default, Clone)]
pub struct MockSearcher {
    results: Arc<RwLock<HashMap<String, Vec<SearchHit>>>>,
    failing: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<SearchCall>>>,
}

impl MockSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add hits for a query.
    pub fn with_hits(self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), hits);
        self
    }

    /// Add bare URL hits for a query.
    pub fn with_urls(self, query: &str, urls: &[&str]) -> Self {
        let hits = urls.iter().map(|u| SearchHit::new(*u)).collect();
        self.with_hits(query, hits)
    }

    /// Make a query fail with a provider error.
    pub fn failing_on(self, query: &str) -> Self {
        self.failing.write().unwrap().push(query.to_string());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    async fn search(&self, query: &str, options: &SearchOptions) -> ProviderResult<Vec<SearchHit>> {
        self.calls.write().unwrap().push(SearchCall {
            query: query.to_string(),
            max_results: options.max_results,
            depth: options.depth,
        });

        if self.failing.read().unwrap().iter().any(|q| q == query) {
            return Err(mock_failure("mock-search"));
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock crawler with canned crawl results and page contents.
#[derive(Default, Clone)]
pub struct MockCrawler {
    crawls: Arc<RwLock<HashMap<String, Vec<CrawlCandidate>>>>,
    contents: Arc<RwLock<HashMap<String, String>>>,
    failing: Arc<RwLock<Vec<String>>>,
    crawl_requests: Arc<RwLock<Vec<CrawlRequest>>>,
    fetched: Arc<RwLock<Vec<String>>>,
}

impl MockCrawler {
    /// Create a new mock crawler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages returned when crawling `origin`.
    pub fn with_crawl(self, origin: &str, pages: Vec<CrawlCandidate>) -> Self {
        self.crawls
            .write()
            .unwrap()
            .insert(origin.to_string(), pages);
        self
    }

    /// Content returned when fetching `url` directly.
    pub fn with_content(self, url: &str, content: &str) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(url.to_string(), content.to_string());
        self
    }

    /// Make both crawl and fetch fail for `url`.
    pub fn failing_on(self, url: &str) -> Self {
        self.failing.write().unwrap().push(url.to_string());
        self
    }

    /// Crawl requests received so far.
    pub fn crawl_requests(&self) -> Vec<CrawlRequest> {
        self.crawl_requests.read().unwrap().clone()
    }

    /// URLs fetched directly so far.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.read().unwrap().clone()
    }

    fn is_failing(&self, url: &str) -> bool {
        self.failing.read().unwrap().iter().any(|u| u == url)
    }
}

#[async_trait]
impl Crawler for MockCrawler {
    async fn crawl(&self, request: &CrawlRequest) -> ProviderResult<Vec<CrawlCandidate>> {
        self.crawl_requests.write().unwrap().push(request.clone());
        if self.is_failing(&request.url) {
            return Err(mock_failure("mock-crawl"));
        }
        Ok(self
            .crawls
            .read()
            .unwrap()
            .get(&request.url)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_content(&self, url: &str) -> ProviderResult<String> {
        self.fetched.write().unwrap().push(url.to_string());
        if self.is_failing(url) {
            return Err(mock_failure("mock-fetch"));
        }
        Ok(self
            .contents
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default())
    }
}

/// Scripted reply from the mock generator.
#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail,
}

/// Mock text generator.
///
/// Replies are chosen in this order: the next queued reply, the first rule
/// whose needle appears in the prompt, then the default reply.
#[derive(Default, Clone)]
pub struct MockGenerator {
    queue: Arc<RwLock<VecDeque<Reply>>>,
    rules: Arc<RwLock<Vec<(String, Reply)>>>,
    default: Arc<RwLock<Option<Reply>>>,
    delay: Option<Duration>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockGenerator {
    /// Create a new mock generator that returns empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply used when nothing more specific matches.
    pub fn with_default_response(self, text: impl Into<String>) -> Self {
        *self.default.write().unwrap() = Some(Reply::Text(text.into()));
        self
    }

    /// Reply with `text` whenever the prompt contains `needle`.
    pub fn with_response_for(self, needle: &str, text: impl Into<String>) -> Self {
        self.rules
            .write()
            .unwrap()
            .push((needle.to_string(), Reply::Text(text.into())));
        self
    }

    /// Fail whenever the prompt contains `needle`.
    pub fn failing_for(self, needle: &str) -> Self {
        self.rules
            .write()
            .unwrap()
            .push((needle.to_string(), Reply::Fail));
        self
    }

    /// Queue a reply for the next call.
    pub fn then_respond(self, text: impl Into<String>) -> Self {
        self.queue
            .write()
            .unwrap()
            .push_back(Reply::Text(text.into()));
        self
    }

    /// Queue a failure for the next call.
    pub fn then_fail(self) -> Self {
        self.queue.write().unwrap().push_back(Reply::Fail);
        self
    }

    /// Fail every call.
    pub fn failing(self) -> Self {
        *self.default.write().unwrap() = Some(Reply::Fail);
        self
    }

    /// Sleep before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    fn next_reply(&self, prompt: &str) -> Reply {
        if let Some(reply) = self.queue.write().unwrap().pop_front() {
            return reply;
        }
        if let Some((_, reply)) = self
            .rules
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
        {
            return reply.clone();
        }
        self.default
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Reply::Text(String::new()))
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        self.prompts.write().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.next_reply(prompt) {
            Reply::Text(text) => Ok(text),
            Reply::Fail => Err(mock_failure("mock-llm")),
        }
    }

    fn name(&self) -> &str {
        "mock-llm"
    }
}
