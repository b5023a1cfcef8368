//! Configuration types for search, crawling, extraction and the run loop.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Search strategy requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

/// Options for the search collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum hits per query. Default: 5.
    pub max_results: usize,

    /// Provider search depth. Default: advanced.
    pub depth: SearchDepth,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 5,
            depth: SearchDepth::Advanced,
        }
    }
}

/// Domains the default query set targets.
pub const DEFAULT_JOB_DOMAINS: &[&str] = &[
    "lawctopus.com",
    "lawfer.in",
    "linkedin.com",
    "indeed.com",
    "glassdoor.co.in",
    "barandbench.com",
    "lawbhoomi.com",
    "nalsa.gov.in",
    "jobsforgood.com",
];

/// Guidance passed to the crawl provider.
pub const DEFAULT_CRAWL_INSTRUCTIONS: &str =
    "Find individual job, internship or vacancy postings and their application pages";

/// Parameters for expanding a hit into sub-pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOptions {
    /// Maximum link depth from the origin. Default: 2.
    pub max_depth: usize,

    /// Maximum links followed per page. Default: 3.
    pub max_breadth: usize,

    /// Total page limit for one crawl. Default: 10.
    pub limit: usize,

    /// Traversal is restricted to these domains; origins elsewhere are not crawled.
    pub include_domains: Vec<String>,

    /// Natural-language hint for the crawl provider.
    pub instructions: String,

    /// Cap on candidates kept after filtering. Default: 5.
    pub max_candidates: usize,

    /// When false, hits are extracted directly without crawling.
    pub enabled: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_breadth: 3,
            limit: 10,
            include_domains: DEFAULT_JOB_DOMAINS.iter().map(|d| d.to_string()).collect(),
            instructions: DEFAULT_CRAWL_INSTRUCTIONS.to_string(),
            max_candidates: 5,
            enabled: true,
        }
    }
}

impl CrawlOptions {
    /// Replace the domain allow-list.
    pub fn with_domains(mut self, domains: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_domains = domains.into_iter().map(|d| d.into()).collect();
        self
    }

    /// Set the candidate cap.
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    /// Disable crawling entirely.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether a host (already lowercased, no `www.`) is on the allow-list.
    ///
    /// Subdomains of an allowed domain are allowed. An empty list allows all.
    pub fn allows_host(&self, host: &str) -> bool {
        if self.include_domains.is_empty() {
            return true;
        }
        self.include_domains.iter().any(|domain| {
            let domain = domain.trim().trim_start_matches("www.").to_ascii_lowercase();
            host == domain || host.ends_with(&format!(".{}", domain))
        })
    }
}

/// What to do with model output that is not a JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Keep the raw text in `summary` with every other model field empty.
    /// Recovered records bypass the acceptance gate.
    #[default]
    Recover,

    /// Log the raw text and emit no record.
    Discard,
}

/// Configuration for the structured extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum characters of page content placed in the prompt. Default: 5000.
    pub content_budget: usize,

    /// Malformed-output handling.
    pub malformed: MalformedPolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            content_budget: 5_000,
            malformed: MalformedPolicy::Recover,
        }
    }
}

/// Bounded time budgets for external calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timeouts {
    pub search: Duration,
    pub crawl: Duration,
    pub fetch: Duration,
    pub generate: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            search: Duration::from_secs(60),
            crawl: Duration::from_secs(120),
            fetch: Duration::from_secs(60),
            generate: Duration::from_secs(60),
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub search: SearchOptions,
    pub crawl: CrawlOptions,
    pub extractor: ExtractorConfig,
    pub timeouts: Timeouts,

    /// Drop records whose source URL was already seen this run. Default: off.
    pub dedup_urls: bool,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    pub fn with_crawl(mut self, crawl: CrawlOptions) -> Self {
        self.crawl = crawl;
        self
    }

    pub fn with_extractor(mut self, extractor: ExtractorConfig) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Enable URL-level dedup across the run.
    pub fn with_url_dedup(mut self, enabled: bool) -> Self {
        self.dedup_urls = enabled;
        self
    }
}
