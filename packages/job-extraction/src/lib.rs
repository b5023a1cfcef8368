//! Job Posting Extraction Library
//!
//! Turns a list of natural-language search queries into a flat table of
//! structured job records.
//!
//! For every query the pipeline searches the web, optionally runs a bounded
//! crawl of job-board hits to find concrete posting pages, filters listing
//! and pagination noise out of the crawl, and asks a language model to fill a
//! fixed schema from each page. Every record of a run carries the same
//! `scraped_on` stamp.
//!
//! # Usage
//!
//! ```rust,ignore
//! use job_extraction::{Pipeline, PipelineConfig, QuerySet, RunStamp, TavilyClient};
//! use job_extraction::ai::{GeminiGenerator, GeneratorExt};
//! use std::time::Duration;
//!
//! let tavily = TavilyClient::new(tavily_key);
//! let llm = GeminiGenerator::new(google_key).rate_limited(Duration::from_secs(1));
//! let pipeline = Pipeline::new(tavily.clone(), tavily, llm, PipelineConfig::default());
//!
//! let results = pipeline.run(&QuerySet::legal_hyderabad(), RunStamp::now()).await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Searcher, Crawler, TextGenerator and output seams
//! - [`types`] - Queries, pages, records and run configuration
//! - [`pipeline`] - Collection, filtering, extraction and aggregation
//! - [`crawlers`] - Tavily search/crawl client
//! - [`ai`] - Gemini and OpenAI generators plus rate limiting
//! - [`report`] - Spreadsheet/JSON report sinks and email/webhook notifiers
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod crawlers;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use crawlers::TavilyClient;
pub use error::{
    CallOutcome, ConfigError, FailureKind, ProviderError, ProviderFailure, ProviderResult,
    ReportError,
};
pub use pipeline::{Aggregator, Extraction, Extractor, Pipeline, UrlFilter, UrlVerdict};
pub use report::{
    DisabledNotifier, JsonReportSink, SmtpNotifier, SmtpSettings, WebhookNotifier, XlsxReportSink,
};
pub use traits::{
    crawler::{CrawlRequest, Crawler},
    generator::TextGenerator,
    searcher::Searcher,
    sink::{Notifier, ReportSink},
};
pub use types::{
    config::{
        CrawlOptions, ExtractorConfig, MalformedPolicy, PipelineConfig, SearchDepth,
        SearchOptions, Timeouts,
    },
    page::{CrawlCandidate, ExtractionSource, SearchHit},
    query::{Query, QuerySet},
    record::JobRecord,
    run::{ResultSet, RunMetadata, RunStamp},
};
