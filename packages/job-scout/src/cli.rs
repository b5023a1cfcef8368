use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use job_extraction::{
    CrawlOptions, ExtractorConfig, JsonReportSink, MalformedPolicy, PipelineConfig, QuerySet,
    ReportSink, SearchOptions, XlsxReportSink,
};
use std::path::PathBuf;

/// Report file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// One spreadsheet row per record
    #[default]
    Xlsx,
    /// Records plus run metadata
    Json,
}

impl ReportFormat {
    /// Sink writing this format into `dir`.
    pub fn sink(self, dir: PathBuf) -> Box<dyn ReportSink> {
        match self {
            Self::Xlsx => Box::new(XlsxReportSink::new(dir)),
            Self::Json => Box::new(JsonReportSink::new(dir)),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "job-scout")]
#[command(about = "Search, crawl and extract job postings into a spreadsheet report")]
pub struct Cli {
    /// File with one search query per line (`#` starts a comment).
    /// Defaults to the built-in legal-jobs-in-Hyderabad set.
    #[arg(long, value_name = "FILE")]
    pub queries: Option<PathBuf>,

    /// Directory the report is written to (overrides REPORT_DIR)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report file format
    #[arg(long, value_enum, default_value_t = ReportFormat::Xlsx)]
    pub report_format: ReportFormat,

    /// Search hits kept per query
    #[arg(long, default_value_t = 5)]
    pub max_results: usize,

    /// Characters of page content sent to the model
    #[arg(long, default_value_t = 5_000)]
    pub content_budget: usize,

    /// Drop records whose source URL was already seen this run
    #[arg(long)]
    pub dedup_urls: bool,

    /// Drop unparseable model output instead of keeping it in `summary`
    #[arg(long)]
    pub discard_malformed: bool,

    /// Extract search hits directly without crawling
    #[arg(long)]
    pub no_crawl: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Pipeline configuration implied by the flags.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let crawl = if self.no_crawl {
            CrawlOptions::default().disabled()
        } else {
            CrawlOptions::default()
        };

        PipelineConfig::new()
            .with_search(SearchOptions {
                max_results: self.max_results,
                ..SearchOptions::default()
            })
            .with_crawl(crawl)
            .with_extractor(ExtractorConfig {
                content_budget: self.content_budget,
                malformed: if self.discard_malformed {
                    MalformedPolicy::Discard
                } else {
                    MalformedPolicy::Recover
                },
            })
            .with_url_dedup(self.dedup_urls)
    }

    /// Load the query set from `--queries` or fall back to the default set.
    pub fn load_queries(&self) -> Result<QuerySet> {
        let Some(path) = &self.queries else {
            return Ok(QuerySet::legal_hyderabad());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file {}", path.display()))?;
        let queries = QuerySet::parse(&text);
        if queries.is_empty() {
            bail!("Query file {} contains no queries", path.display());
        }
        Ok(queries)
    }
}
