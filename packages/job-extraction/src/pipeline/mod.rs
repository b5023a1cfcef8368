//! Extraction pipeline.
//!
//! Stages, leaf first:
//! - [`collect`] - search collector
//! - [`filter`] - crawl relevance filter
//! - [`prompts`] / [`extract`] - structured extractor
//! - [`aggregate`] - result aggregation
//! - [`run`] - the sequential loop that ties them together
//!
//! [`guard`] wraps every external call with a time budget and turns errors
//! into per-item failures.

pub mod aggregate;
pub mod collect;
pub mod extract;
pub mod filter;
pub mod guard;
pub mod prompts;
pub mod run;

pub use aggregate::Aggregator;
pub use collect::collect_hits;
pub use extract::{parse_model_output, strip_code_fence, Extraction, Extractor, ModelOutput};
pub use filter::{UrlFilter, UrlVerdict, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_INCLUDE_KEYWORDS};
pub use guard::guarded;
pub use prompts::{format_extract_prompt, truncate_chars, EXTRACT_PROMPT};
pub use run::Pipeline;
