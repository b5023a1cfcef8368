//! Structured extractor - prompt the model and turn its reply into a record.
//!
//! Response handling runs in a fixed order:
//! 1. call failure, timeout or blank text: no record
//! 2. strip a surrounding code fence
//! 3. parse as a JSON object; anything else is recovered into `summary`
//! 4. fill every field with an empty-string default
//! 5. acceptance gate on `company_name` / `job_title`

use serde_json::{Map, Value};
use std::time::Duration;

use crate::error::{FailureKind, ProviderFailure};
use crate::pipeline::guard::guarded;
use crate::pipeline::prompts::format_extract_prompt;
use crate::traits::generator::TextGenerator;
use crate::types::{
    config::{ExtractorConfig, MalformedPolicy},
    page::ExtractionSource,
    record::JobRecord,
};

/// Result of extracting one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Parsed and passed the acceptance gate.
    Accepted(JobRecord),

    /// Output was not a JSON object; raw text kept in `summary`.
    Recovered { record: JobRecord, raw: String },

    /// Parsed, but neither company nor title was present.
    Rejected,

    /// Output was not a JSON object and the policy drops it.
    Discarded { raw: String },

    /// The model call failed, timed out or returned nothing.
    Failed(ProviderFailure),
}

impl Extraction {
    /// The record this outcome contributes to the result set, if any.
    pub fn into_record(self) -> Option<JobRecord> {
        match self {
            Self::Accepted(record) | Self::Recovered { record, .. } => Some(record),
            Self::Rejected | Self::Discarded { .. } | Self::Failed(_) => None,
        }
    }
}

/// Parsed model reply before the acceptance gate.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Object(Map<String, Value>),
    Malformed(String),
}

/// Remove a triple-backtick fence the model added despite instructions.
///
/// Handles an optional language tag on the opening fence (```` ```json ````)
/// and tolerates a missing closing fence.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") up to the first newline.
    let body = match after_open.find('\n') {
        Some(idx) => &after_open[idx + 1..],
        None => after_open
            .trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .trim_start(),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parse cleaned model text into a JSON object.
pub fn parse_model_output(raw: &str) -> ModelOutput {
    let cleaned = strip_code_fence(raw);
    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(object)) => ModelOutput::Object(object),
        Ok(_) | Err(_) => ModelOutput::Malformed(raw.trim().to_string()),
    }
}

/// Prompt-driven extractor over any text generator.
///
/// Holds no mutable state, so one item can be retried freely.
pub struct Extractor<G: TextGenerator> {
    generator: G,
    config: ExtractorConfig,
    timeout: Duration,
}

impl<G: TextGenerator> Extractor<G> {
    /// Create an extractor with default configuration.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            config: ExtractorConfig::default(),
            timeout: crate::types::config::Timeouts::default().generate,
        }
    }

    /// Set the extractor configuration.
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the per-call time budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Extract one source into a record outcome.
    pub async fn extract(&self, source: &ExtractionSource) -> Extraction {
        let prompt = format_extract_prompt(source, self.config.content_budget);
        tracing::debug!(url = %source.url, prompt_chars = prompt.len(), "Prompting {}", self.generator.name());

        let text = match guarded(
            FailureKind::Generation,
            self.timeout,
            self.generator.generate(&prompt),
        )
        .await
        {
            Ok(text) => text,
            Err(failure) => {
                tracing::warn!(url = %source.url, "Model call failed: {}", failure);
                return Extraction::Failed(failure);
            }
        };

        if text.trim().is_empty() {
            tracing::warn!(url = %source.url, "Model returned empty text");
            return Extraction::Failed(ProviderFailure::new(
                FailureKind::EmptyResponse,
                format!("empty model response for {}", source.url),
            ));
        }

        match parse_model_output(&text) {
            ModelOutput::Object(object) => {
                let record = JobRecord::from_model_object(&object, &source.url);
                if record.has_signal() {
                    tracing::info!(
                        url = %source.url,
                        company = %record.company_name,
                        title = %record.job_title,
                        "Extracted job record"
                    );
                    Extraction::Accepted(record)
                } else {
                    tracing::info!(url = %source.url, "Not a job posting, discarding");
                    Extraction::Rejected
                }
            }
            ModelOutput::Malformed(raw) => match self.config.malformed {
                MalformedPolicy::Recover => {
                    tracing::error!(url = %source.url, raw = %raw, "Failed to parse model output as JSON");
                    Extraction::Recovered {
                        record: JobRecord::recovered(&raw, &source.url),
                        raw,
                    }
                }
                MalformedPolicy::Discard => {
                    tracing::warn!(url = %source.url, raw = %raw, "Model output is not JSON, discarding");
                    Extraction::Discarded { raw }
                }
            },
        }
    }
}
