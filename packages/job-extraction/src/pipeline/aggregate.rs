//! Aggregator - owns the growing result set for the duration of one run.

use chrono::Utc;
use std::collections::HashSet;

use crate::error::ProviderFailure;
use crate::pipeline::extract::Extraction;
use crate::types::{
    record::JobRecord,
    run::{ResultSet, RunMetadata, RunStamp},
};

/// Collects accepted records in arrival order and finalizes the run.
///
/// URL dedup is an opt-in extension: when enabled, a record whose normalized
/// `source_url` was already appended is dropped and counted as a duplicate.
#[derive(Debug)]
pub struct Aggregator {
    records: Vec<JobRecord>,
    metadata: RunMetadata,
    seen_urls: Option<HashSet<String>>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Create an aggregator without dedup.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            metadata: RunMetadata::start(),
            seen_urls: None,
        }
    }

    /// Enable URL-level dedup across the run.
    pub fn with_url_dedup(mut self) -> Self {
        self.seen_urls = Some(HashSet::new());
        self
    }

    /// Append a record. Returns false when dedup dropped it.
    pub fn append(&mut self, record: JobRecord) -> bool {
        if let Some(seen) = self.seen_urls.as_mut() {
            let key = record
                .source_url
                .trim()
                .trim_end_matches('/')
                .to_ascii_lowercase();
            if !seen.insert(key) {
                tracing::debug!(url = %record.source_url, "Skipping duplicate posting URL");
                self.metadata.duplicates += 1;
                return false;
            }
        }
        self.records.push(record);
        true
    }

    /// Fold an extraction outcome into the run, appending any record.
    pub fn absorb(&mut self, outcome: Extraction) {
        self.metadata.extraction_attempts += 1;
        match outcome {
            Extraction::Accepted(record) => {
                self.append(record);
            }
            Extraction::Recovered { record, .. } => {
                self.metadata.recovered += 1;
                self.append(record);
            }
            Extraction::Rejected => self.metadata.rejected += 1,
            Extraction::Discarded { .. } => self.metadata.discarded += 1,
            Extraction::Failed(failure) => self.record_failure(&failure),
        }
    }

    /// Count a soft failure from any stage.
    pub fn record_failure(&mut self, failure: &ProviderFailure) {
        tracing::debug!(kind = %failure.kind, "Recording soft failure");
        self.metadata.failures += 1;
    }

    pub fn record_query(&mut self) {
        self.metadata.queries += 1;
    }

    pub fn record_hits(&mut self, count: usize) {
        self.metadata.hits += count;
    }

    pub fn record_candidates(&mut self, count: usize) {
        self.metadata.candidates += count;
    }

    /// Records appended so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stamp every record with the run timestamp and hand over the result set.
    pub fn finalize(self, stamp: &RunStamp) -> ResultSet {
        let scraped_on = stamp.display();
        let Self {
            mut records,
            mut metadata,
            ..
        } = self;

        for record in &mut records {
            record.scraped_on = scraped_on.clone();
        }

        metadata.records = records.len();
        metadata.scraped_on = scraped_on;
        metadata.finished_at = Some(Utc::now());

        ResultSet::new(metadata, records)
    }
}
