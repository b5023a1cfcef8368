//! Run-level types: the shared timestamp, metadata and the final result set.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record::JobRecord;

/// The single timestamp shared by every record of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStamp {
    at: DateTime<Local>,
}

impl RunStamp {
    /// Stamp the current local time.
    pub fn now() -> Self {
        Self { at: Local::now() }
    }

    /// Stamp a fixed time.
    pub fn at(at: DateTime<Local>) -> Self {
        Self { at }
    }

    /// Form written into each record's `scraped_on`.
    pub fn display(&self) -> String {
        self.at.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Form safe for use in a file name.
    pub fn file_safe(&self) -> String {
        self.at.format("%Y-%m-%d_%H-%M").to_string()
    }

    pub fn datetime(&self) -> DateTime<Local> {
        self.at
    }
}

/// Counters and identity for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub scraped_on: String,
    pub queries: usize,
    pub hits: usize,
    pub candidates: usize,
    pub extraction_attempts: usize,
    pub records: usize,
    /// Records built from unparseable model output
    pub recovered: usize,
    /// Parsed objects discarded by the acceptance gate
    pub rejected: usize,
    /// Unparseable outputs dropped under the discard policy
    #[serde(default)]
    pub discarded: usize,
    /// Records dropped by opt-in URL dedup
    pub duplicates: usize,
    /// Soft failures across all stages
    pub failures: usize,
}

impl RunMetadata {
    /// Fresh metadata for a run starting now.
    pub fn start() -> Self {
        Self {
            run_id: Uuid::now_v7(),
            started_at: Utc::now(),
            finished_at: None,
            scraped_on: String::new(),
            queries: 0,
            hits: 0,
            candidates: 0,
            extraction_attempts: 0,
            records: 0,
            recovered: 0,
            rejected: 0,
            discarded: 0,
            duplicates: 0,
            failures: 0,
        }
    }
}

/// The ordered, finalized output of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    metadata: RunMetadata,
    records: Vec<JobRecord>,
}

impl ResultSet {
    pub(crate) fn new(metadata: RunMetadata, records: Vec<JobRecord>) -> Self {
        Self { metadata, records }
    }

    /// Records in discovery order.
    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stamp_formats() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();
        let stamp = RunStamp::at(at);
        assert_eq!(stamp.display(), "2024-03-09 07:05");
        assert_eq!(stamp.file_safe(), "2024-03-09_07-05");
        assert!(!stamp.file_safe().contains(':'));
        assert!(!stamp.file_safe().contains(' '));
    }
}
