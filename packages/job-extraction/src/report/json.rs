//! JSON file report sink.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::error::ReportError;
use crate::traits::sink::ReportSink;
use crate::types::run::ResultSet;

/// Writes `<dir>/<prefix>_<stamp>.json` with run metadata and records.
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    dir: PathBuf,
    prefix: String,
}

impl JsonReportSink {
    /// Write reports into `dir` with the default `legal_jobs` prefix.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "legal_jobs".to_string(),
        }
    }

    /// Set the file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Path a report for `stamp` would be written to.
    pub fn path_for(&self, stamp: &str) -> PathBuf {
        let name = format!("{}_{}.json", self.prefix, stamp)
            .replace(' ', "_")
            .replace(':', "-");
        self.dir.join(name)
    }
}

impl ReportSink for JsonReportSink {
    fn write(&self, results: &ResultSet, stamp: &str) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(stamp);

        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, results)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!(path = %path.display(), records = results.len(), "Job data saved");
        Ok(path)
    }
}
