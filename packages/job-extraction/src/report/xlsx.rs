//! Spreadsheet report sink.

use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::PathBuf;

use crate::error::ReportError;
use crate::pipeline::truncate_chars;
use crate::report::table::{record_row, REPORT_COLUMNS};
use crate::traits::sink::ReportSink;
use crate::types::run::ResultSet;

/// Excel's per-cell character limit.
const MAX_CELL_CHARS: usize = 32_767;

/// Writes `<dir>/<prefix>_<stamp>.xlsx`: a header row, then one row per
/// record in discovery order.
#[derive(Debug, Clone)]
pub struct XlsxReportSink {
    dir: PathBuf,
    prefix: String,
    sheet: String,
}

impl XlsxReportSink {
    /// Write reports into `dir` with the default `legal_jobs` prefix.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "legal_jobs".to_string(),
            sheet: "Jobs".to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet = name.into();
        self
    }

    /// Path a report for `stamp` would be written to.
    pub fn path_for(&self, stamp: &str) -> PathBuf {
        let name = format!("{}_{}.xlsx", self.prefix, stamp)
            .replace(' ', "_")
            .replace(':', "-");
        self.dir.join(name)
    }
}

impl ReportSink for XlsxReportSink {
    fn write(&self, results: &ResultSet, stamp: &str) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(stamp);

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet)?;

        for (col, title) in REPORT_COLUMNS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header)?;
        }
        for (idx, record) in results.records().iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, value) in record_row(record).iter().enumerate() {
                sheet.write_string(row, col as u16, truncate_chars(value, MAX_CELL_CHARS))?;
            }
        }
        sheet.set_freeze_panes(1, 0)?;

        workbook.save(&path)?;

        tracing::info!(path = %path.display(), records = results.len(), "Job data saved");
        Ok(path)
    }
}
