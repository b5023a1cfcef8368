//! Output seams: where a finished result set goes.
//!
//! Both collaborators are outside the extraction core. The pipeline hands a
//! finalized [`ResultSet`] to a [`ReportSink`] and only learns from the
//! [`Notifier`] whether delivery worked.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::types::run::ResultSet;

/// Persists a result set.
pub trait ReportSink: Send + Sync {
    /// Write the report and return where it landed.
    ///
    /// `stamp` is the filename-safe run timestamp.
    fn write(&self, results: &ResultSet, stamp: &str) -> Result<PathBuf, ReportError>;
}

/// Forwards a written report through some delivery channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver the report at `report`. Returns whether delivery succeeded.
    ///
    /// Failures are logged by the implementation, never raised.
    async fn notify(&self, report: &Path, results: &ResultSet) -> bool;
}
