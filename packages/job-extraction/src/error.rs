//! Typed errors for the job extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Two layers exist:
//! - [`ProviderError`] is what a collaborator (search, crawl, model) returns.
//! - [`ProviderFailure`] is what the pipeline records once a call has been
//!   absorbed as a soft failure for a single item.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Errors returned by external collaborators (search, crawl, generation).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider answered with a non-success status
    #[error("{provider} API error ({status}): {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Provider answered with a body we could not interpret
    #[error("malformed {provider} response: {reason}")]
    MalformedResponse {
        provider: &'static str,
        reason: String,
    },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Call did not finish in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Wrap any transport error.
    pub fn http(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Http(Box::new(err))
    }
}

/// Errors raised while loading configuration.
///
/// These are the only errors allowed to stop a run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required credential is absent or still a placeholder
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// A value is present but unusable
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Errors raised while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem write failed
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failed
    #[error("report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Spreadsheet encoding failed
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Which stage of the pipeline a soft failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Search provider failed for a query
    Search,
    /// Crawl provider failed for an origin
    Crawl,
    /// Single-page content fetch failed
    Fetch,
    /// Text generation failed
    Generation,
    /// Any external call exceeded its time budget
    Timeout,
    /// Model returned nothing usable
    EmptyResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Search => "search",
            Self::Crawl => "crawl",
            Self::Fetch => "fetch",
            Self::Generation => "generation",
            Self::Timeout => "timeout",
            Self::EmptyResponse => "empty_response",
        };
        f.write_str(name)
    }
}

/// A per-item failure that has been absorbed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failure: {detail}")]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ProviderFailure {
    /// Create a new failure record.
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Classify a provider error raised while performing `kind`.
    pub fn from_error(kind: FailureKind, err: &ProviderError) -> Self {
        match err {
            ProviderError::Timeout(_) => Self::new(FailureKind::Timeout, err.to_string()),
            _ => Self::new(kind, err.to_string()),
        }
    }
}

/// Result type alias for collaborator calls.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Outcome of a guarded collaborator call: `Ok(value)` or an absorbed failure.
pub type CallOutcome<T> = std::result::Result<T, ProviderFailure>;
