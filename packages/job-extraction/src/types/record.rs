//! The canonical structured job record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the model is asked to emit, in prompt order.
pub const MODEL_KEYS: [&str; 11] = [
    "company_name",
    "job_title",
    "recruiter",
    "email",
    "phone",
    "location",
    "summary",
    "application_link",
    "posted_date",
    "still_available",
    "job_department",
];

/// One structured job posting.
///
/// Every field is a string. Missing information is an empty string, never
/// an absent key: the extractor enforces this whatever the model returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub company_name: String,
    pub job_title: String,
    pub recruiter: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub application_link: String,
    pub posted_date: String,
    /// Page or hit URL the record was extracted from. Always populated.
    pub source_url: String,
    pub still_available: String,
    pub job_department: String,
    /// Run timestamp; empty until the aggregator finalizes the run.
    pub scraped_on: String,
}

impl JobRecord {
    /// Build a record from a parsed model object.
    ///
    /// Unknown keys are ignored, missing keys become empty strings and
    /// non-string values are rendered to text.
    pub fn from_model_object(object: &Map<String, Value>, source_url: &str) -> Self {
        let field = |key: &str| object.get(key).map(value_to_text).unwrap_or_default();

        let mut record = Self {
            company_name: field("company_name"),
            job_title: field("job_title"),
            recruiter: field("recruiter"),
            email: field("email"),
            phone: field("phone"),
            location: field("location"),
            summary: field("summary"),
            application_link: field("application_link"),
            posted_date: field("posted_date"),
            source_url: source_url.to_string(),
            still_available: field("still_available"),
            job_department: field("job_department"),
            scraped_on: String::new(),
        };
        if record.application_link.is_empty() {
            record.application_link = source_url.to_string();
        }
        record
    }

    /// Degraded record that keeps unparseable model output for human review.
    pub fn recovered(raw_output: &str, source_url: &str) -> Self {
        Self {
            summary: raw_output.to_string(),
            application_link: source_url.to_string(),
            source_url: source_url.to_string(),
            ..Default::default()
        }
    }

    /// Minimal-signal check: a company or a title must be present.
    pub fn has_signal(&self) -> bool {
        !self.company_name.trim().is_empty() || !self.job_title.trim().is_empty()
    }
}

/// Render a JSON value as record text.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
