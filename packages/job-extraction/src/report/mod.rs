//! Report sinks and notifiers.
//!
//! - `XlsxReportSink` - one spreadsheet row per record (default)
//! - `JsonReportSink` - records plus run metadata as JSON
//! - `SmtpNotifier` - mails the report as an attachment
//! - `WebhookNotifier` / `DisabledNotifier`

pub mod email;
pub mod json;
pub mod notify;
pub mod table;
pub mod xlsx;

pub use email::{SmtpNotifier, SmtpSettings};
pub use json::JsonReportSink;
pub use notify::{DisabledNotifier, WebhookNotifier};
pub use table::{record_row, REPORT_COLUMNS};
pub use xlsx::XlsxReportSink;
