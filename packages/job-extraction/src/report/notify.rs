//! Report delivery.

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;

use crate::traits::sink::Notifier;
use crate::types::run::ResultSet;

/// Notifier used when no delivery channel is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, report: &Path, _results: &ResultSet) -> bool {
        tracing::warn!(
            path = %report.display(),
            "Notification settings not configured, skipping delivery"
        );
        false
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    subject: String,
    text: String,
    file_name: String,
    report: serde_json::Value,
    records: usize,
    run_id: &'a uuid::Uuid,
}

/// POSTs the report as JSON to a webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    async fn deliver(&self, report: &Path, results: &ResultSet) -> Result<(), String> {
        let contents = tokio::fs::read_to_string(report)
            .await
            .map_err(|e| format!("cannot read {}: {}", report.display(), e))?;
        let report_json: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| format!("report is not JSON: {}", e))?;

        let metadata = results.metadata();
        let payload = WebhookPayload {
            subject: format!(
                "Daily Legal Job Postings - {}",
                metadata.started_at.format("%Y-%m-%d")
            ),
            text: format!(
                "Attached is today's report of {} legal job postings.\nThis report was generated on {}.",
                results.len(),
                metadata.scraped_on
            ),
            file_name: report
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            report: report_json,
            records: results.len(),
            run_id: &metadata.run_id,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("webhook answered {}", response.status()))
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, report: &Path, results: &ResultSet) -> bool {
        match self.deliver(report, results).await {
            Ok(()) => {
                tracing::info!(path = %report.display(), "Report notification sent");
                true
            }
            Err(e) => {
                tracing::error!("Failed to send report notification: {}", e);
                false
            }
        }
    }
}
