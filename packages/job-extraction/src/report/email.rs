//! SMTP delivery of the report as a mail attachment.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::Path;

use crate::security::Credential;
use crate::traits::sink::Notifier;
use crate::types::run::ResultSet;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Mail account and relay used for delivery.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub sender: String,
    pub password: Credential,
    pub recipient: String,
}

impl SmtpSettings {
    /// Gmail STARTTLS relay on port 587.
    pub fn gmail(sender: impl Into<String>, password: Credential, recipient: impl Into<String>) -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            sender: sender.into(),
            password,
            recipient: recipient.into(),
        }
    }
}

/// Emails the report file to a single recipient.
#[derive(Debug, Clone)]
pub struct SmtpNotifier {
    settings: SmtpSettings,
}

impl SmtpNotifier {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    /// Build the message: a short plain-text body plus the report attachment.
    pub fn build_message(
        &self,
        report: &Path,
        contents: Vec<u8>,
        results: &ResultSet,
    ) -> Result<Message, String> {
        let from: Mailbox = self
            .settings
            .sender
            .parse()
            .map_err(|e| format!("invalid sender address: {}", e))?;
        let to: Mailbox = self
            .settings
            .recipient
            .parse()
            .map_err(|e| format!("invalid recipient address: {}", e))?;

        let metadata = results.metadata();
        let body = format!(
            "Hello,\n\nAttached is today's report of {} legal job postings.\n\
             This report was generated on {}.\n\nRegards,\nJob Scout\n",
            results.len(),
            metadata.scraped_on
        );

        let file_name = report
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        let mime = match report.extension().and_then(|e| e.to_str()) {
            Some("xlsx") => XLSX_MIME,
            Some("json") => "application/json",
            _ => "application/octet-stream",
        };
        let content_type = ContentType::parse(mime).map_err(|e| e.to_string())?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(format!(
                "Daily Legal Job Postings - {}",
                metadata.started_at.format("%Y-%m-%d")
            ))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body))
                    .singlepart(Attachment::new(file_name).body(contents, content_type)),
            )
            .map_err(|e| e.to_string())
    }

    async fn deliver(&self, report: &Path, results: &ResultSet) -> Result<(), String> {
        let contents = tokio::fs::read(report)
            .await
            .map_err(|e| format!("cannot read {}: {}", report.display(), e))?;
        let message = self.build_message(report, contents, results)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)
            .map_err(|e| e.to_string())?
            .port(self.settings.port)
            .credentials(Credentials::new(
                self.settings.sender.clone(),
                self.settings.password.expose().to_string(),
            ))
            .build();

        mailer.send(message).await.map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, report: &Path, results: &ResultSet) -> bool {
        match self.deliver(report, results).await {
            Ok(()) => {
                tracing::info!(recipient = %self.settings.recipient, "Email notification sent");
                true
            }
            Err(e) => {
                tracing::error!("Failed to send email notification: {}", e);
                false
            }
        }
    }
}
