//! Job Scout application: configuration, CLI and provider wiring around the
//! `job-extraction` pipeline.

pub mod cli;
pub mod config;

use job_extraction::ai::{GeminiGenerator, OpenAIGenerator};
use job_extraction::{DisabledNotifier, Notifier, SmtpNotifier, TextGenerator, WebhookNotifier};

use crate::config::{Config, LlmProvider};

/// Build the configured language model client.
pub fn build_generator(config: &Config) -> Box<dyn TextGenerator> {
    match &config.llm {
        LlmProvider::Gemini { api_key, model } => {
            Box::new(GeminiGenerator::new(api_key.clone()).with_model(model.clone()))
        }
        LlmProvider::OpenAI { api_key, model } => {
            Box::new(OpenAIGenerator::new(api_key.clone()).with_model(model.clone()))
        }
    }
}

/// Build the report notifier: email first, then webhook, else delivery is
/// skipped.
pub fn build_notifier(config: &Config) -> Box<dyn Notifier> {
    if let Some(smtp) = &config.smtp {
        return Box::new(SmtpNotifier::new(smtp.clone()));
    }
    match &config.notify_webhook_url {
        Some(url) => Box::new(WebhookNotifier::new(url.clone())),
        None => Box::new(DisabledNotifier),
    }
}
