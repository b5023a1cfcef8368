use anyhow::Result;
use dotenvy::dotenv;
use job_extraction::security::Credential;
use job_extraction::{ConfigError, SmtpSettings};
use std::env;
use std::path::PathBuf;

/// Which language model backs extraction.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Gemini { api_key: Credential, model: String },
    OpenAI { api_key: Credential, model: String },
}

impl LlmProvider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gemini { .. } => "gemini",
            Self::OpenAI { .. } => "openai",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Self::Gemini { model, .. } | Self::OpenAI { model, .. } => model,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: Credential,
    pub llm: LlmProvider,
    /// Set only when sender, password and recipient are all configured.
    pub smtp: Option<SmtpSettings>,
    pub notify_webhook_url: Option<String>,
    pub report_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self::from_lookup(|key| env::var(key).ok())?)
    }

    /// Build configuration from any key lookup.
    ///
    /// Placeholder values from sample `.env` files count as unset. A Google
    /// key selects Gemini; otherwise an OpenAI key is required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let credential = |key: &str| lookup(key).and_then(|v| Credential::from_config(&v));

        let tavily_api_key =
            credential("TAVILY_API_KEY").ok_or(ConfigError::MissingCredential("TAVILY_API_KEY"))?;

        let google_key = credential("GOOGLE_API_KEY").or_else(|| credential("GEMINI_API_KEY"));
        let llm = match (google_key, credential("OPENAI_API_KEY")) {
            (Some(api_key), _) => LlmProvider::Gemini {
                api_key,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.5-flash".to_string()),
            },
            (None, Some(api_key)) => LlmProvider::OpenAI {
                api_key,
                model: lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            },
            (None, None) => {
                return Err(ConfigError::MissingCredential(
                    "GOOGLE_API_KEY or OPENAI_API_KEY",
                ))
            }
        };

        let notify_webhook_url = lookup("NOTIFY_WEBHOOK_URL").filter(|v| !v.trim().is_empty());
        if let Some(url) = &notify_webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    key: "NOTIFY_WEBHOOK_URL",
                    reason: format!("expected an http(s) URL, got {}", url),
                });
            }
        }

        Ok(Self {
            tavily_api_key,
            llm,
            smtp: smtp_settings(&lookup)?,
            notify_webhook_url,
            report_dir: lookup("REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

/// Mail settings, or `None` when any of the three account values is unset
/// or still a placeholder.
fn smtp_settings(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<SmtpSettings>, ConfigError> {
    let account = |key: &str| lookup(key).and_then(|v| Credential::from_config(&v));

    let (Some(sender), Some(password), Some(recipient)) = (
        account("EMAIL_SENDER"),
        account("EMAIL_PASSWORD"),
        account("EMAIL_RECIPIENT"),
    ) else {
        return Ok(None);
    };

    let mut settings = SmtpSettings::gmail(sender.expose(), password, recipient.expose());
    if let Some(host) = lookup("SMTP_HOST").filter(|h| !h.trim().is_empty()) {
        settings.host = host;
    }
    if let Some(port) = lookup("SMTP_PORT") {
        settings.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
            key: "SMTP_PORT",
            reason: format!("not a port number: {}", port),
        })?;
    }
    Ok(Some(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    const BASE: [(&str, &str); 2] = [("TAVILY_API_KEY", "tvly-key"), ("GOOGLE_API_KEY", "g-key")];

    fn with_base(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        BASE.iter().chain(extra).copied().collect()
    }

    #[test]
    fn test_missing_tavily_key_is_fatal() {
        let err = load(&[("GOOGLE_API_KEY", "g-key")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential("TAVILY_API_KEY")));
    }

    #[test]
    fn test_placeholder_counts_as_missing() {
        let err = load(&[
            ("TAVILY_API_KEY", "your_tavily_api_key"),
            ("GOOGLE_API_KEY", "g-key"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential("TAVILY_API_KEY")));
    }

    #[test]
    fn test_no_llm_key_is_fatal() {
        let err = load(&[("TAVILY_API_KEY", "tvly-key")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }

    #[test]
    fn test_google_key_selects_gemini() {
        let config = load(&[
            ("TAVILY_API_KEY", "tvly-key"),
            ("GOOGLE_API_KEY", "g-key"),
            ("OPENAI_API_KEY", "sk-key"),
        ])
        .unwrap();
        assert_eq!(config.llm.name(), "gemini");
        assert_eq!(config.llm.model(), "gemini-2.5-flash");
        assert_eq!(config.report_dir, PathBuf::from("."));
        assert!(config.notify_webhook_url.is_none());
        assert!(config.smtp.is_none());
    }

    #[test]
    fn test_openai_fallback_with_model_override() {
        let config = load(&[
            ("TAVILY_API_KEY", "tvly-key"),
            ("GEMINI_API_KEY", "your_gemini_api_key"),
            ("OPENAI_API_KEY", "sk-key"),
            ("OPENAI_MODEL", "gpt-4o"),
        ])
        .unwrap();
        assert_eq!(config.llm.name(), "openai");
        assert_eq!(config.llm.model(), "gpt-4o");
    }

    #[test]
    fn test_invalid_webhook_url_rejected() {
        let err = load(&with_base(&[("NOTIFY_WEBHOOK_URL", "smtp.gmail.com")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "NOTIFY_WEBHOOK_URL", .. }));
    }

    #[test]
    fn test_email_settings_loaded() {
        let config = load(&with_base(&[
            ("EMAIL_SENDER", "scout@firm.in"),
            ("EMAIL_PASSWORD", "app-pass"),
            ("EMAIL_RECIPIENT", "hr@firm.in"),
        ]))
        .unwrap();
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.gmail.com");
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.sender, "scout@firm.in");
        assert_eq!(smtp.recipient, "hr@firm.in");
        assert_eq!(smtp.password.expose(), "app-pass");
    }

    #[test]
    fn test_placeholder_email_settings_mean_not_configured() {
        let config = load(&with_base(&[
            ("EMAIL_SENDER", "your_email@gmail.com"),
            ("EMAIL_PASSWORD", "your_app_password"),
            ("EMAIL_RECIPIENT", "recipient_email@example.com"),
        ]))
        .unwrap();
        assert!(config.smtp.is_none());

        let partial = load(&with_base(&[
            ("EMAIL_SENDER", "scout@firm.in"),
            ("EMAIL_PASSWORD", "your_app_password"),
            ("EMAIL_RECIPIENT", "hr@firm.in"),
        ]))
        .unwrap();
        assert!(partial.smtp.is_none());
    }

    #[test]
    fn test_smtp_overrides() {
        let config = load(&with_base(&[
            ("EMAIL_SENDER", "scout@firm.in"),
            ("EMAIL_PASSWORD", "app-pass"),
            ("EMAIL_RECIPIENT", "hr@firm.in"),
            ("SMTP_HOST", "mail.firm.in"),
            ("SMTP_PORT", "2525"),
        ]))
        .unwrap();
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "mail.firm.in");
        assert_eq!(smtp.port, 2525);

        let err = load(&with_base(&[
            ("EMAIL_SENDER", "scout@firm.in"),
            ("EMAIL_PASSWORD", "app-pass"),
            ("EMAIL_RECIPIENT", "hr@firm.in"),
            ("SMTP_PORT", "smtp"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SMTP_PORT", .. }));
    }

    #[test]
    fn test_secrets_redacted_in_debug() {
        let config = load(&with_base(&[
            ("EMAIL_SENDER", "scout@firm.in"),
            ("EMAIL_PASSWORD", "mail-secret"),
            ("EMAIL_RECIPIENT", "hr@firm.in"),
        ]))
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("tvly-key"));
        assert!(!debug.contains("g-key"));
        assert!(!debug.contains("mail-secret"));
    }
}
