//! Provider credentials.
//!
//! API keys and the SMTP password live in a [`Credential`], backed by
//! `secrecy`, so they never show up in `Debug` output or logs. Values copied
//! verbatim from a sample `.env` count as unset.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// Sample values that mean "not configured".
const PLACEHOLDERS: &[&str] = &[
    "your_tavily_api_key",
    "your_gemini_api_key",
    "your_openai_api_key",
    "your_email@gmail.com",
    "your_app_password",
    "recipient_email@example.com",
    "changeme",
];

/// A configured secret: an API key or a mail password.
pub struct Credential(SecretBox<str>);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// Build a credential from a raw configuration value.
    ///
    /// Returns `None` for blank or placeholder values.
    pub fn from_config(value: &str) -> Option<Self> {
        if is_placeholder(value) {
            None
        } else {
            Some(Self::new(value.trim()))
        }
    }

    /// The secret itself, for the request that needs it.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<{} chars>)", self.expose().chars().count())
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// True when a configured value is blank or one of the sample placeholders.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || PLACEHOLDERS.contains(&trimmed)
        || (trimmed.starts_with("your_") && trimmed.ends_with("_key"))
}
