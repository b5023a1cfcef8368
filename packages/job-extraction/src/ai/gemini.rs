//! Google Gemini implementation of [`TextGenerator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use job_extraction::ai::GeminiGenerator;
//!
//! let llm = GeminiGenerator::new(api_key).with_model("gemini-2.5-flash");
//! let text = llm.generate("Say hi").await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};
use crate::security::Credential;
use crate::traits::generator::TextGenerator;

const PROVIDER: &str = "gemini";

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    api_key: Credential,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    /// Create a client with the default model (`gemini-2.5-flash`).
    pub fn new(api_key: impl Into<Credential>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Concatenate the text parts of the first candidate.
fn response_text(response: GenerateResponse) -> ProviderResult<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse {
            provider: PROVIDER,
            reason: "no candidates (prompt may have been blocked)".to_string(),
        })?;

    Ok(candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .unwrap_or_default())
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", self.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status,
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(ProviderError::http)?;
        response_text(parsed)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
