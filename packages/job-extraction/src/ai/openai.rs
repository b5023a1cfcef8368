//! OpenAI implementation of [`TextGenerator`].
//!
//! Plain chat completions; the extraction prompt goes in the user turn.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};
use crate::security::Credential;
use crate::traits::generator::TextGenerator;

const PROVIDER: &str = "openai";

const SYSTEM_PROMPT: &str = "You extract structured job postings and reply with JSON only.";

/// OpenAI chat-completions client.
#[derive(Clone)]
pub struct OpenAIGenerator {
    client: Client,
    api_key: Credential,
    model: String,
    base_url: String,
}

impl OpenAIGenerator {
    /// Create a client with the default model (`gpt-4o-mini`).
    pub fn new(api_key: impl Into<Credential>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
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
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl TextGenerator for OpenAIGenerator {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(prompt.to_string()),
                },
            ],
            temperature: 0.0,
            max_tokens: 1024,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose())
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

        let chat_response: ChatResponse = response.json().await.map_err(ProviderError::http)?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| ProviderError::MalformedResponse {
                provider: PROVIDER,
                reason: "no choices in response".to_string(),
            })
    }

    fn name(&self) -> &str {
        &self.model
    }
}
