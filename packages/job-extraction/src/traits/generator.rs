//! Text generation trait for LLM calls.
//!
//! The extractor needs exactly one capability from a language model: turn a
//! prompt into text. Parsing and recovery happen in the pipeline, not here.

use async_trait::async_trait;

use crate::error::ProviderResult;

/// Text generation capability.
///
/// Implementations wrap specific LLM providers (Gemini, OpenAI, ...). They may
/// fail and may return empty text; callers must handle both.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> ProviderResult<String>;

    /// Provider/model label for logging.
    fn name(&self) -> &str {
        "generator"
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<T> {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        (**self).generate(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        (**self).generate(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
