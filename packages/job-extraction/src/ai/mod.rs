//! Text generation providers.
//!
//! - `GeminiGenerator` - Google Gemini `generateContent`
//! - `OpenAIGenerator` - OpenAI chat completions
//! - `RateLimitedGenerator` - governor token bucket in front of any generator

pub mod gemini;
pub mod openai;
pub mod rate_limited;

pub use gemini::GeminiGenerator;
pub use openai::OpenAIGenerator;
pub use rate_limited::{GeneratorExt, RateLimitedGenerator};
