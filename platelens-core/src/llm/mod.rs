//! Vision model provider abstraction.
//!
//! This module provides a trait-based abstraction over hosted vision-language
//! models (Gemini) with a fake implementation for testing.

mod fake;
mod gemini;

pub use fake::FakeProvider;
pub use gemini::GeminiProvider;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::image::MealPhoto;

/// Error type for model operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for vision model providers.
///
/// Implementations should be stateless and thread-safe. Each call sends the
/// photo together with the prompt and returns the model's raw text response;
/// conversation state lives with the caller, not the provider.
#[async_trait]
pub trait VisionProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and a photo to the model and get a text response.
    async fn estimate(&self, prompt: &str, photo: &MealPhoto) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "gemini", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "gemini-1.5-pro-latest").
    fn model_name(&self) -> &str;
}

/// Create a provider from environment variables.
///
/// - PLATELENS_PROVIDER: "gemini" (default) | "fake"
/// - GEMINI_API_KEY: API key, required for the gemini provider
/// - PLATELENS_AI_MODEL: Model name (default: "gemini-1.5-pro-latest")
pub fn create_provider_from_env() -> Result<Box<dyn VisionProvider>, LlmError> {
    let provider = std::env::var("PLATELENS_PROVIDER").unwrap_or_else(|_| "gemini".to_string());

    match provider.as_str() {
        "fake" => Ok(Box::new(FakeProvider::default())),
        "gemini" => {
            let api_key = std::env::var("GEMINI_API_KEY")
                .map_err(|_| LlmError::NotConfigured("GEMINI_API_KEY not set".to_string()))?;
            let model = std::env::var("PLATELENS_AI_MODEL")
                .unwrap_or_else(|_| gemini::DEFAULT_MODEL.to_string());
            Ok(Box::new(GeminiProvider::new(api_key, model)))
        }
        other => Err(LlmError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
