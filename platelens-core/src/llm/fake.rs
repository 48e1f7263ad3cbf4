//! Fake vision provider for testing.
//!
//! Returns deterministic responses based on prompt matching, allowing tests
//! to run without network access or API costs.

use super::{LlmError, VisionProvider};
use crate::image::MealPhoto;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

/// A fake vision provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring. If no match is found, returns a default response or error.
/// Calls are counted so tests can assert that no request was made.
#[derive(Debug)]
pub struct FakeProvider {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
    calls: AtomicU32,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
            calls: AtomicU32::new(0),
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            calls: AtomicU32::new(0),
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts
    /// containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Number of estimate calls made against this provider.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl VisionProvider for FakeProvider {
    async fn estimate(&self, prompt: &str, _photo: &MealPhoto) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let responses = self.responses.read().unwrap();

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        // Return default or error
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                &prompt[..prompt.len().min(100)]
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> MealPhoto {
        MealPhoto {
            data: vec![0xFF, 0xD8],
            content_type: "image/jpeg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::with_response("clarifying", r#"{"question": "how big?"}"#);
        let result = provider
            .estimate("ask one short clarifying question", &photo())
            .await
            .unwrap();
        assert_eq!(result, r#"{"question": "how big?"}"#);
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.estimate("random prompt", &photo()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_default_response() {
        let provider = FakeProvider::new().with_default_response("default");
        let result = provider.estimate("random prompt", &photo()).await.unwrap();
        assert_eq!(result, "default");
    }

    #[tokio::test]
    async fn test_fake_provider_counts_calls() {
        let provider = FakeProvider::default();
        assert_eq!(provider.call_count(), 0);
        provider.estimate("one", &photo()).await.unwrap();
        provider.estimate("two", &photo()).await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }
}
