//! Gemini (Google AI) vision provider.

use super::{LlmError, VisionProvider};
use crate::image::MealPhoto;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API provider.
#[derive(Debug)]
pub struct GeminiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new GeminiProvider with the given API key and model.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

/// Gemini generateContent request format.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<Blob>,
}

#[derive(Debug, Serialize)]
struct Blob {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

/// Gemini generateContent response format.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

/// Error response from the Gemini API.
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiApiError,
}

fn build_request(prompt: &str, photo: &MealPhoto) -> GeminiRequest {
    GeminiRequest {
        contents: vec![RequestContent {
            role: "user".to_string(),
            parts: vec![
                RequestPart {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                },
                RequestPart {
                    text: None,
                    inline_data: Some(Blob {
                        mime_type: photo.content_type.clone(),
                        data: general_purpose::STANDARD.encode(&photo.data),
                    }),
                },
            ],
        }],
    }
}

#[async_trait]
impl VisionProvider for GeminiProvider {
    async fn estimate(&self, prompt: &str, photo: &MealPhoto) -> Result<String, LlmError> {
        let request = build_request(prompt, photo);
        let url = format!("{}/models/{}:generateContent", BASE_URL, self.model);

        tracing::debug!(model = %self.model, "calling Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if status != 200 {
            // Try to parse error response
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                return Err(LlmError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(LlmError::ApiError {
                status,
                message: body,
            });
        }

        let response: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::ParseError(e.to_string()))?;

        // Extract text from the first candidate's first text part
        let text = response
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or_else(|| LlmError::ParseError("No text content in response".to_string()))?;

        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let photo = MealPhoto {
            data: vec![1, 2, 3],
            content_type: "image/png".to_string(),
        };
        let request = build_request("describe this meal", &photo);
        let json = serde_json::to_value(&request).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "describe this meal");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "AQID");
        // the text part must not carry an inlineData key and vice versa
        assert!(parts[0].get("inlineData").is_none());
        assert!(parts[1].get("text").is_none());
    }
}
