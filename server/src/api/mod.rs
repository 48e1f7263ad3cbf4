pub mod sessions;

use axum::http::StatusCode;
use axum::Json;
use platelens_core::llm::LlmError;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a model error to the status code and user-facing message shown for it.
///
/// Nothing is retried and no distinction is made between transient and
/// permanent failures; the current interaction simply ends with this message.
pub fn llm_error_response(err: &LlmError) -> (StatusCode, Json<ErrorResponse>) {
    tracing::warn!(error = %err, "model call failed");

    let (status, message) = match err {
        LlmError::NotConfigured(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Vision provider is not configured".to_string(),
        ),
        LlmError::RateLimited { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "The model is currently rate limiting requests. Try again shortly".to_string(),
        ),
        LlmError::ApiError { status, .. } if *status == 401 || *status == 403 => (
            StatusCode::BAD_GATEWAY,
            "Authentication with the model provider failed".to_string(),
        ),
        LlmError::ApiError { status, message } => (
            StatusCode::BAD_GATEWAY,
            format!("The model provider returned an error ({}): {}", status, message),
        ),
        LlmError::RequestFailed(_) => (
            StatusCode::BAD_GATEWAY,
            "Failed to reach the model provider".to_string(),
        ),
        LlmError::ParseError(_) => (
            StatusCode::BAD_GATEWAY,
            "The model returned an unusable response".to_string(),
        ),
    };

    (status, Json(ErrorResponse { error: message }))
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![sessions::ApiDoc::openapi()];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
