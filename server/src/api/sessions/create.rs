use crate::api::{llm_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use platelens_core::{validate_photo, Session, MAX_FILE_SIZE};
use utoipa::ToSchema;

use super::SessionSnapshot;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateSessionRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "sessions",
    request_body(content_type = "multipart/form-data", content = CreateSessionRequest),
    responses(
        (status = 201, description = "Session created; first model round complete", body = SessionSnapshot),
        (status = 400, description = "Invalid or unsupported image", body = ErrorResponse),
        (status = 502, description = "Model call failed", body = ErrorResponse)
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Get the file from multipart
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file provided".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("Multipart read error: {}", e);
            let error_msg = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                format!("File too large. Maximum size is {} bytes", MAX_FILE_SIZE)
            } else {
                format!("Failed to read multipart data: {}", e.body_text())
            };
            return (e.status(), Json(ErrorResponse { error: error_msg })).into_response();
        }
    };

    // Read file data
    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            let error_msg = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                format!("File too large. Maximum size is {} bytes", MAX_FILE_SIZE)
            } else {
                format!("Failed to read file data: {}", e.body_text())
            };
            return (e.status(), Json(ErrorResponse { error: error_msg })).into_response();
        }
    };

    // Validate the image before anything goes near the network
    let photo = match validate_photo(data.to_vec()) {
        Ok(photo) => photo,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    };

    // First model round runs synchronously within this request
    let mut session = Session::new(photo);
    if let Err(e) = session.run_first_round(state.provider.as_ref()).await {
        return llm_error_response(&e).into_response();
    }

    tracing::info!(
        session = %session.id,
        stage = session.stage.as_str(),
        "created analysis session"
    );

    let snapshot = SessionSnapshot::from_session(&session);
    state.sessions.insert(session);

    (StatusCode::CREATED, Json(snapshot)).into_response()
}
