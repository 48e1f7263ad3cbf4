use crate::api::{llm_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use platelens_core::SessionError;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::SessionSnapshot;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnswerRequest {
    /// Free-text answer to the model's clarifying question. Accepted verbatim.
    pub answer: String,
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/answer",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = AnswerRequest,
    responses(
        (status = 200, description = "Final session state", body = SessionSnapshot),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "Session is not awaiting an answer", body = ErrorResponse),
        (status = 502, description = "Model call failed", body = ErrorResponse)
    )
)]
pub async fn answer_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> impl IntoResponse {
    let session = match state.sessions.get(&id) {
        Some(session) => session,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Session not found".to_string(),
                }),
            )
                .into_response()
        }
    };

    let mut session = session.lock().await;

    match session
        .run_answer_round(state.provider.as_ref(), &request.answer)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(SessionSnapshot::from_session(&session))).into_response(),
        Err(SessionError::NotAwaitingAnswer) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Session is not awaiting an answer".to_string(),
            }),
        )
            .into_response(),
        Err(SessionError::Llm(e)) => llm_error_response(&e).into_response(),
    }
}
