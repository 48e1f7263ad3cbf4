use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

fn photo_response(content_type: &str, data: Vec<u8>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(data))
        .unwrap()
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/photo",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "The uploaded photo bytes"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn get_photo(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
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

    let session = session.lock().await;

    photo_response(&session.photo.content_type, session.photo.data.clone()).into_response()
}
