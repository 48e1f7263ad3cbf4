pub mod answer;
pub mod create;
pub mod get;
pub mod photo;

use axum::routing::{get, post};
use axum::Router;
use platelens_core::{Session, SessionResult};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::AppState;

/// Returns the router for session endpoints (mounted at /api/sessions)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_session))
        .route("/{id}", get(get::get_session))
        .route("/{id}/photo", get(photo::get_photo))
        .route("/{id}/answer", post(answer::answer_question))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_session,
        get::get_session,
        photo::get_photo,
        answer::answer_question,
    ),
    components(schemas(
        create::CreateSessionRequest,
        answer::AnswerRequest,
        SessionSnapshot,
        FoodItem,
        MealTotals,
    ))
)]
pub struct ApiDoc;

/// Point-in-time view of a session, returned by every session endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionSnapshot {
    pub id: Uuid,
    /// Current stage of the flow (e.g., "awaiting_user_answer", "done")
    pub stage: String,
    /// The model's clarifying question, if one was asked
    pub question: Option<String>,
    /// The user's answer to the question, once given
    pub answer: Option<String>,
    /// Per-item estimates, present when the session ended in a breakdown
    pub items: Option<Vec<FoodItem>>,
    /// Sum of the per-item values
    pub total: Option<MealTotals>,
    /// Raw model text, present when the reply was not interpretable
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FoodItem {
    pub name: String,
    pub portion: Option<String>,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MealTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl SessionSnapshot {
    pub fn from_session(session: &Session) -> Self {
        let (items, total, raw_text) = match &session.result {
            Some(SessionResult::Breakdown(b)) => (
                Some(
                    b.items
                        .iter()
                        .map(|item| FoodItem {
                            name: item.name.clone(),
                            portion: item.portion.clone(),
                            calories: item.calories,
                            protein_g: item.protein_g,
                            carbs_g: item.carbs_g,
                            fat_g: item.fat_g,
                        })
                        .collect(),
                ),
                Some(MealTotals {
                    calories: b.total.calories,
                    protein_g: b.total.protein_g,
                    carbs_g: b.total.carbs_g,
                    fat_g: b.total.fat_g,
                }),
                None,
            ),
            Some(SessionResult::RawText(text)) => (None, None, Some(text.clone())),
            None => (None, None, None),
        };

        Self {
            id: session.id,
            stage: session.stage.as_str().to_string(),
            question: session.question.clone(),
            answer: session.answer.clone(),
            items,
            total,
            raw_text,
        }
    }
}
