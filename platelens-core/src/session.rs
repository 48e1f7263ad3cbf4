//! The conversation controller: a session-scoped state machine driving the
//! one-or-two round analysis flow.
//!
//! A session owns the photo and the conversation transcript. Exactly one
//! follow-up round is supported; whatever the model says in the second round
//! is treated as final.

use uuid::Uuid;

use crate::error::SessionError;
use crate::image::MealPhoto;
use crate::interpret::{interpret_reply, ModelReply};
use crate::llm::{LlmError, VisionProvider};
use crate::prompts::{render_followup_prompt, render_meal_estimate_prompt};
use crate::types::{Breakdown, ConversationTurn};

/// Stage of the analysis flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingImage,
    AwaitingFirstModelResponse,
    AwaitingUserAnswer,
    AwaitingSecondModelResponse,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::AwaitingImage => "awaiting_image",
            Stage::AwaitingFirstModelResponse => "awaiting_first_model_response",
            Stage::AwaitingUserAnswer => "awaiting_user_answer",
            Stage::AwaitingSecondModelResponse => "awaiting_second_model_response",
            Stage::Done => "done",
        }
    }
}

/// Terminal outcome of a session.
#[derive(Debug, Clone)]
pub enum SessionResult {
    /// The model produced a recognizable final breakdown.
    Breakdown(Breakdown),
    /// The model produced something else; shown to the user as-is.
    RawText(String),
}

/// One user's analysis session. Held in memory only and passed explicitly;
/// there is no ambient conversation state.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub photo: MealPhoto,
    pub turns: Vec<ConversationTurn>,
    pub stage: Stage,
    /// The model's clarifying question, while one is outstanding or answered.
    pub question: Option<String>,
    /// The user's answer to the clarifying question, once given.
    pub answer: Option<String>,
    pub result: Option<SessionResult>,
}

impl Session {
    /// Create a session for a validated photo.
    pub fn new(photo: MealPhoto) -> Self {
        Self {
            id: Uuid::new_v4(),
            photo,
            turns: Vec::new(),
            stage: Stage::AwaitingImage,
            question: None,
            answer: None,
            result: None,
        }
    }

    /// First round: send the photo with the estimate prompt and classify the
    /// reply.
    ///
    /// A question moves the session to `AwaitingUserAnswer`; a breakdown or
    /// an unrecognized reply ends the session.
    pub async fn run_first_round(
        &mut self,
        provider: &dyn VisionProvider,
    ) -> Result<(), LlmError> {
        self.stage = Stage::AwaitingFirstModelResponse;

        let prompt = render_meal_estimate_prompt();
        let reply = provider.estimate(&prompt, &self.photo).await?;
        self.turns.push(ConversationTurn {
            prompt,
            response: reply.clone(),
        });

        match interpret_reply(&reply) {
            ModelReply::Question(question) => {
                tracing::debug!(session = %self.id, "model asked a clarifying question");
                self.question = Some(question);
                self.stage = Stage::AwaitingUserAnswer;
            }
            ModelReply::Breakdown(breakdown) => {
                self.result = Some(SessionResult::Breakdown(breakdown));
                self.stage = Stage::Done;
            }
            ModelReply::Unrecognized(text) => {
                tracing::warn!(session = %self.id, "model reply not interpretable, showing raw text");
                self.result = Some(SessionResult::RawText(text));
                self.stage = Stage::Done;
            }
        }

        Ok(())
    }

    /// Second round: resend the photo with the question-and-answer prompt.
    ///
    /// The reply is final regardless of its shape. If the model call itself
    /// fails, the session returns to `AwaitingUserAnswer` so the user can
    /// retry the answer.
    pub async fn run_answer_round(
        &mut self,
        provider: &dyn VisionProvider,
        answer: &str,
    ) -> Result<(), SessionError> {
        if self.stage != Stage::AwaitingUserAnswer {
            return Err(SessionError::NotAwaitingAnswer);
        }
        // Stage guarantees a question is outstanding
        let question = self.question.clone().unwrap_or_default();

        self.stage = Stage::AwaitingSecondModelResponse;

        let prompt = render_followup_prompt(&question, answer);
        let reply = match provider.estimate(&prompt, &self.photo).await {
            Ok(reply) => reply,
            Err(e) => {
                self.stage = Stage::AwaitingUserAnswer;
                return Err(e.into());
            }
        };

        self.answer = Some(answer.to_string());
        self.turns.push(ConversationTurn {
            prompt,
            response: reply.clone(),
        });

        self.result = Some(match interpret_reply(&reply) {
            ModelReply::Breakdown(breakdown) => SessionResult::Breakdown(breakdown),
            // No further rounds: a second question or anything else is shown raw
            ModelReply::Question(_) | ModelReply::Unrecognized(_) => SessionResult::RawText(reply),
        });
        self.stage = Stage::Done;

        Ok(())
    }

    /// The final breakdown, if the session ended with one.
    pub fn breakdown(&self) -> Option<&Breakdown> {
        match &self.result {
            Some(SessionResult::Breakdown(b)) => Some(b),
            _ => None,
        }
    }
}
