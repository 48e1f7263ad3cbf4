//! End-to-end tests for the analysis flow against the fake provider.
//!
//! These cover the observable properties of the conversation controller:
//! rejected images never reach the model, totals are the sum of the items,
//! a question defers the breakdown to the second round, and uninterpretable
//! replies end the flow with the raw text rather than an error.

use platelens_core::llm::FakeProvider;
use platelens_core::{validate_photo, MealPhoto, Session, SessionResult, Stage};

// 8-byte PNG signature; enough for format detection.
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn png_photo() -> MealPhoto {
    validate_photo(PNG_MAGIC.to_vec()).expect("png fixture should validate")
}

#[test]
fn rejected_image_halts_before_any_model_call() {
    let provider = FakeProvider::default();

    let result = validate_photo(b"definitely not an image".to_vec());

    assert!(result.is_err());
    // The flow never constructed a session, so the provider was never called
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn breakdown_total_is_sum_of_item_values() {
    let reply = r#"{"breakdown": [
        {"item": "Chicken", "calories": 200, "protein_grams": 30, "carbs_grams": 0, "fat_grams": 8},
        {"item": "Rice", "calories": 350, "protein_grams": 7, "carbs_grams": 70, "fat_grams": 2}
    ]}"#;
    let provider = FakeProvider::new().with_default_response(reply);

    let mut session = Session::new(png_photo());
    session.run_first_round(&provider).await.unwrap();

    assert_eq!(session.stage, Stage::Done);
    let breakdown = session.breakdown().expect("final breakdown");
    assert_eq!(breakdown.items.len(), 2);
    assert_eq!(breakdown.total.calories, 550.0);
    assert_eq!(breakdown.total.protein_g, 37.0);
    assert_eq!(breakdown.total.carbs_g, 70.0);
    assert_eq!(breakdown.total.fat_g, 10.0);
}

#[tokio::test]
async fn question_defers_breakdown_until_second_response() {
    let mut provider = FakeProvider::new()
        .with_default_response(r#"{"question": "Was the chicken fried in oil or butter?"}"#);
    provider.add_response(
        "The user answered",
        r#"{"breakdown": [{"item": "Fried chicken", "calories": 480, "protein_grams": 40, "carbs_grams": 12, "fat_grams": 28}]}"#,
    );

    let mut session = Session::new(png_photo());
    session.run_first_round(&provider).await.unwrap();

    // First response was a question: no breakdown may be shown yet
    assert_eq!(session.stage, Stage::AwaitingUserAnswer);
    assert!(session.breakdown().is_none());
    assert_eq!(
        session.question.as_deref(),
        Some("Was the chicken fried in oil or butter?")
    );

    session.run_answer_round(&provider, "in oil").await.unwrap();

    assert_eq!(session.stage, Stage::Done);
    assert_eq!(provider.call_count(), 2);
    let breakdown = session.breakdown().expect("final breakdown");
    assert_eq!(breakdown.total.calories, 480.0);
}

#[tokio::test]
async fn uninterpretable_reply_shows_raw_text_and_finishes() {
    let raw = "I cannot make out any food in this photo.";
    let provider = FakeProvider::new().with_default_response(raw);

    let mut session = Session::new(png_photo());
    session.run_first_round(&provider).await.unwrap();

    assert_eq!(session.stage, Stage::Done);
    match &session.result {
        Some(SessionResult::RawText(text)) => assert_eq!(text, raw),
        other => panic!("expected raw text result, got {:?}", other),
    }
}

#[tokio::test]
async fn second_question_is_treated_as_final_raw_text() {
    // Provider always asks a question, even in the second round
    let provider =
        FakeProvider::new().with_default_response(r#"{"question": "And how large was it?"}"#);

    let mut session = Session::new(png_photo());
    session.run_first_round(&provider).await.unwrap();
    assert_eq!(session.stage, Stage::AwaitingUserAnswer);

    session.run_answer_round(&provider, "medium").await.unwrap();

    // Only one follow-up round is supported; the second reply is final
    assert_eq!(session.stage, Stage::Done);
    assert!(matches!(
        session.result,
        Some(SessionResult::RawText(ref text)) if text.contains("And how large was it?")
    ));
}

#[test]
fn missing_credential_fails_provider_construction() {
    // With no GEMINI_API_KEY in the environment the gemini provider cannot be
    // built; the first call can never silently return an empty result.
    std::env::remove_var("GEMINI_API_KEY");
    std::env::set_var("PLATELENS_PROVIDER", "gemini");

    let result = platelens_core::llm::create_provider_from_env();
    assert!(matches!(
        result,
        Err(platelens_core::llm::LlmError::NotConfigured(_))
    ));
}
