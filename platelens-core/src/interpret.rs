//! Interpretation of model replies.
//!
//! The model's output is an opaque, untrusted string. Interpretation locates
//! an embedded JSON object, validates it against the shapes the flow
//! understands, and defaults anything missing rather than trusting the model
//! to honor the prompt's schema.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{Breakdown, FoodItemEstimate};

/// A model reply classified into one of the shapes the flow understands.
#[derive(Debug, Clone)]
pub enum ModelReply {
    /// A final breakdown with per-item estimates and totals.
    Breakdown(Breakdown),
    /// A clarifying question the model asked instead of answering.
    Question(String),
    /// Text that is neither a breakdown nor a question; shown raw.
    Unrecognized(String),
}

/// Payload shapes the model was asked to produce. Unknown fields are ignored
/// and every field is optional; classification decides what was meant.
#[derive(Debug, Deserialize)]
struct ReplyPayload {
    #[serde(default)]
    breakdown: Option<Vec<RawItem>>,
    #[serde(default)]
    question: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    portion: Option<String>,
    #[serde(default)]
    calories: Option<Value>,
    #[serde(default)]
    protein_grams: Option<Value>,
    #[serde(default)]
    carbs_grams: Option<Value>,
    #[serde(default)]
    fat_grams: Option<Value>,
}

/// Coerce a model-supplied value to f64, defaulting to 0.0.
///
/// The model sometimes returns numbers as strings ("550" or "550 kcal" would
/// not be surprising); plain numeric strings are accepted.
fn num_field(value: Option<Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

impl From<RawItem> for FoodItemEstimate {
    fn from(raw: RawItem) -> Self {
        FoodItemEstimate {
            name: raw.item.unwrap_or_else(|| "Unknown item".to_string()),
            portion: raw.portion,
            calories: num_field(raw.calories),
            protein_g: num_field(raw.protein_grams),
            carbs_g: num_field(raw.carbs_grams),
            fat_g: num_field(raw.fat_grams),
        }
    }
}

/// Locate the outermost JSON object embedded in the text, if any.
fn find_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Classify a raw model reply.
///
/// A parsed object with a `breakdown` array wins over a `question` field;
/// a reply that parses as neither falls back to a bare-text question if it
/// ends with a question mark, and is otherwise returned unrecognized.
pub fn interpret_reply(raw: &str) -> ModelReply {
    if let Some(block) = find_json_block(raw) {
        if let Ok(payload) = serde_json::from_str::<ReplyPayload>(block) {
            if let Some(items) = payload.breakdown {
                let items: Vec<FoodItemEstimate> =
                    items.into_iter().map(FoodItemEstimate::from).collect();
                return ModelReply::Breakdown(Breakdown::from_items(items));
            }
            if let Some(question) = payload.question {
                if !question.trim().is_empty() {
                    return ModelReply::Question(question);
                }
            }
        }
    }

    let trimmed = raw.trim();
    if trimmed.ends_with('?') {
        return ModelReply::Question(trimmed.to_string());
    }

    ModelReply::Unrecognized(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_reply() {
        let raw = r#"{"breakdown": [
            {"item": "Grilled chicken", "calories": 200, "protein_grams": 30, "carbs_grams": 0, "fat_grams": 8},
            {"item": "Rice", "portion": "1 cup", "calories": 350, "protein_grams": 7, "carbs_grams": 70, "fat_grams": 2}
        ]}"#;

        let ModelReply::Breakdown(breakdown) = interpret_reply(raw) else {
            panic!("expected breakdown");
        };
        assert_eq!(breakdown.items.len(), 2);
        assert_eq!(breakdown.items[1].portion.as_deref(), Some("1 cup"));
        assert_eq!(breakdown.total.calories, 550.0);
    }

    #[test]
    fn test_breakdown_with_surrounding_prose() {
        let raw = "Here is your estimate:\n```json\n{\"breakdown\": [{\"item\": \"Toast\", \"calories\": 120, \"protein_grams\": 4, \"carbs_grams\": 22, \"fat_grams\": 1.5}]}\n```\nEnjoy!";
        assert!(matches!(interpret_reply(raw), ModelReply::Breakdown(_)));
    }

    #[test]
    fn test_numbers_as_strings_are_coerced() {
        let raw = r#"{"breakdown": [{"item": "Soup", "calories": "250", "protein_grams": "abc", "carbs_grams": 30, "fat_grams": null}]}"#;
        let ModelReply::Breakdown(breakdown) = interpret_reply(raw) else {
            panic!("expected breakdown");
        };
        assert_eq!(breakdown.items[0].calories, 250.0);
        assert_eq!(breakdown.items[0].protein_g, 0.0);
        assert_eq!(breakdown.items[0].carbs_g, 30.0);
        assert_eq!(breakdown.items[0].fat_g, 0.0);
    }

    #[test]
    fn test_missing_item_name_defaults() {
        let raw = r#"{"breakdown": [{"calories": 100}]}"#;
        let ModelReply::Breakdown(breakdown) = interpret_reply(raw) else {
            panic!("expected breakdown");
        };
        assert_eq!(breakdown.items[0].name, "Unknown item");
    }

    #[test]
    fn test_question_reply() {
        let raw = r#"{"question": "Was the chicken fried in oil or butter?"}"#;
        let ModelReply::Question(q) = interpret_reply(raw) else {
            panic!("expected question");
        };
        assert_eq!(q, "Was the chicken fried in oil or butter?");
    }

    #[test]
    fn test_bare_text_question() {
        let raw = "Could you tell me how large the bowl is?";
        assert!(matches!(interpret_reply(raw), ModelReply::Question(_)));
    }

    #[test]
    fn test_breakdown_wins_over_question() {
        let raw = r#"{"breakdown": [], "question": "anything else?"}"#;
        assert!(matches!(interpret_reply(raw), ModelReply::Breakdown(_)));
    }

    #[test]
    fn test_unrecognized_reply() {
        let raw = "I am unable to analyze this image.";
        let ModelReply::Unrecognized(text) = interpret_reply(raw) else {
            panic!("expected unrecognized");
        };
        assert_eq!(text, raw);
    }

    #[test]
    fn test_json_without_known_fields_is_unrecognized() {
        let raw = r#"{"verdict": "looks tasty"}"#;
        assert!(matches!(interpret_reply(raw), ModelReply::Unrecognized(_)));
    }

    #[test]
    fn test_empty_question_is_unrecognized() {
        let raw = r#"{"question": "   "}"#;
        assert!(matches!(interpret_reply(raw), ModelReply::Unrecognized(_)));
    }
}
