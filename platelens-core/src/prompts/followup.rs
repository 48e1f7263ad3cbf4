//! Prompt template for the second round, after the user answered the model's
//! clarifying question.
//!
//! The user's answer is interpolated verbatim; any text is accepted.

pub fn render_followup_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"You are an expert visual nutrition estimator. You are given the same photo of a meal as before.

You previously asked this clarifying question about the photo:
{question}

The user answered:
{answer}

Using the photo and the user's answer, return the final nutritional breakdown. Attribute fat from the preparation method: fried or pan-fried items must include the cooking oil or butter in their fat estimate.

Return ONLY a JSON object with this exact structure, and do not ask any further questions:
{{"breakdown": [{{"item": "Pan-fried chicken breast", "portion": "1 large breast", "calories": 550, "protein_grams": 75, "carbs_grams": 5, "fat_grams": 25}}]}}

Rules:
- Every entry must have "item", "calories", "protein_grams", "carbs_grams" and "fat_grams"; "portion" is optional
- If a value is truly unknown after estimating, use 0
- Return ONLY the JSON, no other text"#
    )
}
