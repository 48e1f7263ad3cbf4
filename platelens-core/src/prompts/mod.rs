//! Prompt templates for the meal analysis rounds.

pub mod estimate;
pub mod followup;

pub use estimate::render_meal_estimate_prompt;
pub use followup::render_followup_prompt;
