//! Core data types for meal analysis sessions.

use serde::{Deserialize, Serialize};

/// A single food item as estimated by the model.
///
/// All numeric fields are approximate; the model may return inconsistent
/// units and no unit invariant is enforced beyond defaulting missing values
/// to zero during interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItemEstimate {
    /// Item name as identified by the model.
    pub name: String,
    /// Portion description, if the model provided one separately.
    pub portion: Option<String>,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Sum of the per-item macro values.
///
/// Derived by simple addition and recomputed from the item list; never stored
/// independently of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MealTotal {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl MealTotal {
    /// Compute the total for a list of items.
    pub fn of(items: &[FoodItemEstimate]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            calories: acc.calories + item.calories,
            protein_g: acc.protein_g + item.protein_g,
            carbs_g: acc.carbs_g + item.carbs_g,
            fat_g: acc.fat_g + item.fat_g,
        })
    }
}

/// The final structured output of a session: per-item estimates plus totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breakdown {
    pub items: Vec<FoodItemEstimate>,
    pub total: MealTotal,
}

impl Breakdown {
    /// Build a breakdown from items, computing the total.
    pub fn from_items(items: Vec<FoodItemEstimate>) -> Self {
        let total = MealTotal::of(&items);
        Self { items, total }
    }
}

/// One prompt/response pair exchanged with the model.
///
/// Owned by the session; grows by one entry per round trip; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub prompt: String,
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodItemEstimate {
        FoodItemEstimate {
            name: name.to_string(),
            portion: None,
            calories,
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
        }
    }

    #[test]
    fn test_total_is_sum_of_items() {
        let items = vec![
            item("grilled chicken", 200.0, 30.0, 0.0, 8.0),
            item("rice", 350.0, 7.0, 70.0, 2.0),
        ];
        let total = MealTotal::of(&items);
        assert_eq!(total.calories, 550.0);
        assert_eq!(total.protein_g, 37.0);
        assert_eq!(total.carbs_g, 70.0);
        assert_eq!(total.fat_g, 10.0);
    }

    #[test]
    fn test_total_of_empty_list_is_zero() {
        assert_eq!(MealTotal::of(&[]), MealTotal::default());
    }

    #[test]
    fn test_breakdown_recomputes_total() {
        let breakdown = Breakdown::from_items(vec![item("toast", 120.0, 4.0, 22.0, 1.5)]);
        assert_eq!(breakdown.total.calories, 120.0);
        assert_eq!(breakdown.total.carbs_g, 22.0);
    }
}
