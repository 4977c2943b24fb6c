use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::models::{Food, Nutrients, Portion};

/// A food and the portion of it actually being eaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItemChoice {
    pub food: Food,
    pub portion: Portion,
}

impl MealItemChoice {
    pub fn new(food: Food, portion: Portion) -> Self {
        Self { food, portion }
    }

    pub fn nutrients(&self) -> Result<Nutrients, ConversionError> {
        self.food.nutrients_for(&self.portion)
    }
}

/// Summed nutrients of several choices; fails on the first unconvertible one.
pub fn total_for(choices: &[MealItemChoice]) -> Result<Nutrients, ConversionError> {
    choices.iter().map(MealItemChoice::nutrients).sum()
}

/// A ranked substitute candidate. Lower `score` means closer to the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstituteSuggestion {
    pub food: Food,
    pub portion: Portion,
    pub nutrients: Nutrients,
    pub kcal: f64,
    pub delta_carbs: f64,
    pub delta_protein: f64,
    pub delta_fat: f64,
    /// Only computed when energy is part of the score.
    pub delta_kcal: Option<f64>,
    pub score: f64,
}

/// An approved substitute by id; resolved against the current catalog on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovedPortion {
    pub food_id: String,
    pub portion: Portion,
}

impl ApprovedPortion {
    pub fn new(food_id: impl Into<String>, portion: Portion) -> Self {
        Self {
            food_id: food_id.into(),
            portion,
        }
    }

    /// Pair with `food`, which the caller looked up by `food_id`.
    pub fn with_food(&self, food: Food) -> MealItemChoice {
        MealItemChoice::new(food, self.portion.clone())
    }
}

/// Substitutes a clinician approved for one patient and one original food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowedSubstitute {
    pub patient_id: String,
    pub original_food_id: String,
    pub substitutes: Vec<ApprovedPortion>,
}

impl AllowedSubstitute {
    pub fn new(patient_id: impl Into<String>, original_food_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            original_food_id: original_food_id.into(),
            substitutes: Vec::new(),
        }
    }

    /// Insert `approved`, replacing any entry for the same substitute food.
    pub fn upsert(&mut self, approved: ApprovedPortion) {
        match self.substitutes.iter_mut().find(|a| a.food_id == approved.food_id) {
            Some(existing) => *existing = approved,
            None => self.substitutes.push(approved),
        }
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, substitute_food_id: &str) -> bool {
        let before = self.substitutes.len();
        self.substitutes.retain(|a| a.food_id != substitute_food_id);
        self.substitutes.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaseUnit;

    fn food(id: &str) -> Food {
        Food::new(id, id, BaseUnit::Per100G, Nutrients::macros(10.0, 10.0, 10.0))
    }

    #[test]
    fn test_total_for() {
        let choices = vec![
            MealItemChoice::new(food("a"), Portion::grams(100.0)),
            MealItemChoice::new(food("b"), Portion::grams(50.0)),
        ];
        let total = total_for(&choices).unwrap();
        assert!((total.protein - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_for_propagates_conversion_error() {
        let choices = vec![MealItemChoice::new(food("a"), Portion::milliliters(100.0))];
        assert!(total_for(&choices).is_err());
    }

    #[test]
    fn test_with_food_keeps_approved_portion() {
        let approved = ApprovedPortion::new("a", Portion::grams(40.0));
        let choice = approved.with_food(food("a"));
        assert_eq!(choice.food.id, "a");
        assert!((choice.nutrients().unwrap().carbs - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_upsert_replaces_same_food() {
        let mut allowed = AllowedSubstitute::new("p1", "rice");
        allowed.upsert(ApprovedPortion::new("a", Portion::grams(100.0)));
        allowed.upsert(ApprovedPortion::new("a", Portion::grams(80.0)));
        allowed.upsert(ApprovedPortion::new("b", Portion::grams(30.0)));

        assert_eq!(allowed.substitutes.len(), 2);
        assert_eq!(allowed.substitutes[0].portion, Portion::grams(80.0));
    }

    #[test]
    fn test_remove() {
        let mut allowed = AllowedSubstitute::new("p1", "rice");
        allowed.upsert(ApprovedPortion::new("a", Portion::grams(100.0)));
        assert!(!allowed.remove("zzz"));
        assert!(allowed.remove("a"));
        assert!(allowed.substitutes.is_empty());
    }
}
