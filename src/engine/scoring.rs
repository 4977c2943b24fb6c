use serde::{Deserialize, Serialize};

use crate::engine::constants::{DEFAULT_KCAL_WEIGHT, DEFAULT_LIMIT, DEFAULT_MACRO_WEIGHT};
use crate::models::{Food, Nutrients, Portion, SubstituteSuggestion};

/// Per-axis weights on absolute macro differences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroWeights {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl Default for MacroWeights {
    fn default() -> Self {
        Self {
            carbs: DEFAULT_MACRO_WEIGHT,
            protein: DEFAULT_MACRO_WEIGHT,
            fat: DEFAULT_MACRO_WEIGHT,
        }
    }
}

/// Runtime ranking parameters.
///
/// `kcal_weight: None` ranks on macros only; `Some(w)` adds `w * |Δkcal|`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    pub limit: usize,
    pub weights: MacroWeights,
    pub kcal_weight: Option<f64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            weights: MacroWeights::default(),
            kcal_weight: None,
        }
    }
}

impl RankConfig {
    /// Same config, scoring macros and energy with the default kcal weight
    /// unless one is already set.
    pub fn with_kcal(&self) -> Self {
        Self {
            kcal_weight: Some(self.kcal_weight.unwrap_or(DEFAULT_KCAL_WEIGHT)),
            ..self.clone()
        }
    }

    pub fn macros_only(&self) -> Self {
        Self {
            kcal_weight: None,
            ..self.clone()
        }
    }
}

/// The reference a candidate is compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetProfile {
    pub nutrients: Nutrients,
    pub kcal: f64,
}

impl TargetProfile {
    pub fn new(nutrients: Nutrients) -> Self {
        Self {
            nutrients,
            kcal: nutrients.energy_kcal(),
        }
    }
}

/// Score an already-resolved candidate portion against `target`.
pub fn score_nutrients(
    target: &TargetProfile,
    food: &Food,
    portion: &Portion,
    nutrients: Nutrients,
    weights: &MacroWeights,
    kcal_weight: Option<f64>,
) -> SubstituteSuggestion {
    let kcal = nutrients.energy_kcal();
    let delta_carbs = nutrients.carbs - target.nutrients.carbs;
    let delta_protein = nutrients.protein - target.nutrients.protein;
    let delta_fat = nutrients.fat - target.nutrients.fat;
    let macro_score = weights.carbs * delta_carbs.abs()
        + weights.protein * delta_protein.abs()
        + weights.fat * delta_fat.abs();

    let (delta_kcal, score) = match kcal_weight {
        Some(w) => {
            let dk = kcal - target.kcal;
            (Some(dk), macro_score + w * dk.abs())
        }
        None => (None, macro_score),
    };

    SubstituteSuggestion {
        food: food.clone(),
        portion: portion.clone(),
        nutrients,
        kcal,
        delta_carbs,
        delta_protein,
        delta_fat,
        delta_kcal,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaseUnit;

    fn candidate() -> Food {
        Food::new("b", "B", BaseUnit::Per100G, Nutrients::macros(18.0, 2.0, 4.0))
    }

    fn score_at_100g(
        target: &TargetProfile,
        food: &Food,
        weights: &MacroWeights,
        kcal_weight: Option<f64>,
    ) -> SubstituteSuggestion {
        let portion = Portion::grams(100.0);
        score_nutrients(target, food, &portion, food.nutrients_base, weights, kcal_weight)
    }

    #[test]
    fn test_macro_only_score() {
        let target = TargetProfile::new(Nutrients::macros(20.0, 0.0, 5.0));
        let food = candidate();
        let s = score_at_100g(&target, &food, &MacroWeights::default(), None);

        assert_eq!(s.delta_protein, -2.0);
        assert_eq!(s.delta_carbs, 2.0);
        assert_eq!(s.delta_fat, -1.0);
        assert_eq!(s.delta_kcal, None);
        assert!((s.score - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_kcal_mode_adds_weighted_energy_delta() {
        let target = TargetProfile::new(Nutrients::macros(20.0, 0.0, 5.0));
        let food = candidate();
        let s = score_at_100g(&target, &food, &MacroWeights::default(), Some(0.25));

        // target 125 kcal, candidate 116 kcal
        assert_eq!(s.delta_kcal, Some(-9.0));
        assert!((s.score - (5.0 + 0.25 * 9.0)).abs() < 1e-9);
    }

    #[test]
    fn test_weights_scale_axes() {
        let target = TargetProfile::new(Nutrients::macros(20.0, 0.0, 5.0));
        let food = candidate();
        let weights = MacroWeights {
            carbs: 0.0,
            protein: 10.0,
            fat: 0.0,
        };
        let s = score_at_100g(&target, &food, &weights, None);
        assert!((s.score - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_config_modes() {
        let config = RankConfig::default();
        assert_eq!(config.kcal_weight, None);
        assert_eq!(config.with_kcal().kcal_weight, Some(DEFAULT_KCAL_WEIGHT));

        let custom = RankConfig {
            kcal_weight: Some(1.0),
            ..RankConfig::default()
        };
        assert_eq!(custom.with_kcal().kcal_weight, Some(1.0));
        assert_eq!(custom.macros_only().kcal_weight, None);
    }

    #[test]
    fn test_rank_config_from_partial_json() {
        let config: RankConfig =
            serde_json::from_str(r#"{"limit": 3, "weights": {"fat": 2.0}}"#).unwrap();
        assert_eq!(config.limit, 3);
        assert_eq!(config.weights.fat, 2.0);
        assert_eq!(config.weights.carbs, 1.0);
    }
}
