use tracing::debug;

use crate::engine::scoring::{MacroWeights, RankConfig, TargetProfile, score_nutrients};
use crate::error::ConversionError;
use crate::models::{Food, MealItemChoice, SubstituteSuggestion};

/// Best-scoring portion of `candidate`, or `None` if no portion converts.
///
/// A strictly lower score replaces the current best, so ties keep the
/// portion declared first.
fn best_portion(
    target: &TargetProfile,
    candidate: &Food,
    weights: &MacroWeights,
    kcal_weight: Option<f64>,
) -> Option<SubstituteSuggestion> {
    let mut best: Option<SubstituteSuggestion> = None;
    for portion in candidate.portions_or_reference() {
        let Ok(nutrients) = candidate.nutrients_for(&portion) else {
            continue;
        };
        let scored = score_nutrients(target, candidate, &portion, nutrients, weights, kcal_weight);
        if best.as_ref().is_none_or(|b| scored.score < b.score) {
            best = Some(scored);
        }
    }
    if best.is_none() {
        debug!(food = %candidate.debug_string(), "no portion converts; candidate skipped");
    }
    best
}

/// Rank `candidates` against an already-resolved target profile.
///
/// The food with `target_food_id` is never suggested. Output is sorted by
/// ascending score, candidates with equal scores keeping their input order,
/// and holds at most `config.limit` entries.
pub fn rank_against(
    target_food_id: &str,
    target: &TargetProfile,
    candidates: &[Food],
    config: &RankConfig,
) -> Vec<SubstituteSuggestion> {
    let mut ranked: Vec<SubstituteSuggestion> = candidates
        .iter()
        .filter(|c| c.id != target_food_id)
        .filter_map(|c| best_portion(target, c, &config.weights, config.kcal_weight))
        .collect();

    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
    ranked.truncate(config.limit);

    debug!(
        target = target_food_id,
        candidates = candidates.len(),
        returned = ranked.len(),
        kcal_mode = config.kcal_weight.is_some(),
        "ranked substitutes"
    );
    ranked
}

/// Rank substitutes for a (food, portion) target.
///
/// Only the target's own conversion can fail; candidate portions that do
/// not convert are skipped, and candidates with no usable portion dropped.
pub fn rank_substitutes(
    target: &MealItemChoice,
    candidates: &[Food],
    config: &RankConfig,
) -> Result<Vec<SubstituteSuggestion>, ConversionError> {
    let profile = TargetProfile::new(target.nutrients()?);
    Ok(rank_against(&target.food.id, &profile, candidates, config))
}

/// Score one fixed choice against `target`; `None` if it does not convert.
pub fn score_choice(
    target: &TargetProfile,
    choice: &MealItemChoice,
    weights: &MacroWeights,
    kcal_weight: Option<f64>,
) -> Option<SubstituteSuggestion> {
    let nutrients = choice.nutrients().ok()?;
    Some(score_nutrients(
        target,
        &choice.food,
        &choice.portion,
        nutrients,
        weights,
        kcal_weight,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BaseUnit, Nutrients, Portion};

    fn food(id: &str, protein: f64, carbs: f64, fat: f64) -> Food {
        Food::new(id, id.to_uppercase(), BaseUnit::Per100G, Nutrients::macros(protein, carbs, fat))
    }

    fn target_a() -> MealItemChoice {
        MealItemChoice::new(food("a", 20.0, 0.0, 5.0), Portion::grams(100.0))
    }

    #[test]
    fn test_closer_macros_rank_first() {
        let candidates = vec![food("c", 2.0, 20.0, 1.0), food("b", 18.0, 2.0, 4.0)];
        let ranked = rank_substitutes(&target_a(), &candidates, &RankConfig::default()).unwrap();
        let ids: Vec<&str> = ranked.iter().map(|s| s.food.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_target_food_is_excluded() {
        let candidates = vec![target_a().food, food("b", 18.0, 2.0, 4.0)];
        let ranked = rank_substitutes(&target_a(), &candidates, &RankConfig::default()).unwrap();
        assert!(ranked.iter().all(|s| s.food.id != "a"));
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_best_portion_is_kept_per_candidate() {
        // 200 g of a half-strength food matches the target exactly
        let half = food("half", 10.0, 0.0, 2.5).with_portions(vec![
            Portion::grams(100.0),
            Portion::new(2.0, "cup", "2 cups", Some(200.0), None).unwrap(),
        ]);
        let ranked = rank_substitutes(&target_a(), &[half], &RankConfig::default()).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].portion.label(), "2 cups");
        assert!(ranked[0].score.abs() < 1e-9);
    }

    #[test]
    fn test_tied_portions_keep_first_declared() {
        let same = food("same", 20.0, 0.0, 5.0).with_portions(vec![
            Portion::new(1.0, "piece", "1 piece", Some(100.0), None).unwrap(),
            Portion::new(100.0, "g", "100 g", Some(100.0), None).unwrap(),
        ]);
        let ranked = rank_substitutes(&target_a(), &[same], &RankConfig::default()).unwrap();
        assert_eq!(ranked[0].portion.label(), "1 piece");
    }

    #[test]
    fn test_unconvertible_portions_are_skipped() {
        let mixed = food("mixed", 20.0, 0.0, 5.0).with_portions(vec![
            Portion::milliliters(100.0),
            Portion::grams(100.0),
        ]);
        let only_ml =
            food("ml_only", 20.0, 0.0, 5.0).with_portions(vec![Portion::milliliters(100.0)]);

        let ranked =
            rank_substitutes(&target_a(), &[only_ml, mixed], &RankConfig::default()).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].food.id, "mixed");
        assert_eq!(ranked[0].portion, Portion::grams(100.0));
    }

    #[test]
    fn test_per_100ml_candidate_without_portions_uses_100ml() {
        let milk = Food::new("milk", "Milk", BaseUnit::Per100Ml, Nutrients::macros(3.0, 5.0, 3.0));
        let ranked = rank_substitutes(&target_a(), &[milk], &RankConfig::default()).unwrap();
        assert_eq!(ranked[0].portion, Portion::milliliters(100.0));
    }

    #[test]
    fn test_limit_and_sort_order() {
        let candidates: Vec<Food> = (0..10)
            .map(|i| food(&format!("f{i}"), i as f64 * 3.0, 1.0, 1.0))
            .collect();
        let config = RankConfig {
            limit: 4,
            ..RankConfig::default()
        };
        let ranked = rank_substitutes(&target_a(), &candidates, &config).unwrap();
        assert_eq!(ranked.len(), 4);
        assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
        assert_eq!(ranked[0].food.id, "f7");
    }

    #[test]
    fn test_delta_kcal_only_in_kcal_mode() {
        let candidates = vec![food("b", 18.0, 2.0, 4.0)];
        let macro_only =
            rank_substitutes(&target_a(), &candidates, &RankConfig::default()).unwrap();
        let with_kcal =
            rank_substitutes(&target_a(), &candidates, &RankConfig::default().with_kcal())
                .unwrap();
        assert_eq!(macro_only[0].delta_kcal, None);
        assert_eq!(with_kcal[0].delta_kcal, Some(-9.0));
    }

    #[test]
    fn test_unconvertible_target_is_an_error() {
        let target = MealItemChoice::new(food("a", 20.0, 0.0, 5.0), Portion::milliliters(100.0));
        let candidates = [food("b", 1.0, 1.0, 1.0)];
        assert!(rank_substitutes(&target, &candidates, &RankConfig::default()).is_err());
    }

    #[test]
    fn test_score_choice() {
        let profile = TargetProfile::new(Nutrients::macros(20.0, 0.0, 5.0));
        let choice = MealItemChoice::new(food("b", 18.0, 2.0, 4.0), Portion::grams(50.0));
        let s = score_choice(&profile, &choice, &MacroWeights::default(), None).unwrap();
        assert!((s.nutrients.protein - 9.0).abs() < 1e-9);

        let bad = MealItemChoice::new(food("b", 18.0, 2.0, 4.0), Portion::milliliters(50.0));
        assert!(score_choice(&profile, &bad, &MacroWeights::default(), None).is_none());
    }
}
