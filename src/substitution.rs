//! The "find substitutes" use case, composed from catalog, scoring and the
//! allowed-substitute store.

use serde::Serialize;
use tracing::debug;

use crate::engine::{RankConfig, TargetProfile, rank_against, score_choice};
use crate::error::{NutriError, Result};
use crate::models::{
    ApprovedPortion, Food, MealItemChoice, Nutrients, Portion, SubstituteSuggestion,
};
use crate::repository::{AllowedSubstituteStore, FoodCatalog};

/// The food being replaced, resolved to nutrients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub food: Food,
    pub portion: Portion,
    pub nutrients: Nutrients,
    pub kcal: f64,
}

/// Everything a substitution screen shows for one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstitutionResult {
    pub target: Target,
    pub by_macros: Vec<SubstituteSuggestion>,
    pub by_macros_and_kcal: Vec<SubstituteSuggestion>,
    /// The patient's approved substitutes, best macro+kcal match first.
    pub allowed: Vec<SubstituteSuggestion>,
}

pub struct SubstitutionService<C, A> {
    catalog: C,
    allowed: A,
    config: RankConfig,
}

impl<C: FoodCatalog, A: AllowedSubstituteStore> SubstitutionService<C, A> {
    pub fn new(catalog: C, allowed: A, config: RankConfig) -> Self {
        Self {
            catalog,
            allowed,
            config,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    pub fn allowed_store(&self) -> &A {
        &self.allowed
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    fn food(&self, food_id: &str) -> Result<Food> {
        self.catalog
            .find(food_id)
            .ok_or_else(|| NutriError::FoodNotFound(food_id.to_string()))
    }

    /// Resolve a target; a portion that does not convert is an error.
    pub fn target(&self, food_id: &str, portion: Portion) -> Result<Target> {
        let food = self.food(food_id)?;
        let nutrients = food.nutrients_for(&portion)?;
        Ok(Target {
            kcal: nutrients.energy_kcal(),
            food,
            portion,
            nutrients,
        })
    }

    /// Rank the whole catalog against `food_id` at `portion`, in both modes.
    pub fn find_substitutes(
        &self,
        patient_id: &str,
        food_id: &str,
        portion: Portion,
    ) -> Result<SubstitutionResult> {
        let target = self.target(food_id, portion)?;
        let profile = TargetProfile::new(target.nutrients);
        let candidates = self.catalog.get_all();

        let macro_config = self.config.macros_only();
        let kcal_config = self.config.with_kcal();
        let by_macros = rank_against(&target.food.id, &profile, &candidates, &macro_config);
        let by_macros_and_kcal = rank_against(&target.food.id, &profile, &candidates, &kcal_config);

        let mut allowed: Vec<SubstituteSuggestion> = self
            .get_allowed_substitutes(patient_id, food_id)
            .iter()
            .filter_map(|choice| {
                score_choice(&profile, choice, &kcal_config.weights, kcal_config.kcal_weight)
            })
            .collect();
        allowed.sort_by(|a, b| a.score.total_cmp(&b.score));

        Ok(SubstitutionResult {
            target,
            by_macros,
            by_macros_and_kcal,
            allowed,
        })
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<Food> {
        self.catalog.search(query, limit)
    }

    /// Approved substitutes resolved against the current catalog. Ids the
    /// catalog no longer holds are skipped.
    pub fn get_allowed_substitutes(
        &self,
        patient_id: &str,
        original_food_id: &str,
    ) -> Vec<MealItemChoice> {
        self.allowed
            .get(patient_id, original_food_id)
            .iter()
            .filter_map(|approved| match self.catalog.find(&approved.food_id) {
                Some(food) => Some(approved.with_food(food)),
                None => {
                    debug!(food_id = %approved.food_id, "approved substitute not in catalog");
                    None
                }
            })
            .collect()
    }

    /// Approve `substitute_food_id` at `portion`. Both foods must exist, must
    /// differ, and the portion must convert.
    pub fn add_allowed_substitute(
        &mut self,
        patient_id: &str,
        original_food_id: &str,
        substitute_food_id: &str,
        portion: Portion,
    ) -> Result<MealItemChoice> {
        if substitute_food_id == original_food_id {
            return Err(NutriError::InvalidInput(format!(
                "'{original_food_id}' cannot substitute itself"
            )));
        }
        self.food(original_food_id)?;
        let choice = MealItemChoice::new(self.food(substitute_food_id)?, portion);
        choice.nutrients()?;
        let approved = ApprovedPortion::new(substitute_food_id, choice.portion.clone());
        self.allowed.add(patient_id, original_food_id, approved);
        Ok(choice)
    }

    pub fn remove_allowed_substitute(
        &mut self,
        patient_id: &str,
        original_food_id: &str,
        substitute_food_id: &str,
    ) -> bool {
        self.allowed.remove(patient_id, original_food_id, substitute_food_id)
    }
}
