pub mod cli;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod interface;
pub mod models;
pub mod repository;
pub mod search;
pub mod substitution;

pub use engine::{MacroWeights, RankConfig, rank_substitutes};
pub use error::{ConversionError, IngestionError, NutriError, PortionError, Result};
pub use ingest::{ingest, ingest_with_report};
pub use models::{BaseUnit, Food, MealItemChoice, Nutrients, Portion, SubstituteSuggestion};
pub use repository::search_foods as search;
pub use substitution::SubstitutionService;

/// Nutrients for `portion` of `food`.
pub fn nutrients_for(
    food: &Food,
    portion: &Portion,
) -> std::result::Result<Nutrients, ConversionError> {
    food.nutrients_for(portion)
}
