pub mod food;
pub mod nutrients;
pub mod portion;
pub mod suggestion;

pub use food::{BaseUnit, Food};
pub use nutrients::Nutrients;
pub use portion::Portion;
pub use suggestion::{
    AllowedSubstitute, ApprovedPortion, MealItemChoice, SubstituteSuggestion, total_for,
};
