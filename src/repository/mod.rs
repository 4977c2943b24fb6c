mod allowed;
mod catalog;
mod persistence;

pub use allowed::{AllowedSubstituteStore, InMemoryAllowedSubstitutes};
pub use catalog::{FoodCatalog, InMemoryCatalog, search_foods, similar_names};
pub use persistence::{load_allowed, load_catalog, load_foods, save_allowed, save_foods};
