use std::collections::HashMap;

use crate::engine::constants::{MIN_SEARCH_QUERY_LEN, SIMILAR_NAME_THRESHOLD};
use crate::models::Food;
use crate::search::{contains, normalize, similarity};

/// Read access to the food collection, plus wholesale replacement.
pub trait FoodCatalog {
    fn get_all(&self) -> Vec<Food>;

    fn find(&self, id: &str) -> Option<Food>;

    /// Foods whose name, brand or origin contains `query`.
    fn search(&self, query: &str, limit: usize) -> Vec<Food>;

    fn set_foods(&mut self, foods: Vec<Food>);
}

/// Matching foods in catalog order, at most `limit`.
///
/// A normalized query shorter than two characters matches nothing.
pub fn search_foods<'a>(foods: &'a [Food], query: &str, limit: usize) -> Vec<&'a Food> {
    if normalize(query).chars().count() < MIN_SEARCH_QUERY_LEN {
        return Vec::new();
    }
    foods
        .iter()
        .filter(|f| {
            contains(&f.name, query)
                || f.brand.as_deref().is_some_and(|b| contains(b, query))
                || f.origin.as_deref().is_some_and(|o| contains(o, query))
        })
        .take(limit)
        .collect()
}

/// Names close to `query`, best first, for "did you mean" hints.
pub fn similar_names<'a>(foods: &'a [Food], query: &str, limit: usize) -> Vec<&'a Food> {
    let mut scored: Vec<(&Food, f64)> = foods
        .iter()
        .map(|f| (f, similarity(&f.name, query).max(similarity(&f.id, query))))
        .filter(|(_, score)| *score >= SIMILAR_NAME_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().take(limit).map(|(f, _)| f).collect()
}

/// Catalog held in memory, in ingestion order.
///
/// Not synchronized; callers serialize writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    foods: Vec<Food>,
    by_id: HashMap<String, usize>,
}

impl InMemoryCatalog {
    pub fn new(foods: Vec<Food>) -> Self {
        let mut catalog = Self::default();
        catalog.set_foods(foods);
        catalog
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn get(&self, id: &str) -> Option<&Food> {
        self.by_id.get(id).map(|&i| &self.foods[i])
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

impl FoodCatalog for InMemoryCatalog {
    fn get_all(&self) -> Vec<Food> {
        self.foods.clone()
    }

    fn find(&self, id: &str) -> Option<Food> {
        self.get(id).cloned()
    }

    fn search(&self, query: &str, limit: usize) -> Vec<Food> {
        search_foods(&self.foods, query, limit).into_iter().cloned().collect()
    }

    fn set_foods(&mut self, foods: Vec<Food>) {
        self.by_id = foods.iter().enumerate().map(|(i, f)| (f.id.clone(), i)).collect();
        self.foods = foods;
    }
}
