use std::collections::HashSet;

use crate::ingest::header::normalize_key;
use crate::ingest::reader::CanonicalRow;
use crate::models::{BaseUnit, Food, Portion};

/// Fallback id stem for descriptions with no alphanumeric characters.
const EMPTY_SLUG: &str = "food";

/// Hands out unique ids within one ingestion pass.
///
/// A repeated id gets `_2`, `_3`, ... in first-seen order.
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
    collisions: usize,
}

impl IdAllocator {
    pub fn allocate(&mut self, base: String) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        self.collisions += 1;
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}_{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// How many ids needed a suffix.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

/// Preferred id for a row: its numeric code, else a slug of its description.
pub fn base_id(row: &CanonicalRow) -> String {
    if let Some(code) = row.code.as_deref().filter(|c| c.chars().all(|ch| ch.is_ascii_digit())) {
        return code.to_string();
    }
    let slug = normalize_key(&row.description);
    if slug.is_empty() { EMPTY_SLUG.to_string() } else { slug }
}

/// Turn rows into per-100g foods with a single 100 g portion.
pub fn build_foods(rows: Vec<CanonicalRow>, ids: &mut IdAllocator) -> Vec<Food> {
    rows.into_iter()
        .map(|row| {
            let id = ids.allocate(base_id(&row));
            Food {
                group: row.group,
                declared_kcal: Some(row.kcal),
                ..Food::new(id, row.description, BaseUnit::Per100G, row.nutrients)
                    .with_portions(vec![Portion::grams(100.0)])
            }
        })
        .collect()
}
