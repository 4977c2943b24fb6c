use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::ingest::ingest_path;
use crate::models::{AllowedSubstitute, Food};

/// Deduplicate by id; the last occurrence wins, keeping the first position.
fn dedup_by_id<'a>(foods: impl IntoIterator<Item = &'a Food>) -> Vec<&'a Food> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<&Food> = Vec::new();
    for food in foods {
        match index.get(food.id.as_str()) {
            Some(&i) => out[i] = food,
            None => {
                index.insert(food.id.as_str(), out.len());
                out.push(food);
            }
        }
    }
    out
}

/// Load a catalog snapshot from a JSON file.
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<Vec<Food>> {
    let content = fs::read_to_string(path)?;
    let foods: Vec<Food> = serde_json::from_str(&content)?;
    Ok(dedup_by_id(&foods).into_iter().cloned().collect())
}

/// Save a catalog snapshot as pretty JSON.
pub fn save_foods<P: AsRef<Path>>(path: P, foods: &[Food]) -> Result<()> {
    let json = serde_json::to_string_pretty(&dedup_by_id(foods))?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a catalog from either a `.json` snapshot or a delimited table.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Food>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let foods = load_foods(path)?;
        info!(foods = foods.len(), path = %path.display(), "loaded catalog snapshot");
        return Ok(foods);
    }
    Ok(ingest_path(path)?.foods)
}

/// Load allowed substitutes; a missing file is an empty store.
pub fn load_allowed<P: AsRef<Path>>(path: P) -> Result<Vec<AllowedSubstitute>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_allowed<P: AsRef<Path>>(path: P, entries: &[AllowedSubstitute]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}
