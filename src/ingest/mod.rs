//! Nutrition-table ingestion: delimited text in, canonical foods out.

pub mod builder;
pub mod header;
pub mod loader;
pub mod numeric;
pub mod reader;

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::IngestionError;
use crate::models::Food;

pub use builder::{IdAllocator, build_foods};
pub use header::{ColumnMap, Field, normalize_key};
pub use loader::{CatalogLoader, LoadOutcome, PathSource, RawSource, TextSource};
pub use numeric::parse_number;
pub use reader::{CanonicalRow, detect_delimiter, read_rows};

/// Counts of the row-level problems ingestion recovers from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestionReport {
    pub rows_read: usize,
    pub rows_dropped_blank: usize,
    pub rows_unreadable: usize,
    pub values_defaulted: usize,
    pub duplicate_ids: usize,
}

/// Foods plus the row-level tally from one ingestion pass.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub foods: Vec<Food>,
    pub report: IngestionReport,
}

/// Parse a nutrition table into foods.
pub fn ingest(text: &str) -> Result<Vec<Food>, IngestionError> {
    ingest_with_report(text).map(|ingested| ingested.foods)
}

/// Like [`ingest`], also returning what was dropped or defaulted.
pub fn ingest_with_report(text: &str) -> Result<Ingested, IngestionError> {
    let mut report = IngestionReport::default();
    let rows = read_rows(text, &mut report)?;

    let mut ids = IdAllocator::default();
    let foods = build_foods(rows, &mut ids);
    report.duplicate_ids = ids.collisions();

    info!(
        foods = foods.len(),
        rows = report.rows_read,
        dropped = report.rows_dropped_blank,
        unreadable = report.rows_unreadable,
        defaulted = report.values_defaulted,
        duplicate_ids = report.duplicate_ids,
        "ingested nutrition table"
    );

    Ok(Ingested { foods, report })
}

/// Read and ingest a file. Input must be UTF-8.
pub fn ingest_path<P: AsRef<Path>>(path: P) -> Result<Ingested, IngestionError> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes)?;
    ingest_with_report(&text)
}
