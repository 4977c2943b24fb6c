use thiserror::Error;

use crate::models::BaseUnit;

/// A portion was declared without any gram or milliliter equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortionError {
    #[error("portion '{0}' has neither a gram nor a milliliter equivalent")]
    NoEquivalent(String),
}

/// A portion cannot be expressed in its food's base unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("cannot convert portion '{portion}' of food '{food_id}' to {base_unit}")]
    MissingEquivalent {
        food_id: String,
        portion: String,
        base_unit: BaseUnit,
    },
}

/// Whole-file ingestion failures.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("missing required columns: {}", .missing.join(", "))]
    MissingRequiredColumns { missing: Vec<&'static str> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("source is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum NutriError {
    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error(transparent)]
    Portion(#[from] PortionError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, NutriError>;
