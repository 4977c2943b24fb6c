/// Suggestions returned per ranking unless the caller asks otherwise.
pub const DEFAULT_LIMIT: usize = 5;

/// Weight on each macro axis (carbs, protein, fat).
pub const DEFAULT_MACRO_WEIGHT: f64 = 1.0;

/// Weight on the absolute energy difference in macro+kcal mode.
pub const DEFAULT_KCAL_WEIGHT: f64 = 0.25;

/// Normalized queries shorter than this return no catalog matches.
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Jaro-Winkler floor for "did you mean" name suggestions.
pub const SIMILAR_NAME_THRESHOLD: f64 = 0.8;
