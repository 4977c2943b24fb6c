use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::IngestionError;
use crate::ingest::{IngestionReport, ingest_with_report};
use crate::models::Food;

/// Where raw table text comes from.
pub trait RawSource {
    fn read_text(&self) -> Result<String, IngestionError>;
}

/// A UTF-8 table on disk.
#[derive(Debug, Clone)]
pub struct PathSource(pub PathBuf);

impl RawSource for PathSource {
    fn read_text(&self) -> Result<String, IngestionError> {
        let bytes = fs::read(&self.0)?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// A table already held in memory, e.g. a bundled seed asset.
#[derive(Debug, Clone)]
pub struct TextSource(pub String);

impl RawSource for TextSource {
    fn read_text(&self) -> Result<String, IngestionError> {
        Ok(self.0.clone())
    }
}

/// Result of the single load. A rejected source yields an empty catalog.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub foods: Arc<Vec<Food>>,
    pub report: IngestionReport,
    pub error: Option<Arc<IngestionError>>,
}

/// Ingests its source at most once, however many callers ask.
///
/// The first caller performs the load while holding the lock; callers that
/// arrive meanwhile wait and receive the same outcome.
pub struct CatalogLoader<S> {
    source: S,
    loaded: Mutex<Option<LoadOutcome>>,
}

impl<S: RawSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            loaded: Mutex::new(None),
        }
    }

    /// Load the catalog, or return the cached outcome of the earlier load.
    pub fn load(&self) -> LoadOutcome {
        let mut slot = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(outcome) = slot.as_ref() {
            debug!("catalog already loaded");
            return outcome.clone();
        }

        let outcome = match self.source.read_text().and_then(|text| ingest_with_report(&text)) {
            Ok(ingested) => LoadOutcome {
                foods: Arc::new(ingested.foods),
                report: ingested.report,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "catalog load failed, continuing with an empty catalog");
                LoadOutcome {
                    error: Some(Arc::new(e)),
                    ..LoadOutcome::default()
                }
            }
        };

        *slot = Some(outcome.clone());
        outcome
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl<S: RawSource + Send + Sync + 'static> CatalogLoader<S> {
    /// Run [`CatalogLoader::load`] on a background thread.
    pub fn spawn_load(self: &Arc<Self>) -> JoinHandle<LoadOutcome> {
        let loader = Arc::clone(self);
        thread::spawn(move || loader.load())
    }
}
