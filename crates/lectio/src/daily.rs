//! Daily selector service.
//!
//! Owns the bundled daily reference list and answers "what is today's
//! reading" through the content store. Stateless beyond the list itself:
//! given the same date, list, and store contents the answer is always the
//! same, so there is nothing to cache.

use std::path::Path;
use std::sync::Arc;

use lectio_core::daily::{self, DailyReading};
use lectio_core::error::{DailyError, LoadError};

use crate::content::ContentStore;

pub struct DailySelector {
    store: Arc<ContentStore>,
    references: Vec<String>,
}

impl DailySelector {
    pub fn new(store: Arc<ContentStore>, references: Vec<String>) -> Self {
        DailySelector { store, references }
    }

    /// Load the reference list from its bundled JSON document (an array of
    /// address strings). A malformed document is fatal for the session.
    pub fn from_file(store: Arc<ContentStore>, path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let references: Vec<String> =
            serde_json::from_slice(&bytes).map_err(|err| LoadError::Malformed {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self::new(store, references))
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// The address string the date hashes to, without resolving it.
    pub fn reference_for_date(&self, date: &str) -> Option<&str> {
        daily::reference_for_date(date, &self.references)
    }

    /// Select and resolve the reading for a `YYYY-MM-DD` date. Fails the
    /// whole lookup if any unit of the selected range is missing.
    pub fn reading_for_date(&self, date: &str) -> Result<DailyReading, DailyError> {
        let index = self.store.snapshot()?;
        daily::reading_for_date(&index, date, &self.references)
    }
}
