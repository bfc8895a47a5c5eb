//! The content store service: the single authoritative, read-mostly view of
//! the corpus.
//!
//! Lifecycle: `Uninitialized → Loading → Ready | Errored`, published on a
//! [`watch`] channel so UI consumers observe readiness reactively. The
//! corpus document is read and indexed once on the blocking pool; queries
//! issued before the indices are built return [`StoreError::NotReady`]
//! instead of blocking or exposing a partially-built index.
//!
//! A failed load leaves the store `Errored` with the failure attached; it is
//! never retried automatically — a new explicit `load()` call is required.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use anyhow::Result;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tokio::sync::watch;
use tracing::{info, warn};

use lectio_core::error::{LoadError, StoreError};
use lectio_core::index::{ChapterInfo, CollectionInfo, CorpusIndex};
use lectio_core::models::{Corpus, CorpusMeta, TextUnit};
use lectio_core::reference::Reference;

/// Observable lifecycle state of the [`ContentStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Loading,
    Ready,
    /// Terminal for the load attempt; holds the rendered failure.
    Errored(String),
}

impl StoreState {
    pub fn is_ready(&self) -> bool {
        matches!(self, StoreState::Ready)
    }
}

/// Facts about a completed load.
#[derive(Debug, Clone)]
pub struct LoadStats {
    /// SHA-256 of the corpus document bytes, for staleness detection across
    /// releases.
    pub fingerprint: String,
    pub unit_count: usize,
    pub collection_count: usize,
    pub loaded_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// Loads the corpus once and answers lookups, listings, and searches.
///
/// Cheap point lookups (`find_unit`, chapter/collection listings) are
/// synchronous — they touch load-time indices only. Substring search scans
/// the whole corpus and therefore hops to the blocking pool.
pub struct ContentStore {
    corpus_path: PathBuf,
    state_tx: watch::Sender<StoreState>,
    index: OnceLock<Arc<CorpusIndex>>,
    stats: OnceLock<LoadStats>,
}

impl ContentStore {
    pub fn new(corpus_path: impl Into<PathBuf>) -> Self {
        let (state_tx, _) = watch::channel(StoreState::Uninitialized);
        ContentStore {
            corpus_path: corpus_path.into(),
            state_tx,
            index: OnceLock::new(),
            stats: OnceLock::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StoreState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to lifecycle transitions.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state_tx.subscribe()
    }

    pub fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// Read, parse, and index the corpus document.
    ///
    /// Idempotent: a call while `Loading` or `Ready` is a no-op and cannot
    /// start a second load. A call after a failure is an explicit retry
    /// trigger.
    pub async fn load(&self) -> Result<(), LoadError> {
        let started = self.state_tx.send_if_modified(|state| match state {
            StoreState::Loading | StoreState::Ready => false,
            _ => {
                *state = StoreState::Loading;
                true
            }
        });
        if !started {
            return Ok(());
        }

        let path = self.corpus_path.clone();
        let outcome = match tokio::task::spawn_blocking(move || load_corpus(&path)).await {
            Ok(outcome) => outcome,
            Err(join) => Err(LoadError::Background(join.to_string())),
        };

        match outcome {
            Ok((index, stats)) => {
                info!(
                    units = stats.unit_count,
                    collections = stats.collection_count,
                    fingerprint = %stats.fingerprint,
                    elapsed_ms = stats.elapsed_ms,
                    "corpus loaded"
                );
                let _ = self.index.set(Arc::new(index));
                let _ = self.stats.set(stats);
                self.state_tx.send_replace(StoreState::Ready);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "corpus load failed");
                self.state_tx.send_replace(StoreState::Errored(err.to_string()));
                Err(err)
            }
        }
    }

    /// Shared handle to the built index, for callers that run several
    /// queries against one consistent snapshot (the corpus is immutable, so
    /// every snapshot is the corpus).
    pub fn snapshot(&self) -> Result<Arc<CorpusIndex>, StoreError> {
        match &*self.state_tx.borrow() {
            StoreState::Ready => {}
            StoreState::Errored(msg) => return Err(StoreError::Errored(msg.clone())),
            _ => return Err(StoreError::NotReady),
        }
        self.index.get().cloned().ok_or(StoreError::NotReady)
    }

    pub fn metadata(&self) -> Result<CorpusMeta, StoreError> {
        Ok(self.snapshot()?.meta().clone())
    }

    pub fn load_stats(&self) -> Result<LoadStats, StoreError> {
        self.snapshot()?;
        self.stats.get().cloned().ok_or(StoreError::NotReady)
    }

    /// Exact-match lookup; tolerates known alternate collection spellings
    /// and surrounding whitespace. Absence is `Ok(None)`, not an error.
    pub fn find_unit(
        &self,
        collection_name: &str,
        sequence_index: u32,
        unit_number: u32,
    ) -> Result<Option<TextUnit>, StoreError> {
        Ok(self
            .snapshot()?
            .find_unit(collection_name, sequence_index, unit_number)
            .cloned())
    }

    pub fn units_for_chapter(
        &self,
        collection_name: &str,
        sequence_index: u32,
    ) -> Result<Vec<TextUnit>, StoreError> {
        Ok(self
            .snapshot()?
            .units_for_chapter(collection_name, sequence_index)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn chapters_for_collection(
        &self,
        collection_name: &str,
    ) -> Result<Vec<ChapterInfo>, StoreError> {
        Ok(self.snapshot()?.chapters_for_collection(collection_name))
    }

    pub fn collections_info(&self) -> Result<Vec<CollectionInfo>, StoreError> {
        Ok(self.snapshot()?.collections_info())
    }

    /// Nominal sub-unit count of a reference: `end - start + 1`. Does not
    /// require the store to be ready — the estimate is positional, not a
    /// lookup.
    pub fn estimated_unit_count(&self, reference: &Reference) -> usize {
        reference.unit_span() as usize
    }

    /// Case-insensitive substring search over the whole corpus, capped at
    /// `limit` results in corpus order. Runs on the blocking pool.
    pub async fn search_contains(&self, query: &str, limit: usize) -> Result<Vec<TextUnit>> {
        let index = self.snapshot()?;
        let query = query.to_string();
        let hits = tokio::task::spawn_blocking(move || {
            index
                .search_contains(&query, limit)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
        .await?;
        Ok(hits)
    }

    /// Keyword search: exact tag match first, substring containment as the
    /// fallback. Runs on the blocking pool.
    pub async fn search_tag_or_contains(&self, keyword: &str) -> Result<Vec<TextUnit>> {
        let index = self.snapshot()?;
        let keyword = keyword.to_string();
        let hits = tokio::task::spawn_blocking(move || {
            index
                .search_tag_or_contains(&keyword)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
        .await?;
        Ok(hits)
    }
}

fn load_corpus(path: &Path) -> Result<(CorpusIndex, LoadStats), LoadError> {
    let started = Instant::now();

    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let corpus: Corpus = serde_json::from_slice(&bytes).map_err(|err| LoadError::Malformed {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;

    let fingerprint = format!("{:x}", Sha256::digest(&bytes));
    let index = CorpusIndex::build(corpus)?;
    let stats = LoadStats {
        fingerprint,
        unit_count: index.unit_count(),
        collection_count: index.collection_count(),
        loaded_at: Utc::now(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    Ok((index, stats))
}
