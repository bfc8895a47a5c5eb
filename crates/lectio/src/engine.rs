//! Startup wiring: configuration → running services.
//!
//! The embedding app (UI shell, notification scheduler) constructs one
//! [`Engine`] at launch and hands its services to the screens. Everything
//! here is plain composition; the services stay independently constructible
//! for tests.

use std::sync::Arc;

use anyhow::Result;

use lectio_core::models::TextUnit;

use crate::config::Config;
use crate::content::ContentStore;
use crate::daily::DailySelector;
use crate::planner::ReadingPlanTracker;
use crate::sqlite_store::SqliteStateStore;

pub struct Engine {
    pub store: Arc<ContentStore>,
    pub selector: DailySelector,
    pub tracker: ReadingPlanTracker,
    search_limit: usize,
}

impl Engine {
    /// Load the corpus, open the plan-state database, and restore active
    /// plans. Returns only once every service is usable; a corpus or
    /// reference-list failure aborts startup with the load error.
    pub async fn bootstrap(config: &Config) -> Result<Engine> {
        let store = Arc::new(ContentStore::new(&config.content.corpus_path));
        store.load().await?;

        let selector =
            DailySelector::from_file(store.clone(), &config.content.daily_references_path)?;

        let state = Arc::new(SqliteStateStore::open(&config.db).await?);
        let mut tracker = ReadingPlanTracker::new(store.clone(), state);
        tracker.restore().await?;

        Ok(Engine {
            store,
            selector,
            tracker,
            search_limit: config.content.search_limit,
        })
    }

    /// Substring search capped at the configured result limit.
    pub async fn search(&self, query: &str) -> Result<Vec<TextUnit>> {
        self.store.search_contains(query, self.search_limit).await
    }
}
