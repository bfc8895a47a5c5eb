//! # Lectio
//!
//! **A local-first devotional content reader engine.**
//!
//! Lectio loads a bundled corpus of addressable text units (verses or
//! quotes) into an in-memory store with fast lookups and containment
//! search, maps calendar dates to stable daily readings, and tracks
//! per-unit completion of guided multi-day reading plans across sessions.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌─────────────┐
//! │ corpus.json  │──▶│ ContentStore   │◀──│ DailySelector│
//! │ daily.json   │   │ (CorpusIndex) │   └─────────────┘
//! └──────────────┘   └──────┬────────┘
//!                           │ estimated unit counts
//!                    ┌──────▼────────────┐   ┌──────────────┐
//!                    │ ReadingPlanTracker │──▶│ SQLite (kv)  │
//!                    └───────────────────┘   └──────────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. [`content::ContentStore::load`] reads the corpus document once on the
//!    blocking pool and builds the collection/chapter indices; readiness is
//!    published on a watch channel.
//! 2. [`daily::DailySelector`] hashes a `YYYY-MM-DD` date onto the bundled
//!    reference list and resolves the selected range — all-or-nothing —
//!    into a display reading.
//! 3. [`planner::ReadingPlanTracker`] deep-copies catalog plans on start,
//!    flips per-unit completion with immediate last-writer-wins persistence,
//!    and derives day/plan progress from the completion sets.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`content`] | Content store service: lifecycle, lookups, search |
//! | [`daily`] | Daily selector service over the bundled reference list |
//! | [`catalog`] | Built-in reading plan catalog |
//! | [`planner`] | Active plans, completion sets, derived progress |
//! | [`sqlite_store`] | SQLite key-value `StateStore` backend |
//! | [`engine`] | Startup wiring of the services above |
//!
//! The pure algorithms (reference parsing, index construction, date hash,
//! progress arithmetic) live in the runtime-free `lectio-core` crate.

pub mod catalog;
pub mod config;
pub mod content;
pub mod daily;
pub mod engine;
pub mod planner;
pub mod sqlite_store;

pub use content::{ContentStore, LoadStats, StoreState};
pub use daily::DailySelector;
pub use engine::Engine;
pub use lectio_core::store;
pub use lectio_core::{
    ActivePlan, Corpus, CorpusMeta, DailyError, DailyReading, DayTransition, LoadError, Plan,
    PlanCategory, PlanColor, PlanDay, PlanError, Reference, StoreError, TextUnit, UnitKey,
};
pub use planner::ReadingPlanTracker;
pub use sqlite_store::SqliteStateStore;
