//! # Lectio Core
//!
//! Shared, runtime-free logic for Lectio: corpus data models, reference
//! parsing, the in-memory corpus index with containment search,
//! deterministic daily selection, plan-progress arithmetic, and the
//! persistence trait for plan state.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! native-only dependencies. The service layer (`lectio`) wires it to a
//! runtime, a SQLite store, and the bundled content documents.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Core data types: `TextUnit`, `Corpus`, `Plan`, `ActivePlan` |
//! | [`reference`] | Address-string parsing (`"Romans 8:28-30"`) |
//! | [`index`] | Corpus index: lookups, chapter/collection listings, search |
//! | [`daily`] | Date-hash selection and fail-fast range resolution |
//! | [`progress`] | Completion-set arithmetic and day transitions |
//! | [`store`] | `StateStore` persistence trait + in-memory implementation |
//! | [`error`] | Typed error taxonomy |

pub mod daily;
pub mod error;
pub mod index;
pub mod models;
pub mod progress;
pub mod reference;
pub mod store;

pub use daily::DailyReading;
pub use error::{DailyError, LoadError, PlanError, StoreError};
pub use index::{ChapterInfo, CollectionInfo, CorpusIndex, DEFAULT_SEARCH_LIMIT};
pub use models::{
    ActivePlan, Corpus, CorpusMeta, Plan, PlanCategory, PlanColor, PlanDay, TextUnit, UnitKey,
};
pub use progress::DayTransition;
pub use reference::{ParseError, Reference};
pub use store::{StateStore, ACTIVE_PLANS_KEY};
