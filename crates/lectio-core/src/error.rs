//! Error taxonomy shared by the store, selector, and tracker.
//!
//! Load failures are fatal for the session; everything else is expected and
//! non-fatal. Persistence failures never surface here — they are logged and
//! the in-memory state stays authoritative.

use thiserror::Error;

use crate::reference::ParseError;

/// Fatal failure to load a bundled document (corpus or daily reference
/// list). Surfaces through the store's `Errored` state; never retried
/// automatically.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed document {path}: {reason}")]
    Malformed { path: String, reason: String },
    #[error("corpus contains no units")]
    Empty,
    #[error("invalid unit at position {index}: {reason}")]
    InvalidUnit { index: usize, reason: String },
    #[error("load task aborted: {0}")]
    Background(String),
}

/// Outcome of querying the content store outside its `Ready` state.
///
/// `NotReady` is transient and expected — the caller awaits the ready signal
/// and retries. `Errored` mirrors the terminal load failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("content store is not ready")]
    NotReady,
    #[error("content store failed to load: {0}")]
    Errored(String),
}

/// Failure to produce a daily reading.
///
/// Range resolution is fail-fast: one missing unit fails the whole composite
/// lookup, because a partially quoted range is worse than no result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DailyError {
    #[error("daily reference list is empty")]
    EmptyList,
    #[error("malformed daily reference {reference:?}")]
    BadReference {
        reference: String,
        #[source]
        source: ParseError,
    },
    #[error("unit {unit} of {reference} is not in the corpus")]
    MissingUnit { reference: String, unit: u32 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure of an explicit reading-plan operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("unknown plan {0:?}")]
    UnknownPlan(String),
    #[error("plan {0:?} is already active")]
    AlreadyActive(String),
    #[error("plan {plan_id:?} has no day {day_number}")]
    UnknownDay { plan_id: String, day_number: u32 },
    #[error("unit {unit} is not part of day {day_number} of plan {plan_id:?}")]
    UnitNotInDay {
        plan_id: String,
        day_number: u32,
        unit: String,
    },
}
