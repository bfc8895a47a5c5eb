//! Persistence abstraction for plan progress.
//!
//! The [`StateStore`] trait defines the key-value operations the reading
//! plan tracker needs, enabling pluggable backends (SQLite, in-memory for
//! tests). Values are opaque JSON blobs owned by the tracker; the format is
//! backward-compatible across versions (additive fields only).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

/// Key holding the serialized list of active plans.
pub const ACTIVE_PLANS_KEY: &str = "active_plans";

/// Key holding the completion set of one plan-day.
pub fn completed_units_key(plan_id: &str, day_number: u32) -> String {
    format!("completed_units_{plan_id}_{day_number}")
}

/// Abstract key-value backend for persisted plan state.
///
/// Writes are last-writer-wins: a later `put` for the same key overwrites an
/// earlier one, no merge. In-memory implementations return
/// immediately-ready futures.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_units_key_shape() {
        assert_eq!(
            completed_units_key("beginnings", 3),
            "completed_units_beginnings_3"
        );
    }
}
