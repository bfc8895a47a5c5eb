//! Completion-set arithmetic for reading plans.
//!
//! The per-day completion set is authoritative; the `completed` flag on a
//! [`PlanDay`](crate::models::PlanDay) is a cache updated on edge-triggered
//! transitions of the predicate computed here.

use std::collections::BTreeSet;

use crate::index::canonical_collection_name;
use crate::models::{PlanDay, UnitKey};
use crate::reference::Reference;

/// Nominal sub-unit total of one day: `Σ (end_unit - start_unit + 1)` over
/// its references.
pub fn estimated_units(day: &PlanDay) -> usize {
    day.references.iter().map(|r| r.unit_span() as usize).sum()
}

/// A day is actually complete iff its completion set has reached the
/// estimated total.
pub fn is_actually_complete(completed_count: usize, estimated_total: usize) -> bool {
    completed_count >= estimated_total
}

/// Fraction of completed days; `0.0` for an empty plan, never `NaN`.
pub fn progress_fraction(completed_days: usize, total_days: usize) -> f64 {
    if total_days == 0 {
        0.0
    } else {
        completed_days as f64 / total_days as f64
    }
}

/// Whether `reference` covers `key`: same canonical collection, same
/// sequence, unit number inside the inclusive range.
pub fn reference_covers(reference: &Reference, key: &UnitKey) -> bool {
    canonical_collection_name(&reference.collection_name)
        == canonical_collection_name(&key.collection_name)
        && reference.sequence_index == key.sequence_index
        && (reference.start_unit..=reference.end_unit).contains(&key.unit_number)
}

/// Whether any of the day's references covers `key`.
pub fn day_covers(day: &PlanDay, key: &UnitKey) -> bool {
    day.references.iter().any(|r| reference_covers(r, key))
}

/// Edge-triggered change of the actual-completion predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTransition {
    /// Predicate unchanged by the toggle.
    None,
    /// Crossed `false → true`.
    BecameComplete,
    /// Crossed `true → false`.
    BecameIncomplete,
}

impl DayTransition {
    pub fn between(before: bool, after: bool) -> DayTransition {
        match (before, after) {
            (false, true) => DayTransition::BecameComplete,
            (true, false) => DayTransition::BecameIncomplete,
            _ => DayTransition::None,
        }
    }
}

/// Flip membership of `key` in a completion set. Returns `true` when the key
/// is now present.
pub fn toggle(set: &mut BTreeSet<UnitKey>, key: UnitKey) -> bool {
    if set.remove(&key) {
        false
    } else {
        set.insert(key);
        true
    }
}
