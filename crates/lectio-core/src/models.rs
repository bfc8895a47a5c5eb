//! Core data models used throughout Lectio.
//!
//! These types represent the corpus, its addressable text units, and the
//! reading plans that flow through the index, daily-selection, and
//! progress-tracking pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reference::Reference;

/// Descriptive metadata for a loaded corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusMeta {
    pub name: String,
    pub short_name: String,
    pub description: String,
}

/// The smallest addressable piece of content: a verse or a quote.
///
/// `collection_name` is denormalized onto every unit so queries stay
/// single-pass. `tags` and `author` are empty for scripture corpora and
/// populated for quote-style corpora — one generic type covers both kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    pub collection_name: String,
    pub sequence_index: u32,
    pub sub_index: u32,
    pub unit_number: u32,
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl TextUnit {
    /// The identity 4-tuple of this unit.
    pub fn key(&self) -> UnitKey {
        UnitKey {
            collection_name: self.collection_name.clone(),
            sequence_index: self.sequence_index,
            sub_index: self.sub_index,
            unit_number: self.unit_number,
        }
    }
}

/// Identity of a [`TextUnit`]: `(collection_name, sequence_index, sub_index,
/// unit_number)`.
///
/// Persisted completion sets store the stable string encoding produced by
/// [`UnitKey::encode`]; see that method for the compatibility rules.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitKey {
    pub collection_name: String,
    pub sequence_index: u32,
    pub sub_index: u32,
    pub unit_number: u32,
}

impl UnitKey {
    /// Stable string encoding: `"<collection>|<sequence>|<sub>|<unit>"`.
    ///
    /// Decoding ignores unknown trailing segments so future fields can be
    /// appended without breaking previously persisted sets. Collection names
    /// must not contain `|`; the corpus loader rejects such names.
    pub fn encode(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.collection_name, self.sequence_index, self.sub_index, self.unit_number
        )
    }

    /// Decode a key previously produced by [`UnitKey::encode`].
    ///
    /// Returns `None` for entries that do not carry the four leading
    /// segments — callers skip those rather than failing the whole set.
    pub fn decode(encoded: &str) -> Option<UnitKey> {
        let mut parts = encoded.split('|');
        let collection_name = parts.next()?.to_string();
        if collection_name.is_empty() {
            return None;
        }
        let sequence_index = parts.next()?.parse().ok()?;
        let sub_index = parts.next()?.parse().ok()?;
        let unit_number = parts.next()?.parse().ok()?;
        Some(UnitKey {
            collection_name,
            sequence_index,
            sub_index,
            unit_number,
        })
    }
}

/// A named collection of text units in source order, loaded once per process
/// and never mutated. Unit ordering is the ordering used for "first match"
/// and "range" semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub metadata: CorpusMeta,
    pub units: Vec<TextUnit>,
}

/// Topical grouping of a reading plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanCategory {
    Foundations,
    Gospels,
    Wisdom,
    Comfort,
    Devotion,
}

/// Accent color a plan is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanColor {
    Amber,
    Blue,
    Green,
    Rose,
    Violet,
}

/// One day of a multi-day reading plan.
///
/// `completed` is a cached flag updated on edge-triggered completion events;
/// the authoritative state is the per-day completion set. The two are kept
/// consistent by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub id: String,
    pub day_number: u32,
    pub title: String,
    pub references: Vec<Reference>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A built-in, read-only catalog plan: a multi-day guided schedule of
/// references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_days: u32,
    pub category: PlanCategory,
    pub color: PlanColor,
    pub days: Vec<PlanDay>,
}

impl Plan {
    /// Look up a day by its 1-based day number.
    pub fn day(&self, day_number: u32) -> Option<&PlanDay> {
        self.days.iter().find(|d| d.day_number == day_number)
    }
}

/// A plan instance a user has started: a mutable deep copy of the catalog
/// entry, independent from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePlan {
    pub plan: Plan,
    pub started_at: DateTime<Utc>,
}

impl ActivePlan {
    pub fn day(&self, day_number: u32) -> Option<&PlanDay> {
        self.plan.day(day_number)
    }

    pub fn day_mut(&mut self, day_number: u32) -> Option<&mut PlanDay> {
        self.plan.days.iter_mut().find(|d| d.day_number == day_number)
    }
}
