//! Deterministic daily selection.
//!
//! Maps a calendar date string (`YYYY-MM-DD`) to a stable entry of a
//! reference list: the sum of the date string's code points, modulo the list
//! length. The hash is intentionally weak and simple — it is a
//! content-addressed pseudo-random choice, reproducible bit-for-bit on every
//! platform without storing a date→entry mapping. Substituting a stronger
//! hash would silently reassign every historical date, so the formula is
//! frozen.

use serde::Serialize;

use crate::error::DailyError;
use crate::index::CorpusIndex;
use crate::reference::Reference;

/// Sum of the Unicode code point values of `date`.
pub fn date_hash(date: &str) -> u64 {
    date.chars().map(|c| c as u64).sum()
}

/// Index selected for `date` in a list of `len` entries; `None` for an
/// empty list.
pub fn select_index(date: &str, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some((date_hash(date) % len as u64) as usize)
    }
}

/// The reference string selected for `date`.
pub fn reference_for_date<'a>(date: &str, references: &'a [String]) -> Option<&'a str> {
    select_index(date, references.len()).map(|i| references[i].as_str())
}

/// A resolved daily reading: composite display reference and concatenated
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyReading {
    /// Display reference, e.g. `"Romans 8:28-30"`, using the canonical
    /// collection name of the resolved units.
    pub reference: String,
    /// Unit bodies joined with a single space.
    pub text: String,
}

/// Resolve a parsed reference into a [`DailyReading`].
///
/// Fail-fast: if any unit of the inclusive range is missing the whole lookup
/// fails — a partially quoted range is worse than no result.
pub fn resolve_reading(
    index: &CorpusIndex,
    reference: &Reference,
) -> Result<DailyReading, DailyError> {
    let units = index
        .resolve_range(reference)
        .map_err(|unit| DailyError::MissingUnit {
            reference: reference.to_string(),
            unit,
        })?;

    let text = units
        .iter()
        .map(|u| u.body.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let display = Reference {
        collection_name: units[0].collection_name.clone(),
        ..reference.clone()
    };

    Ok(DailyReading {
        reference: display.to_string(),
        text,
    })
}

/// Select and resolve the reading for `date` from a reference list.
pub fn reading_for_date(
    index: &CorpusIndex,
    date: &str,
    references: &[String],
) -> Result<DailyReading, DailyError> {
    let selected = reference_for_date(date, references).ok_or(DailyError::EmptyList)?;
    let reference: Reference = selected.parse().map_err(|source| DailyError::BadReference {
        reference: selected.to_string(),
        source,
    })?;
    resolve_reading(index, &reference)
}
