//! Address-string parsing for references.
//!
//! A reference identifies one unit or an inclusive range of units within one
//! collection/sequence, written as `"<Name> <sequence>:<start>[-<end>]"` —
//! `"John 3:16"`, `"Romans 8:28-30"`, `"1 Peter 1:3"`. Parsing fails with a
//! typed [`ParseError`] on malformed chapter/verse numbers or inverted
//! ranges; it never panics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an address string could not be parsed into a [`Reference`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `<chapter>:<verse>` segment, e.g. `"Psalms"` or `"Psalms 5"`.
    #[error("missing chapter:verse segment in {0:?}")]
    MissingAddress(String),
    /// The chapter part is not a number, e.g. `"Psalms abc:1"`.
    #[error("invalid chapter number in {0:?}")]
    InvalidChapter(String),
    /// A verse part is not a number, e.g. `"Psalms 5:x"` or `"Psalms 5:1-"`.
    #[error("invalid verse number in {0:?}")]
    InvalidUnit(String),
    /// The range runs backwards, e.g. `"Psalms 5:10-3"`.
    #[error("inverted range {start}-{end}")]
    InvertedRange { start: u32, end: u32 },
}

/// A parsed address: one collection, one sequence, an inclusive unit range.
///
/// Invariant: `start_unit <= end_unit` (a single unit has `start == end`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub collection_name: String,
    pub sequence_index: u32,
    pub start_unit: u32,
    pub end_unit: u32,
}

impl Reference {
    /// Build a single-unit reference.
    pub fn single(collection_name: impl Into<String>, sequence_index: u32, unit: u32) -> Self {
        Reference {
            collection_name: collection_name.into(),
            sequence_index,
            start_unit: unit,
            end_unit: unit,
        }
    }

    /// Number of units the inclusive range nominally covers:
    /// `end_unit - start_unit + 1`.
    pub fn unit_span(&self) -> u32 {
        self.end_unit - self.start_unit + 1
    }

    /// The unit numbers of the range, in order.
    pub fn unit_numbers(&self) -> impl Iterator<Item = u32> {
        self.start_unit..=self.end_unit
    }
}

impl FromStr for Reference {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        // The collection name may itself contain spaces ("1 Peter", "Song of
        // Solomon"), so the address is everything after the LAST space.
        let (name, address) = match trimmed.rsplit_once(' ') {
            Some((name, address)) if !name.trim().is_empty() => (name.trim(), address),
            _ => return Err(ParseError::MissingAddress(input.to_string())),
        };

        let (chapter, verses) = address
            .split_once(':')
            .ok_or_else(|| ParseError::MissingAddress(input.to_string()))?;

        let sequence_index: u32 = chapter
            .parse()
            .map_err(|_| ParseError::InvalidChapter(input.to_string()))?;

        let (start, end) = match verses.split_once('-') {
            Some((start, end)) => {
                let start: u32 = start
                    .parse()
                    .map_err(|_| ParseError::InvalidUnit(input.to_string()))?;
                let end: u32 = end
                    .parse()
                    .map_err(|_| ParseError::InvalidUnit(input.to_string()))?;
                (start, end)
            }
            None => {
                let unit: u32 = verses
                    .parse()
                    .map_err(|_| ParseError::InvalidUnit(input.to_string()))?;
                (unit, unit)
            }
        };

        if start > end {
            return Err(ParseError::InvertedRange { start, end });
        }

        Ok(Reference {
            collection_name: name.to_string(),
            sequence_index,
            start_unit: start,
            end_unit: end,
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_unit == self.end_unit {
            write!(
                f,
                "{} {}:{}",
                self.collection_name, self.sequence_index, self.start_unit
            )
        } else {
            write!(
                f,
                "{} {}:{}-{}",
                self.collection_name, self.sequence_index, self.start_unit, self.end_unit
            )
        }
    }
}
