//! In-memory corpus index.
//!
//! Built once from a [`Corpus`] at load time, the index turns the flat unit
//! list into the lookup structures every query runs against: an
//! ordered-by-appearance collection table (with first/last sequence per
//! collection) and a `(collection, sequence) → units` chapter map. There is
//! no search index — substring and keyword search scan linearly in corpus
//! order, which is fast enough for corpora of this size.
//!
//! Collection-name matching trims whitespace and tolerates known historical
//! and alternate spellings through a fixed alias table.

use std::collections::HashMap;

use crate::error::LoadError;
use crate::models::{Corpus, CorpusMeta, TextUnit};
use crate::reference::Reference;

/// Default cap on the number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Known alternate spellings mapped to the canonical collection name.
const COLLECTION_ALIASES: &[(&str, &str)] = &[
    ("1st Peter", "1 Peter"),
    ("2nd Peter", "2 Peter"),
    ("1st John", "1 John"),
    ("2nd John", "2 John"),
    ("3rd John", "3 John"),
    ("1st Corinthians", "1 Corinthians"),
    ("2nd Corinthians", "2 Corinthians"),
    ("1st Thessalonians", "1 Thessalonians"),
    ("2nd Thessalonians", "2 Thessalonians"),
    ("1st Timothy", "1 Timothy"),
    ("2nd Timothy", "2 Timothy"),
    ("1st Samuel", "1 Samuel"),
    ("2nd Samuel", "2 Samuel"),
    ("1st Kings", "1 Kings"),
    ("2nd Kings", "2 Kings"),
    ("1st Chronicles", "1 Chronicles"),
    ("2nd Chronicles", "2 Chronicles"),
    ("Psalm", "Psalms"),
    ("Song of Songs", "Song of Solomon"),
    ("Canticles", "Song of Solomon"),
    ("Revelations", "Revelation"),
];

/// Trim a collection name and resolve it through the alias table.
pub fn canonical_collection_name(name: &str) -> &str {
    let trimmed = name.trim();
    COLLECTION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(trimmed)
}

/// Summary of one collection, in corpus appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    pub name: String,
    pub chapter_count: usize,
    pub first_sequence: u32,
    pub last_sequence: u32,
    pub display_order: usize,
}

/// Summary of one chapter of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterInfo {
    pub sequence_index: u32,
    pub unit_count: usize,
}

#[derive(Debug)]
struct CollectionRecord {
    name: String,
    chapters: Vec<u32>,
    first_sequence: u32,
    last_sequence: u32,
}

/// Fast-lookup view over an immutable corpus.
#[derive(Debug)]
pub struct CorpusIndex {
    meta: CorpusMeta,
    units: Vec<TextUnit>,
    collections: Vec<CollectionRecord>,
    collection_pos: HashMap<String, usize>,
    chapters: HashMap<String, HashMap<u32, Vec<usize>>>,
}

impl CorpusIndex {
    /// Build the index from a parsed corpus. Single pass over the units;
    /// corpus order is preserved everywhere.
    pub fn build(corpus: Corpus) -> Result<CorpusIndex, LoadError> {
        if corpus.units.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut collections: Vec<CollectionRecord> = Vec::new();
        let mut collection_pos: HashMap<String, usize> = HashMap::new();
        let mut chapters: HashMap<String, HashMap<u32, Vec<usize>>> = HashMap::new();

        for (i, unit) in corpus.units.iter().enumerate() {
            let name = unit.collection_name.as_str();
            if name.trim().is_empty() {
                return Err(LoadError::InvalidUnit {
                    index: i,
                    reason: "empty collection name".to_string(),
                });
            }
            // '|' is reserved by the UnitKey string encoding.
            if name.contains('|') {
                return Err(LoadError::InvalidUnit {
                    index: i,
                    reason: format!("collection name {name:?} contains '|'"),
                });
            }

            let pos = *collection_pos.entry(name.to_string()).or_insert_with(|| {
                collections.push(CollectionRecord {
                    name: name.to_string(),
                    chapters: Vec::new(),
                    first_sequence: unit.sequence_index,
                    last_sequence: unit.sequence_index,
                });
                collections.len() - 1
            });

            let record = &mut collections[pos];
            record.first_sequence = record.first_sequence.min(unit.sequence_index);
            record.last_sequence = record.last_sequence.max(unit.sequence_index);

            let chapter_map = chapters.entry(name.to_string()).or_default();
            let chapter = chapter_map.entry(unit.sequence_index).or_default();
            if chapter.is_empty() {
                record.chapters.push(unit.sequence_index);
            }
            chapter.push(i);
        }

        Ok(CorpusIndex {
            meta: corpus.metadata,
            units: corpus.units,
            collections,
            collection_pos,
            chapters,
        })
    }

    pub fn meta(&self) -> &CorpusMeta {
        &self.meta
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Exact-match lookup. Returns the first unit in corpus order with the
    /// given number, or `None` when absent.
    pub fn find_unit(
        &self,
        collection_name: &str,
        sequence_index: u32,
        unit_number: u32,
    ) -> Option<&TextUnit> {
        self.chapter_indices(collection_name, sequence_index)?
            .iter()
            .map(|&i| &self.units[i])
            .find(|u| u.unit_number == unit_number)
    }

    /// All units of one chapter, in corpus order.
    pub fn units_for_chapter(
        &self,
        collection_name: &str,
        sequence_index: u32,
    ) -> Vec<&TextUnit> {
        self.chapter_indices(collection_name, sequence_index)
            .map(|indices| indices.iter().map(|&i| &self.units[i]).collect())
            .unwrap_or_default()
    }

    /// Chapters of one collection in appearance order, with unit counts.
    pub fn chapters_for_collection(&self, collection_name: &str) -> Vec<ChapterInfo> {
        let name = canonical_collection_name(collection_name);
        let Some(&pos) = self.collection_pos.get(name) else {
            return Vec::new();
        };
        let chapter_map = &self.chapters[name];
        self.collections[pos]
            .chapters
            .iter()
            .map(|&seq| ChapterInfo {
                sequence_index: seq,
                unit_count: chapter_map.get(&seq).map_or(0, Vec::len),
            })
            .collect()
    }

    /// All collections in corpus appearance order.
    pub fn collections_info(&self) -> Vec<CollectionInfo> {
        self.collections
            .iter()
            .enumerate()
            .map(|(order, record)| CollectionInfo {
                name: record.name.clone(),
                chapter_count: record.chapters.len(),
                first_sequence: record.first_sequence,
                last_sequence: record.last_sequence,
                display_order: order,
            })
            .collect()
    }

    /// Case-insensitive substring search over unit bodies (plus tags and
    /// author for quote-style corpora).
    ///
    /// Returns at most `limit` matches in corpus order. An empty or
    /// whitespace-only query returns nothing, not the whole corpus.
    pub fn search_contains(&self, query: &str, limit: usize) -> Vec<&TextUnit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.units
            .iter()
            .filter(|u| contains_ci(u, &needle))
            .take(limit)
            .collect()
    }

    /// Keyword search: units with a tag equal to `keyword`
    /// (case-insensitively); when no tag matches anywhere, falls back to
    /// substring containment.
    pub fn search_tag_or_contains(&self, keyword: &str) -> Vec<&TextUnit> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let tagged: Vec<&TextUnit> = self
            .units
            .iter()
            .filter(|u| u.tags.iter().any(|t| t.to_lowercase() == needle))
            .take(DEFAULT_SEARCH_LIMIT)
            .collect();
        if tagged.is_empty() {
            self.search_contains(keyword, DEFAULT_SEARCH_LIMIT)
        } else {
            tagged
        }
    }

    /// Fetch every unit of an inclusive range. All-or-nothing: the first
    /// missing unit number is returned as the error, with no partial result.
    pub fn resolve_range(&self, reference: &Reference) -> Result<Vec<&TextUnit>, u32> {
        let mut units = Vec::with_capacity(reference.unit_span() as usize);
        for n in reference.unit_numbers() {
            match self.find_unit(&reference.collection_name, reference.sequence_index, n) {
                Some(unit) => units.push(unit),
                None => return Err(n),
            }
        }
        Ok(units)
    }

    fn chapter_indices(&self, collection_name: &str, sequence_index: u32) -> Option<&Vec<usize>> {
        self.chapters
            .get(canonical_collection_name(collection_name))?
            .get(&sequence_index)
    }
}

fn contains_ci(unit: &TextUnit, needle: &str) -> bool {
    if unit.body.to_lowercase().contains(needle) {
        return true;
    }
    if unit.tags.iter().any(|t| t.to_lowercase().contains(needle)) {
        return true;
    }
    unit.author
        .as_deref()
        .is_some_and(|a| a.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(collection: &str, seq: u32, n: u32, body: &str) -> TextUnit {
        TextUnit {
            collection_name: collection.to_string(),
            sequence_index: seq,
            sub_index: 1,
            unit_number: n,
            body: body.to_string(),
            tags: Vec::new(),
            author: None,
        }
    }

    fn quote(collection: &str, n: u32, body: &str, tags: &[&str], author: &str) -> TextUnit {
        TextUnit {
            collection_name: collection.to_string(),
            sequence_index: 1,
            sub_index: 1,
            unit_number: n,
            body: body.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author: Some(author.to_string()),
        }
    }

    fn corpus(units: Vec<TextUnit>) -> Corpus {
        Corpus {
            metadata: CorpusMeta {
                name: "Test Corpus".to_string(),
                short_name: "test".to_string(),
                description: "fixture".to_string(),
            },
            units,
        }
    }

    fn scripture_index() -> CorpusIndex {
        CorpusIndex::build(corpus(vec![
            unit("Genesis", 1, 1, "In the beginning"),
            unit("Genesis", 1, 2, "the earth was without form"),
            unit("Genesis", 1, 3, "let there be light"),
            unit("Genesis", 2, 1, "the heavens were finished"),
            unit("Psalms", 23, 1, "The Lord is my shepherd"),
            unit("1 Peter", 1, 3, "a living hope"),
        ]))
        .unwrap()
    }

    #[test]
    fn test_build_rejects_empty_corpus() {
        assert!(matches!(
            CorpusIndex::build(corpus(Vec::new())),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn test_build_rejects_reserved_collection_name() {
        let err = CorpusIndex::build(corpus(vec![unit("Bad|Name", 1, 1, "x")])).unwrap_err();
        assert!(matches!(err, LoadError::InvalidUnit { index: 0, .. }));
    }

    #[test]
    fn test_find_unit_identity() {
        let index = scripture_index();
        let found = index.find_unit("Genesis", 1, 2).unwrap();
        assert_eq!(found.collection_name, "Genesis");
        assert_eq!(found.sequence_index, 1);
        assert_eq!(found.unit_number, 2);
    }

    #[test]
    fn test_find_unit_absent_is_none() {
        let index = scripture_index();
        assert!(index.find_unit("Genesis", 1, 99).is_none());
        assert!(index.find_unit("Exodus", 1, 1).is_none());
    }

    #[test]
    fn test_alias_and_whitespace_resolution() {
        let index = scripture_index();
        let direct = index.find_unit("1 Peter", 1, 3).unwrap();
        let aliased = index.find_unit("1st Peter", 1, 3).unwrap();
        let padded = index.find_unit("  1 Peter  ", 1, 3).unwrap();
        assert_eq!(direct, aliased);
        assert_eq!(direct, padded);

        assert!(index.find_unit("Psalm", 23, 1).is_some());
    }

    #[test]
    fn test_collections_in_appearance_order() {
        let index = scripture_index();
        let info = index.collections_info();
        let names: Vec<&str> = info.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Genesis", "Psalms", "1 Peter"]);
        assert_eq!(info[0].chapter_count, 2);
        assert_eq!(info[0].first_sequence, 1);
        assert_eq!(info[0].last_sequence, 2);
        assert_eq!(info[1].display_order, 1);
    }

    #[test]
    fn test_chapters_for_collection() {
        let index = scripture_index();
        let chapters = index.chapters_for_collection("Genesis");
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].sequence_index, 1);
        assert_eq!(chapters[0].unit_count, 3);
        assert_eq!(chapters[1].unit_count, 1);

        assert!(index.chapters_for_collection("Exodus").is_empty());
    }

    #[test]
    fn test_units_for_chapter_preserves_order() {
        let index = scripture_index();
        let units = index.units_for_chapter("Genesis", 1);
        let numbers: Vec<u32> = units.iter().map(|u| u.unit_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_search_contains_empty_query() {
        let index = scripture_index();
        assert!(index.search_contains("", 100).is_empty());
        assert!(index.search_contains("   ", 100).is_empty());
    }

    #[test]
    fn test_search_contains_case_insensitive_and_ordered() {
        let index = scripture_index();
        let hits = index.search_contains("THE", 100);
        assert!(!hits.is_empty());
        // Corpus order: Genesis hits precede Psalms hits.
        assert_eq!(hits[0].collection_name, "Genesis");
        for hit in &hits {
            assert!(hit.body.to_lowercase().contains("the"));
        }
    }

    #[test]
    fn test_search_contains_respects_limit() {
        let index = scripture_index();
        let hits = index.search_contains("the", 2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_search_matches_tags_and_author() {
        let index = CorpusIndex::build(corpus(vec![
            quote("Stillness", 1, "Be still and know.", &["peace", "rest"], "Anonymous"),
            quote("Stillness", 2, "Walk slowly.", &["patience"], "Teresa"),
        ]))
        .unwrap();

        let by_tag = index.search_contains("peace", 100);
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].unit_number, 1);

        let by_author = index.search_contains("teresa", 100);
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].unit_number, 2);
    }

    #[test]
    fn test_search_tag_or_contains_prefers_tag_equality() {
        let index = CorpusIndex::build(corpus(vec![
            quote("Stillness", 1, "patience is bitter", &["endurance"], "A"),
            quote("Stillness", 2, "hold fast", &["Patience"], "B"),
        ]))
        .unwrap();

        // Exact tag match wins over body containment.
        let hits = index.search_tag_or_contains("patience");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].unit_number, 2);

        // No tag anywhere equals the keyword: falls back to containment.
        let hits = index.search_tag_or_contains("bitter");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].unit_number, 1);
    }

    #[test]
    fn test_resolve_range_all_or_nothing() {
        let index = scripture_index();
        let reference: Reference = "Genesis 1:1-3".parse().unwrap();
        let units = index.resolve_range(&reference).unwrap();
        assert_eq!(units.len(), 3);

        let reference: Reference = "Genesis 1:2-5".parse().unwrap();
        assert_eq!(index.resolve_range(&reference), Err(4));
    }
}
