//! Types for the catalog index.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetch::{FetchError, PageItem};

/// One indexed catalog entry.
///
/// The id is assigned sequentially starting at 1 in discovery order and is
/// only meaningful within the index it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: u32,
    pub title: String,
    pub detail_link: String,
}

/// Immutable id-keyed snapshot of one search's matching records.
///
/// Ids are contiguous `1..=len()`; the index is built once per search and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogIndex {
    records: Vec<CatalogRecord>,
}

impl CatalogIndex {
    /// Build an index from page items in discovery order, assigning ids
    /// `1..=N`.
    pub fn from_items(items: Vec<PageItem>) -> Self {
        let records = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| CatalogRecord {
                id: (i + 1) as u32,
                title: item.title,
                detail_link: item.detail_link,
            })
            .collect();
        Self { records }
    }

    /// Number of records in the index.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest assigned id, or 0 for an empty index.
    pub fn max_id(&self) -> u32 {
        self.records.len() as u32
    }

    /// Look up a record by its 1-based id.
    pub fn get(&self, id: u32) -> Option<&CatalogRecord> {
        if id == 0 {
            return None;
        }
        self.records.get((id - 1) as usize)
    }

    /// Records in id order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.records.iter()
    }
}

/// Result of a keyword search.
///
/// A search with zero matches is a distinct, expected outcome — not an empty
/// index and not an error.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(CatalogIndex),
    NoResults,
}

/// Errors that abort a search.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A page fetch failed mid-search. The whole search is aborted: a
    /// partial index would break the contiguous-id invariant and silently
    /// misrepresent what the catalog has.
    #[error("Fetching results page {page} failed")]
    PageFetch {
        page: u32,
        #[source]
        source: FetchError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(titles: &[&str]) -> Vec<PageItem> {
        titles
            .iter()
            .map(|t| PageItem {
                title: t.to_string(),
                detail_link: format!("http://cat.example/{}", t),
            })
            .collect()
    }

    #[test]
    fn test_ids_are_contiguous_from_one() {
        let index = CatalogIndex::from_items(items(&["a", "b", "c"]));
        let ids: Vec<u32> = index.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(index.max_id(), 3);
    }

    #[test]
    fn test_get_by_id() {
        let index = CatalogIndex::from_items(items(&["a", "b"]));
        assert_eq!(index.get(1).unwrap().title, "a");
        assert_eq!(index.get(2).unwrap().title, "b");
        assert!(index.get(0).is_none());
        assert!(index.get(3).is_none());
    }

    #[test]
    fn test_empty_index() {
        let index = CatalogIndex::from_items(vec![]);
        assert!(index.is_empty());
        assert_eq!(index.max_id(), 0);
    }
}
