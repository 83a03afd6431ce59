//! Catalog indexing.
//!
//! `CatalogIndexer` drives the `PageFetcher` collaborator across all result
//! pages of a keyword search and merges the per-page listings into one
//! contiguous, 1-based, discovery-ordered `CatalogIndex`.

mod indexer;
mod types;

pub use indexer::CatalogIndexer;
pub use types::{CatalogIndex, CatalogRecord, IndexError, SearchOutcome};
