//! The catalog indexer.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::events::{emit, PipelineEvent};
use crate::fetch::{PageFetcher, PageItem};

use super::types::{CatalogIndex, IndexError, SearchOutcome};

/// Builds a `CatalogIndex` for a keyword by scanning result pages in order.
///
/// The indexer itself is pure given a working page fetcher: it performs no
/// side effects beyond the collaborator's network calls.
pub struct CatalogIndexer {
    pages: Arc<dyn PageFetcher>,
}

impl CatalogIndexer {
    pub fn new(pages: Arc<dyn PageFetcher>) -> Self {
        Self { pages }
    }

    /// Search the catalog for `keyword`.
    ///
    /// `keyword` must already be vetted by the caller (non-blank after
    /// trimming); `max_pages`, when given, must be at least 1 and caps how
    /// many result pages are scanned.
    pub async fn search(
        &self,
        keyword: &str,
        max_pages: Option<u32>,
    ) -> Result<SearchOutcome, IndexError> {
        self.run_search(keyword, max_pages, None).await
    }

    /// Search with progress reporting, one event per scanned page.
    pub async fn search_with_progress(
        &self,
        keyword: &str,
        max_pages: Option<u32>,
        events: mpsc::Sender<PipelineEvent>,
    ) -> Result<SearchOutcome, IndexError> {
        self.run_search(keyword, max_pages, Some(events)).await
    }

    async fn run_search(
        &self,
        keyword: &str,
        max_pages: Option<u32>,
        events: Option<mpsc::Sender<PipelineEvent>>,
    ) -> Result<SearchOutcome, IndexError> {
        info!(keyword = %keyword, "Starting catalog search");
        emit(
            &events,
            PipelineEvent::SearchStarted {
                keyword: keyword.to_string(),
            },
        );

        // First query: detects the zero-result case and how many pages exist.
        let probe = self
            .pages
            .fetch_results_page(keyword, 1)
            .await
            .map_err(|source| IndexError::PageFetch { page: 1, source })?;

        if probe.is_empty_search {
            info!(keyword = %keyword, "No results");
            return Ok(SearchOutcome::NoResults);
        }

        let total_pages = probe.total_pages.max(1);
        let effective_pages = max_pages.map_or(total_pages, |m| m.min(total_pages));
        debug!(
            total_pages = total_pages,
            effective_pages = effective_pages,
            "Pagination resolved"
        );

        let mut items: Vec<PageItem> = Vec::new();
        for page in 1..=effective_pages {
            let result = self
                .pages
                .fetch_results_page(keyword, page)
                .await
                .map_err(|source| IndexError::PageFetch { page, source })?;

            debug!(page = page, items = result.items.len(), "Page scanned");
            emit(
                &events,
                PipelineEvent::PageScanned {
                    page,
                    total_pages: effective_pages,
                    items: result.items.len(),
                },
            );
            items.extend(result.items);
        }

        let index = CatalogIndex::from_items(items);
        info!(
            keyword = %keyword,
            pages = effective_pages,
            records = index.len(),
            "Search complete"
        );
        Ok(SearchOutcome::Found(index))
    }
}
