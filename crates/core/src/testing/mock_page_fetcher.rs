//! Mock page fetcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetch::{FetchError, PageFetcher, PageItem, ResultsPage};

/// A recorded page fetch for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPageFetch {
    pub keyword: String,
    pub page: u32,
}

/// Mock implementation of the `PageFetcher` trait.
///
/// Serves scripted per-page item lists, reports the scripted page count in
/// every response, and can simulate a zero-result search or a failure on a
/// chosen page.
pub struct MockPageFetcher {
    pages: Arc<RwLock<Vec<Vec<PageItem>>>>,
    empty_search: Arc<RwLock<bool>>,
    failing_page: Arc<RwLock<Option<u32>>>,
    calls: Arc<RwLock<Vec<RecordedPageFetch>>>,
}

impl Default for MockPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPageFetcher {
    /// Create a mock with no result pages.
    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(Vec::new())),
            empty_search: Arc::new(RwLock::new(false)),
            failing_page: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a mock serving the given pages, in order.
    pub fn with_pages(pages: Vec<Vec<PageItem>>) -> Self {
        Self {
            pages: Arc::new(RwLock::new(pages)),
            empty_search: Arc::new(RwLock::new(false)),
            failing_page: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the scripted pages.
    pub async fn set_pages(&self, pages: Vec<Vec<PageItem>>) {
        *self.pages.write().await = pages;
    }

    /// Make every fetch report a zero-result search.
    pub async fn set_empty_search(&self, empty: bool) {
        *self.empty_search.write().await = empty;
    }

    /// Make fetches of the given page number fail.
    pub async fn fail_on_page(&self, page: u32) {
        *self.failing_page.write().await = Some(page);
    }

    /// Calls recorded so far.
    pub async fn recorded_calls(&self) -> Vec<RecordedPageFetch> {
        self.calls.read().await.clone()
    }

    /// Number of fetches performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch_results_page(
        &self,
        keyword: &str,
        page: u32,
    ) -> Result<ResultsPage, FetchError> {
        self.calls.write().await.push(RecordedPageFetch {
            keyword: keyword.to_string(),
            page,
        });

        if *self.failing_page.read().await == Some(page) {
            return Err(FetchError::ConnectionFailed("injected failure".to_string()));
        }

        if *self.empty_search.read().await {
            return Ok(ResultsPage {
                items: Vec::new(),
                total_pages: 1,
                is_empty_search: true,
            });
        }

        let pages = self.pages.read().await;
        let total_pages = pages.len().max(1) as u32;
        let items = pages
            .get(page.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_default();

        Ok(ResultsPage {
            items,
            total_pages,
            is_empty_search: false,
        })
    }
}
