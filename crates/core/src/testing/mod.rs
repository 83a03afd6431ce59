//! Mock collaborators and fixtures for testing the pipeline.
//!
//! These implement the `fetch` traits with scripted behavior: scripted
//! result pages, per-link asset info, failure injection, and call recording
//! for assertions.

mod mock_detail_fetcher;
mod mock_page_fetcher;
mod mock_transport;

pub use mock_detail_fetcher::MockDetailFetcher;
pub use mock_page_fetcher::MockPageFetcher;
pub use mock_transport::MockTransport;

/// Small builders for test data.
pub mod fixtures {
    use crate::fetch::PageItem;
    use crate::indexer::CatalogRecord;

    /// A page item with a detail link derived from the title.
    pub fn item(title: &str) -> PageItem {
        PageItem {
            title: title.to_string(),
            detail_link: format!("http://cat.example/{}/", title.replace(' ', "-")),
        }
    }

    /// A listing of page items from titles.
    pub fn items(titles: &[&str]) -> Vec<PageItem> {
        titles.iter().map(|t| item(t)).collect()
    }

    /// A catalog record with a detail link derived from the title.
    pub fn record(id: u32, title: &str) -> CatalogRecord {
        let page_item = item(title);
        CatalogRecord {
            id,
            title: page_item.title,
            detail_link: page_item.detail_link,
        }
    }
}
