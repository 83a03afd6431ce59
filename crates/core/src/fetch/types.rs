//! Types exchanged with the fetch collaborators.

use serde::{Deserialize, Serialize};

/// One entry on a search results page, before id assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageItem {
    /// Title as shown in the result listing.
    pub title: String,
    /// Link to the item's detail page.
    pub detail_link: String,
}

/// A fetched search results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsPage {
    /// Entries in listing order.
    pub items: Vec<PageItem>,
    /// Total number of result pages for this search (>= 1).
    pub total_pages: u32,
    /// Whether the catalog reported zero matches for the keyword.
    pub is_empty_search: bool,
}

/// Asset information resolved from an item's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Direct URL of the downloadable asset.
    pub asset_url: String,
    /// Authoritative title from the detail page, used for the filename.
    pub title: String,
}
