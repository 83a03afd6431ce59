//! Trait definitions for the fetch collaborators.

use async_trait::async_trait;
use std::path::Path;

use super::error::{FetchError, ProvisionError};
use super::types::{AssetInfo, ResultsPage};

/// Fetches one page of search results for a keyword.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the given 1-based results page.
    ///
    /// Implementations must report `is_empty_search` on the page rather than
    /// returning an empty item list, so the indexer can distinguish "no
    /// matches" from "no items on this page".
    async fn fetch_results_page(
        &self,
        keyword: &str,
        page: u32,
    ) -> Result<ResultsPage, FetchError>;
}

/// Resolves an item's detail page into a downloadable asset.
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    /// Fetch the asset URL and authoritative title for a detail page.
    ///
    /// Returns `FetchError::NotFound` when the page has no download link.
    async fn fetch_asset_info(&self, detail_link: &str) -> Result<AssetInfo, FetchError>;
}

/// Transfers an asset to a local file.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Stream the asset at `asset_url` into `destination`.
    async fn download(&self, asset_url: &str, destination: &Path) -> Result<(), FetchError>;
}

/// Ensures the download destination directory exists.
#[async_trait]
pub trait DirectoryProvisioner: Send + Sync {
    /// Idempotently create `path` as a directory.
    ///
    /// An existing directory is fine; an existing file at `path` is a fatal
    /// configuration error.
    async fn ensure(&self, path: &Path) -> Result<(), ProvisionError>;
}
