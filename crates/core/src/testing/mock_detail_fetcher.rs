//! Mock detail fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetch::{AssetInfo, DetailFetcher, FetchError};

/// Mock implementation of the `DetailFetcher` trait.
///
/// Resolves detail links from a scripted map; any unregistered link yields
/// `FetchError::NotFound`, which is also how a missing download link on a
/// real detail page surfaces.
pub struct MockDetailFetcher {
    assets: Arc<RwLock<HashMap<String, AssetInfo>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl Default for MockDetailFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDetailFetcher {
    pub fn new() -> Self {
        Self {
            assets: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register the asset info returned for a detail link.
    pub async fn set_asset(&self, detail_link: &str, info: AssetInfo) {
        self.assets
            .write()
            .await
            .insert(detail_link.to_string(), info);
    }

    /// Detail links fetched so far, in order.
    pub async fn recorded_calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl DetailFetcher for MockDetailFetcher {
    async fn fetch_asset_info(&self, detail_link: &str) -> Result<AssetInfo, FetchError> {
        self.calls.write().await.push(detail_link.to_string());
        self.assets
            .read()
            .await
            .get(detail_link)
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}
