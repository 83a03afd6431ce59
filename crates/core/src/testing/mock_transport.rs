//! Mock transport for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetch::{FetchError, Transport};

/// A recorded transfer for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransfer {
    pub asset_url: String,
    pub destination: PathBuf,
}

/// Mock implementation of the `Transport` trait.
///
/// Writes a small marker payload to the destination so existence checks in
/// later runs behave like they would after a real transfer, records every
/// transfer, and can fail chosen URLs.
pub struct MockTransport {
    transfers: Arc<RwLock<Vec<RecordedTransfer>>>,
    failing_urls: Arc<RwLock<HashSet<String>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            transfers: Arc::new(RwLock::new(Vec::new())),
            failing_urls: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Make transfers of the given URL fail.
    pub async fn fail_url(&self, asset_url: &str) {
        self.failing_urls.write().await.insert(asset_url.to_string());
    }

    /// Transfers performed so far, in order.
    pub async fn recorded_transfers(&self) -> Vec<RecordedTransfer> {
        self.transfers.read().await.clone()
    }

    /// Number of transfers performed (skips never reach the transport).
    pub async fn transfer_count(&self) -> usize {
        self.transfers.read().await.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn download(&self, asset_url: &str, destination: &Path) -> Result<(), FetchError> {
        if self.failing_urls.read().await.contains(asset_url) {
            return Err(FetchError::ConnectionFailed(
                "injected transfer failure".to_string(),
            ));
        }

        tokio::fs::write(destination, b"mock payload")
            .await
            .map_err(|e| FetchError::Write {
                path: destination.to_path_buf(),
                source: e,
            })?;

        self.transfers.write().await.push(RecordedTransfer {
            asset_url: asset_url.to_string(),
            destination: destination.to_path_buf(),
        });
        Ok(())
    }
}
