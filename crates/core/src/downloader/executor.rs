//! The download executor.

use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{DownloadConfig, PacingConfig};
use crate::events::{emit, PipelineEvent};
use crate::fetch::{DetailFetcher, Transport};
use crate::indexer::CatalogRecord;

use super::types::{DownloadOutcome, OutcomeStatus};

/// Runs the per-record download state machine over a selected subset.
pub struct DownloadExecutor {
    details: Arc<dyn DetailFetcher>,
    transport: Arc<dyn Transport>,
    dir: PathBuf,
    pacing: PacingConfig,
}

impl DownloadExecutor {
    pub fn new(
        details: Arc<dyn DetailFetcher>,
        transport: Arc<dyn Transport>,
        config: &DownloadConfig,
    ) -> Self {
        Self {
            details,
            transport,
            dir: config.dir.clone(),
            pacing: config.pacing,
        }
    }

    /// Download every record in order, one at a time.
    ///
    /// The destination directory must already be provisioned. A failure on
    /// one record never aborts the batch; the returned outcomes are in input
    /// order, one per record.
    pub async fn download_all(&self, records: &[CatalogRecord]) -> Vec<DownloadOutcome> {
        self.run(records, None).await
    }

    /// Download with progress reporting, one event per outcome.
    pub async fn download_all_with_progress(
        &self,
        records: &[CatalogRecord],
        events: mpsc::Sender<PipelineEvent>,
    ) -> Vec<DownloadOutcome> {
        self.run(records, Some(events)).await
    }

    async fn run(
        &self,
        records: &[CatalogRecord],
        events: Option<mpsc::Sender<PipelineEvent>>,
    ) -> Vec<DownloadOutcome> {
        info!(records = records.len(), dir = %self.dir.display(), "Starting download batch");

        let mut outcomes = Vec::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let status = self.process(record).await;

            match &status {
                OutcomeStatus::Succeeded(path) => {
                    info!(id = record.id, path = %path.display(), "Downloaded");
                }
                OutcomeStatus::Skipped(path) => {
                    info!(id = record.id, path = %path.display(), "Already exists, skipped");
                }
                OutcomeStatus::Failed(reason) => {
                    warn!(id = record.id, reason = %reason, "Download failed");
                }
            }

            // Pacing applies only around actual transfers: after a success
            // with more records to go, never after a skip or a failure.
            let pace = matches!(status, OutcomeStatus::Succeeded(_))
                && position + 1 < records.len();

            let outcome = DownloadOutcome {
                record_id: record.id,
                title: record.title.clone(),
                status,
            };
            emit(&events, PipelineEvent::Outcome(outcome.clone()));
            outcomes.push(outcome);

            if pace {
                self.pace().await;
            }
        }

        outcomes
    }

    /// Resolve, check existence, transfer.
    async fn process(&self, record: &CatalogRecord) -> OutcomeStatus {
        // The detail-page title is authoritative for the filename; the
        // listing title may be formatted differently.
        let info = match self.details.fetch_asset_info(&record.detail_link).await {
            Ok(info) => info,
            Err(e) => return OutcomeStatus::Failed(e.to_string()),
        };

        let filename = format!("{}.pdf", sanitize_filename(&info.title));
        let path = self.dir.join(filename);

        if path.exists() {
            return OutcomeStatus::Skipped(path);
        }

        match self.transport.download(&info.asset_url, &path).await {
            Ok(()) => OutcomeStatus::Succeeded(path),
            Err(e) => OutcomeStatus::Failed(e.to_string()),
        }
    }

    /// Sleep a uniformly random duration within the configured pacing window.
    async fn pace(&self) {
        let delay_secs = {
            let mut rng = rand::thread_rng();
            rng.gen_range(self.pacing.min_delay_secs..=self.pacing.max_delay_secs)
        };
        if delay_secs > 0.0 {
            debug!(delay_secs = delay_secs, "Pacing before next download");
            tokio::time::sleep(Duration::from_secs_f64(delay_secs)).await;
        }
    }
}

/// Replace path separators in a title so it is safe as a filename.
fn sanitize_filename(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c => c,
        })
        .collect()
}
