//! Download execution.
//!
//! `DownloadExecutor` runs the per-record state machine over a selected
//! subset of the index: resolve the asset, skip if the file already exists,
//! transfer, then pace before the next record. Records are processed
//! strictly sequentially — the sequential order plus the randomized pacing
//! is the deliberate politeness mechanism towards the origin server.

mod executor;
mod types;

pub use executor::DownloadExecutor;
pub use types::{BatchSummary, DownloadOutcome, FailedRecord, OutcomeStatus};
