//! Status events emitted while the pipeline runs.
//!
//! Both the indexer and the download executor accept an optional
//! `mpsc::Sender<PipelineEvent>`. Events are delivered with `try_send`, so a
//! dropped or lagging receiver never stalls the pipeline.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::downloader::DownloadOutcome;

/// A progress event from an indexing or download run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A search was started for the given keyword.
    SearchStarted { keyword: String },
    /// One result page was fetched and merged into the index.
    PageScanned {
        page: u32,
        total_pages: u32,
        items: usize,
    },
    /// One record finished the download state machine.
    Outcome(DownloadOutcome),
}

/// Send an event if a sender is attached, dropping it on a full channel.
pub(crate) fn emit(events: &Option<mpsc::Sender<PipelineEvent>>, event: PipelineEvent) {
    if let Some(tx) = events {
        let _ = tx.try_send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::OutcomeStatus;

    #[test]
    fn test_emit_without_sender_is_noop() {
        emit(
            &None,
            PipelineEvent::SearchStarted {
                keyword: "rust".to_string(),
            },
        );
    }

    #[tokio::test]
    async fn test_emit_delivers_event() {
        let (tx, mut rx) = mpsc::channel(4);
        emit(
            &Some(tx),
            PipelineEvent::PageScanned {
                page: 1,
                total_pages: 2,
                items: 10,
            },
        );
        match rx.recv().await.unwrap() {
            PipelineEvent::PageScanned { page, items, .. } => {
                assert_eq!(page, 1);
                assert_eq!(items, 10);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_emit_drops_on_full_channel() {
        let (tx, _rx) = mpsc::channel(1);
        let outcome = DownloadOutcome {
            record_id: 1,
            title: "a".to_string(),
            status: OutcomeStatus::Failed("x".to_string()),
        };
        emit(&Some(tx.clone()), PipelineEvent::Outcome(outcome.clone()));
        // Channel is full now; this must not panic or block.
        emit(&Some(tx), PipelineEvent::Outcome(outcome));
    }
}
