//! Types for download execution.

use serde::Serialize;
use std::path::PathBuf;

/// Terminal state of one record's download attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The destination file already existed; no transfer was made.
    Skipped(PathBuf),
    /// The asset was transferred to the given path.
    Succeeded(PathBuf),
    /// Resolve or transfer failed; the rest of the batch continues.
    Failed(String),
}

/// Per-record result of a download batch.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadOutcome {
    pub record_id: u32,
    pub title: String,
    pub status: OutcomeStatus,
}

/// Record-level failure detail for the end-of-batch report.
#[derive(Debug, Clone, Serialize)]
pub struct FailedRecord {
    pub record_id: u32,
    pub title: String,
    pub reason: String,
}

/// Aggregated counts over a completed batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<FailedRecord>,
}

impl BatchSummary {
    /// Tally a sequence of outcomes.
    pub fn from_outcomes(outcomes: &[DownloadOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match &outcome.status {
                OutcomeStatus::Succeeded(_) => summary.succeeded += 1,
                OutcomeStatus::Skipped(_) => summary.skipped += 1,
                OutcomeStatus::Failed(reason) => {
                    summary.failed += 1;
                    summary.failures.push(FailedRecord {
                        record_id: outcome.record_id,
                        title: outcome.title.clone(),
                        reason: reason.clone(),
                    });
                }
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let outcome = DownloadOutcome {
            record_id: 7,
            title: "Book".to_string(),
            status: OutcomeStatus::Failed("no asset".to_string()),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["record_id"], 7);
        assert_eq!(json["status"]["status"], "failed");
        assert_eq!(json["status"]["detail"], "no asset");
    }

    #[test]
    fn test_summary_tallies_outcomes() {
        let outcomes = vec![
            DownloadOutcome {
                record_id: 1,
                title: "a".to_string(),
                status: OutcomeStatus::Succeeded(PathBuf::from("/books/a.pdf")),
            },
            DownloadOutcome {
                record_id: 2,
                title: "b".to_string(),
                status: OutcomeStatus::Skipped(PathBuf::from("/books/b.pdf")),
            },
            DownloadOutcome {
                record_id: 3,
                title: "c".to_string(),
                status: OutcomeStatus::Failed("no asset".to_string()),
            },
        ];

        let summary = BatchSummary::from_outcomes(&outcomes);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].record_id, 3);
        assert_eq!(summary.failures[0].reason, "no asset");
    }
}
