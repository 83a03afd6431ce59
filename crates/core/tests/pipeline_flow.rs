//! End-to-end pipeline tests over the mock collaborators:
//! search -> index -> selection -> download.

use std::sync::Arc;

use tempfile::TempDir;

use bookgrab_core::testing::{fixtures, MockDetailFetcher, MockPageFetcher, MockTransport};
use bookgrab_core::{
    parse_selection, AssetInfo, BatchSummary, CatalogIndex, CatalogIndexer, CatalogRecord,
    DownloadConfig, DownloadExecutor, OutcomeStatus, PacingConfig, SearchOutcome,
};

async fn search(pages: Arc<MockPageFetcher>, keyword: &str) -> CatalogIndex {
    match CatalogIndexer::new(pages).search(keyword, None).await.unwrap() {
        SearchOutcome::Found(index) => index,
        SearchOutcome::NoResults => panic!("expected results"),
    }
}

fn executor(
    details: Arc<MockDetailFetcher>,
    transport: Arc<MockTransport>,
    dir: &TempDir,
) -> DownloadExecutor {
    let config = DownloadConfig {
        dir: dir.path().to_path_buf(),
        pacing: PacingConfig::none(),
    };
    DownloadExecutor::new(details, transport, &config)
}

async fn register_assets(details: &MockDetailFetcher, records: &[CatalogRecord]) {
    for record in records {
        details
            .set_asset(
                &record.detail_link,
                AssetInfo {
                    asset_url: format!("http://cdn.example/{}.pdf", record.id),
                    title: record.title.clone(),
                },
            )
            .await;
    }
}

#[tokio::test]
async fn search_assigns_contiguous_ids_across_uneven_pages() {
    let pages = Arc::new(MockPageFetcher::with_pages(vec![
        fixtures::items(&["one", "two", "three"]),
        fixtures::items(&["four"]),
        fixtures::items(&["five", "six"]),
    ]));

    let index = search(pages, "keyword").await;

    assert_eq!(index.len(), 6);
    let ids: Vec<u32> = index.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(index.get(4).unwrap().title, "four");
}

#[tokio::test]
async fn zero_match_search_is_no_results_not_empty_index() {
    let pages = Arc::new(MockPageFetcher::new());
    pages.set_empty_search(true).await;

    let outcome = CatalogIndexer::new(pages)
        .search("no such book", None)
        .await
        .unwrap();
    assert!(matches!(outcome, SearchOutcome::NoResults));
}

#[tokio::test]
async fn selection_picks_records_from_the_index() {
    let pages = Arc::new(MockPageFetcher::with_pages(vec![fixtures::items(&[
        "a", "b", "c", "d", "e",
    ])]));
    let index = search(pages, "keyword").await;

    let selection = parse_selection("2-3,5", index.len()).unwrap();
    let chosen: Vec<&str> = selection
        .ids()
        .iter()
        .filter_map(|&id| index.get(id))
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(chosen, vec!["b", "c", "e"]);
}

#[tokio::test]
async fn full_run_then_rerun_skips_everything() {
    let temp = TempDir::new().unwrap();
    let pages = Arc::new(MockPageFetcher::with_pages(vec![fixtures::items(&[
        "alpha", "beta",
    ])]));
    let details = Arc::new(MockDetailFetcher::new());
    let transport = Arc::new(MockTransport::new());

    let index = search(pages, "keyword").await;
    register_assets(&details, index.records()).await;

    let executor = executor(details, transport.clone(), &temp);

    let first = executor.download_all(index.records()).await;
    assert!(first
        .iter()
        .all(|o| matches!(o.status, OutcomeStatus::Succeeded(_))));
    assert_eq!(transport.transfer_count().await, 2);

    // Second run: every file already exists, zero network transfers.
    let second = executor.download_all(index.records()).await;
    assert!(second
        .iter()
        .all(|o| matches!(o.status, OutcomeStatus::Skipped(_))));
    assert_eq!(transport.transfer_count().await, 2);
}

#[tokio::test]
async fn missing_detail_asset_fails_only_that_record() {
    let temp = TempDir::new().unwrap();
    let pages = Arc::new(MockPageFetcher::with_pages(vec![fixtures::items(&[
        "good one", "gone", "good two",
    ])]));
    let details = Arc::new(MockDetailFetcher::new());
    let transport = Arc::new(MockTransport::new());

    let index = search(pages, "keyword").await;
    // Register assets for records 1 and 3 only; record 2 resolves NotFound.
    register_assets(&details, &[index.get(1).unwrap().clone()]).await;
    register_assets(&details, &[index.get(3).unwrap().clone()]).await;

    let executor = executor(details, transport.clone(), &temp);
    let outcomes = executor.download_all(index.records()).await;

    assert!(matches!(outcomes[0].status, OutcomeStatus::Succeeded(_)));
    assert!(matches!(outcomes[1].status, OutcomeStatus::Failed(_)));
    assert!(matches!(outcomes[2].status, OutcomeStatus::Succeeded(_)));

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].record_id, 2);
    assert_eq!(transport.transfer_count().await, 2);
}

#[tokio::test]
async fn mixed_batch_reports_all_three_outcome_kinds() {
    let temp = TempDir::new().unwrap();
    let pages = Arc::new(MockPageFetcher::with_pages(vec![fixtures::items(&[
        "fresh", "existing", "broken",
    ])]));
    let details = Arc::new(MockDetailFetcher::new());
    let transport = Arc::new(MockTransport::new());

    let index = search(pages, "keyword").await;
    register_assets(&details, &[index.get(1).unwrap().clone()]).await;
    register_assets(&details, &[index.get(2).unwrap().clone()]).await;
    std::fs::write(temp.path().join("existing.pdf"), b"old run").unwrap();

    let executor = executor(details, transport, &temp);
    let outcomes = executor.download_all(index.records()).await;

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total(), 3);
}

#[tokio::test]
async fn probe_failure_surfaces_page_one() {
    let pages = Arc::new(MockPageFetcher::with_pages(vec![fixtures::items(&["a"])]));
    pages.fail_on_page(1).await;

    let err = CatalogIndexer::new(pages)
        .search("keyword", None)
        .await
        .unwrap_err();
    let bookgrab_core::IndexError::PageFetch { page, .. } = err;
    assert_eq!(page, 1);
}
