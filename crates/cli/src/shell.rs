//! Interactive shell over the pipeline.
//!
//! The prompting loop is an explicit finite state machine: keyword, then
//! selection, then confirmation, then back. All real work happens in the
//! core crate; the shell only vets input, renders the index and progress
//! events, and applies the "all"/"exit"/blank shortcuts the selection
//! grammar itself does not know about.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use bookgrab_core::{
    parse_selection, BatchSummary, CatalogIndex, CatalogIndexer, CatalogRecord, Config,
    DirectoryProvisioner, DownloadExecutor, FsProvisioner, OutcomeStatus, PipelineEvent,
    SearchOutcome, SelectionSet,
};

const SELECTION_HELP: &str = "To download books provide IDs in the following formats:
    '1,6,8,9' - one or more IDs separated by commas.
    '2-7,10-15' - one or more ranges of IDs.
    '1,4,2-7,12,25,9-10' - a mix of the two above.

Additional options:
    'all' - download all found books.
    'exit' or blank - go back.
";

/// Shell states, driven by operator input.
enum State {
    AwaitingKeyword,
    AwaitingSelection {
        index: CatalogIndex,
    },
    AwaitingConfirmation {
        index: CatalogIndex,
        selection: SelectionSet,
    },
    Done,
}

pub struct Shell {
    indexer: CatalogIndexer,
    executor: DownloadExecutor,
    provisioner: FsProvisioner,
    config: Config,
}

impl Shell {
    pub fn new(
        indexer: CatalogIndexer,
        executor: DownloadExecutor,
        provisioner: FsProvisioner,
        config: Config,
    ) -> Self {
        Self {
            indexer,
            executor,
            provisioner,
            config,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let mut state = State::AwaitingKeyword;
        loop {
            state = match state {
                State::AwaitingKeyword => self.on_keyword().await?,
                State::AwaitingSelection { index } => self.on_selection(index)?,
                State::AwaitingConfirmation { index, selection } => {
                    self.on_confirmation(index, selection).await?
                }
                State::Done => return Ok(()),
            };
        }
    }

    async fn on_keyword(&self) -> Result<State> {
        let input = prompt("What books are you looking for? [exit]: ")?;
        let keyword = input.trim();
        if keyword.is_empty() || keyword.eq_ignore_ascii_case("exit") {
            return Ok(State::Done);
        }

        println!("Searching for \"{}\" books...", keyword);
        let (tx, rx) = mpsc::channel(64);
        let printer = spawn_event_printer(rx);
        let outcome = self
            .indexer
            .search_with_progress(keyword, self.config.catalog.max_pages, tx)
            .await;
        let _ = printer.await;

        match outcome {
            Ok(SearchOutcome::NoResults) => {
                println!("No books found.");
                Ok(State::AwaitingKeyword)
            }
            Ok(SearchOutcome::Found(index)) => {
                if index.is_empty() {
                    println!("No books found.");
                    return Ok(State::AwaitingKeyword);
                }
                show_index(&index);
                Ok(State::AwaitingSelection { index })
            }
            Err(e) => {
                println!("Search aborted: {}", error_chain(&e));
                Ok(State::AwaitingKeyword)
            }
        }
    }

    fn on_selection(&self, index: CatalogIndex) -> Result<State> {
        println!("{}", SELECTION_HELP);
        let input = prompt("IDs [exit]: ")?;
        let input = input.trim();

        if input.is_empty() || input.eq_ignore_ascii_case("exit") {
            return Ok(State::AwaitingKeyword);
        }

        let selection = if input.eq_ignore_ascii_case("all") {
            parse_selection(&format!("1-{}", index.len()), index.len())
        } else {
            parse_selection(input, index.len())
        };

        match selection {
            Some(selection) => {
                println!("Selected {} book(s):", selection.len());
                for record in selected_records(&index, &selection) {
                    println!("{:>4}. \"{}\"", record.id, record.title);
                }
                Ok(State::AwaitingConfirmation { index, selection })
            }
            None => {
                println!("No IDs recognized, try again.");
                Ok(State::AwaitingSelection { index })
            }
        }
    }

    async fn on_confirmation(
        &self,
        index: CatalogIndex,
        selection: SelectionSet,
    ) -> Result<State> {
        let input = prompt("Do you want to proceed? (y/n): ")?;
        match input.trim().to_lowercase().as_str() {
            "y" => {
                self.download_batch(&index, &selection).await?;
                Ok(State::AwaitingKeyword)
            }
            "n" => Ok(State::AwaitingSelection { index }),
            _ => Ok(State::AwaitingConfirmation { index, selection }),
        }
    }

    async fn download_batch(&self, index: &CatalogIndex, selection: &SelectionSet) -> Result<()> {
        // Provisioning problems are configuration errors; surface them
        // before the first download rather than mid-batch.
        self.provisioner
            .ensure(&self.config.download.dir)
            .await
            .with_context(|| {
                format!(
                    "Cannot use download directory {:?}",
                    self.config.download.dir
                )
            })?;

        let records = selected_records(index, selection);
        let (tx, rx) = mpsc::channel(64);
        let printer = spawn_event_printer(rx);
        let outcomes = self.executor.download_all_with_progress(&records, tx).await;
        let _ = printer.await;

        let summary = BatchSummary::from_outcomes(&outcomes);
        println!(
            "Done: {} downloaded, {} skipped, {} failed.",
            summary.succeeded, summary.skipped, summary.failed
        );
        for failure in &summary.failures {
            println!(
                "  failed {:>4}. \"{}\": {}",
                failure.record_id, failure.title, failure.reason
            );
        }
        Ok(())
    }
}

fn selected_records(index: &CatalogIndex, selection: &SelectionSet) -> Vec<CatalogRecord> {
    selection
        .ids()
        .iter()
        .filter_map(|&id| index.get(id))
        .cloned()
        .collect()
}

fn show_index(index: &CatalogIndex) {
    println!("  ID  Title");
    for record in index.iter() {
        println!("{:>4}. \"{}\"", record.id, record.title);
    }
    println!();
}

fn spawn_event_printer(mut rx: mpsc::Receiver<PipelineEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            render_event(&event);
        }
    })
}

fn render_event(event: &PipelineEvent) {
    match event {
        PipelineEvent::SearchStarted { .. } => {}
        PipelineEvent::PageScanned {
            page,
            total_pages,
            items,
        } => {
            println!("Scanned page {}/{} ({} items)", page, total_pages, items);
        }
        PipelineEvent::Outcome(outcome) => match &outcome.status {
            OutcomeStatus::Succeeded(path) => {
                println!("Downloaded \"{}\" -> {}", outcome.title, path.display());
            }
            OutcomeStatus::Skipped(path) => {
                println!("File already exists: {}", path.display());
            }
            OutcomeStatus::Failed(reason) => {
                println!("Failed \"{}\": {}", outcome.title, reason);
            }
        },
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line)
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        message.push_str(": ");
        message.push_str(&s.to_string());
        source = s.source();
    }
    message
}
