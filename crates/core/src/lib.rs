pub mod config;
pub mod downloader;
pub mod events;
pub mod fetch;
pub mod indexer;
pub mod selection;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    DownloadConfig, PacingConfig,
};
pub use downloader::{BatchSummary, DownloadExecutor, DownloadOutcome, FailedRecord, OutcomeStatus};
pub use events::PipelineEvent;
pub use fetch::{
    AssetInfo, DetailFetcher, DirectoryProvisioner, FetchError, FsProvisioner, HttpCatalog,
    PageFetcher, PageItem, ProvisionError, ResultsPage, Transport,
};
pub use indexer::{CatalogIndex, CatalogIndexer, CatalogRecord, IndexError, SearchOutcome};
pub use selection::{parse_selection, SelectionSet};
