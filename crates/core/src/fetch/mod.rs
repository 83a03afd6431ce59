//! Collaborator seams for catalog access and local storage.
//!
//! The pipeline core never touches HTTP or HTML directly. It talks to four
//! narrow traits: `PageFetcher` for paginated search results, `DetailFetcher`
//! for per-item asset resolution, `Transport` for the actual byte transfer,
//! and `DirectoryProvisioner` for destination directory setup. `HttpCatalog`
//! implements the first three against a WordPress-style catalog site;
//! `FsProvisioner` implements the last with `tokio::fs`.

mod error;
mod fs;
mod http;
mod traits;
mod types;

pub use error::{FetchError, ProvisionError};
pub use fs::FsProvisioner;
pub use http::HttpCatalog;
pub use traits::{DetailFetcher, DirectoryProvisioner, PageFetcher, Transport};
pub use types::{AssetInfo, PageItem, ResultsPage};
