//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog access settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Download destination and pacing settings.
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Settings for the remote catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog site.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
    /// Optional cap on the number of result pages scanned per search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_pages: None,
        }
    }
}

/// Settings for download execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory where downloaded files are placed.
    #[serde(default = "default_download_dir")]
    pub dir: PathBuf,
    /// Pacing between successful downloads.
    #[serde(default)]
    pub pacing: PacingConfig,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: default_download_dir(),
            pacing: PacingConfig::default(),
        }
    }
}

/// Randomized delay inserted between successful downloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Minimum delay in seconds.
    #[serde(default = "default_min_delay")]
    pub min_delay_secs: f64,
    /// Maximum delay in seconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_secs: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay_secs: default_min_delay(),
            max_delay_secs: default_max_delay(),
        }
    }
}

impl PacingConfig {
    /// A zero-delay configuration, mainly useful in tests.
    pub fn none() -> Self {
        Self {
            min_delay_secs: 0.0,
            max_delay_secs: 0.0,
        }
    }
}

fn default_base_url() -> String {
    "http://www.allitebooks.com".to_string()
}

fn default_timeout_secs() -> u32 {
    30
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./books")
}

fn default_min_delay() -> f64 {
    1.0
}

fn default_max_delay() -> f64 {
    3.0
}
