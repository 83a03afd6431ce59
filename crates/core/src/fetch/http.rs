//! HTTP implementation of the catalog collaborators.
//!
//! Talks to a WordPress-style ebook catalog: search results live at
//! `{base}/?s={keyword}` (page 1) and `{base}/page/{n}/?s={keyword}`, each
//! item has a detail page carrying the download link and the authoritative
//! title.

use futures::StreamExt;
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::config::CatalogConfig;

use super::error::FetchError;
use super::traits::{DetailFetcher, PageFetcher, Transport};
use super::types::{AssetInfo, PageItem, ResultsPage};

/// Marker heading the catalog renders for a zero-result search.
const NO_RESULTS_MARKER: &str = "No Posts Found.";

/// HTTP client for the catalog site.
///
/// Implements `PageFetcher`, `DetailFetcher`, and `Transport`.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a new catalog client from the catalog configuration.
    pub fn new(config: &CatalogConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the search URL for a keyword and 1-based page number.
    fn search_url(&self, keyword: &str, page: u32) -> String {
        let encoded = urlencoding::encode(keyword);
        if page <= 1 {
            format!("{}/?s={}", self.base_url, encoded)
        } else {
            format!("{}/page/{}/?s={}", self.base_url, page, encoded)
        }
    }

    /// Fetch a URL and return the response body as text.
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(map_request_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        response.text().await.map_err(map_request_error)
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpCatalog {
    async fn fetch_results_page(
        &self,
        keyword: &str,
        page: u32,
    ) -> Result<ResultsPage, FetchError> {
        let url = self.search_url(keyword, page);
        debug!(page = page, url = %url, "Fetching results page");

        let body = self.get_text(&url).await?;
        let parsed = parse_results_page(&body)?;

        debug!(
            page = page,
            items = parsed.items.len(),
            total_pages = parsed.total_pages,
            "Results page parsed"
        );
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl DetailFetcher for HttpCatalog {
    async fn fetch_asset_info(&self, detail_link: &str) -> Result<AssetInfo, FetchError> {
        debug!(url = %detail_link, "Fetching detail page");
        let body = self.get_text(detail_link).await?;
        parse_asset_info(&body)
    }
}

#[async_trait::async_trait]
impl Transport for HttpCatalog {
    async fn download(&self, asset_url: &str, destination: &Path) -> Result<(), FetchError> {
        debug!(url = %asset_url, path = %destination.display(), "Starting transfer");

        let response = self
            .client
            .get(asset_url)
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status().as_u16(),
                body: String::new(),
            });
        }

        let mut file = File::create(destination)
            .await
            .map_err(|e| FetchError::Write {
                path: destination.to_path_buf(),
                source: e,
            })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_request_error)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| FetchError::Write {
                    path: destination.to_path_buf(),
                    source: e,
                })?;
        }

        file.flush().await.map_err(|e| FetchError::Write {
            path: destination.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}

/// Map a reqwest error onto the fetch taxonomy.
fn map_request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::ConnectionFailed(e.to_string())
    }
}

/// Extract the items, page count, and empty-search flag from a results page.
///
/// Kept synchronous so the parsed document never crosses an await point and
/// the markup handling stays unit-testable against fixture HTML.
fn parse_results_page(body: &str) -> Result<ResultsPage, FetchError> {
    let document = Html::parse_document(body);

    let heading = Selector::parse("h1").expect("valid selector");
    let is_empty_search = document
        .select(&heading)
        .any(|h| element_text(&h) == NO_RESULTS_MARKER);

    if is_empty_search {
        return Ok(ResultsPage {
            items: Vec::new(),
            total_pages: 1,
            is_empty_search: true,
        });
    }

    // The pagination control renders "1 of N"; a single-page result set has
    // no control at all.
    let pages = Selector::parse("span.pages").expect("valid selector");
    let total_pages = match document.select(&pages).next() {
        Some(span) => {
            let text = element_text(&span);
            text.split_whitespace()
                .last()
                .and_then(|n| n.parse::<u32>().ok())
                .ok_or_else(|| {
                    FetchError::Parse(format!("unreadable pagination control: {:?}", text))
                })?
        }
        None => 1,
    };

    let article = Selector::parse("article").expect("valid selector");
    let entry_link = Selector::parse("h2.entry-title a").expect("valid selector");

    let mut items = Vec::new();
    for row in document.select(&article) {
        let link = row.select(&entry_link).next().ok_or_else(|| {
            FetchError::Parse("result row without an entry title link".to_string())
        })?;
        let detail_link = link
            .value()
            .attr("href")
            .ok_or_else(|| FetchError::Parse("entry title link without href".to_string()))?
            .to_string();
        items.push(PageItem {
            title: element_text(&link),
            detail_link,
        });
    }

    Ok(ResultsPage {
        items,
        total_pages,
        is_empty_search: false,
    })
}

/// Extract the asset URL and authoritative title from a detail page.
fn parse_asset_info(body: &str) -> Result<AssetInfo, FetchError> {
    let document = Html::parse_document(body);

    let download_link = Selector::parse("span.download-links a").expect("valid selector");
    let asset_href = document
        .select(&download_link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or(FetchError::NotFound)?;

    let title_heading = Selector::parse("h1.single-title").expect("valid selector");
    let title = document
        .select(&title_heading)
        .next()
        .map(|h| element_text(&h))
        .ok_or_else(|| FetchError::Parse("detail page without title heading".to_string()))?;

    Ok(AssetInfo {
        asset_url: encode_last_segment(asset_href),
        title,
    })
}

/// Percent-encode the final path segment of an asset URL.
///
/// Asset filenames on the catalog routinely contain spaces and punctuation
/// that the server serves only when escaped.
fn encode_last_segment(url: &str) -> String {
    match url.rsplit_once('/') {
        Some((head, tail)) if !tail.is_empty() => {
            format!("{}/{}", head, urlencoding::encode(tail))
        }
        _ => url.to_string(),
    }
}

fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
