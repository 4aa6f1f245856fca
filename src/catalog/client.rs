//! Google Books API client
//!
//! This module provides functionality to query the Google Books volumes
//! endpoint and decode its responses into raw catalog records, which the
//! normalizer then maps into our Book data structures.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::keys::ApiKeyRing;

/// Base URL for the Google Books volumes endpoint
const GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Largest page the API will serve in a single request
const MAX_PAGE_SIZE: u32 = 40;

/// Sort order accepted by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Relevance,
    Newest,
}

impl SortOrder {
    /// Value for the `orderBy` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Newest => "newest",
        }
    }

    /// Parses a user-supplied sort string, leniently
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relevance" | "rel" | "best" => Some(SortOrder::Relevance),
            "newest" | "new" | "recent" => Some(SortOrder::Newest),
            _ => None,
        }
    }
}

/// Errors that can occur when talking to the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog answered with a non-success status
    #[error("catalog returned HTTP status {0}")]
    Status(StatusCode),

    /// Catalog answered with an empty or null body
    #[error("catalog returned an empty payload")]
    EmptyPayload,

    /// Failed to parse the catalog response
    #[error("failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Volume exists but no usable cover image could be derived
    #[error("no usable cover image for volume {0}")]
    MissingCover(String),
}

/// Top-level response from the volumes endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    /// Total matches across all pages, as reported by the catalog
    #[serde(default)]
    pub total_items: u32,
    /// Records on this page; absent entirely when there are no matches
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// One raw catalog record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    pub volume_info: VolumeInfo,
    #[serde(default)]
    pub sale_info: Option<SaleInfo>,
    #[serde(default)]
    pub access_info: Option<AccessInfo>,
}

/// Bibliographic portion of a volume
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub page_count: Option<u32>,
    pub language: Option<String>,
    pub image_links: Option<ImageLinks>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    pub preview_link: Option<String>,
}

/// Cover image variants, roughly ordered by resolution
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
}

/// An ISBN or other identifier attached to a volume
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub identifier: Option<String>,
}

/// Sale metadata for a volume
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInfo {
    pub saleability: Option<String>,
    pub is_ebook: Option<bool>,
    pub buy_link: Option<String>,
}

/// Access metadata for a volume
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    pub epub: Option<FormatAccess>,
    pub pdf: Option<FormatAccess>,
    pub web_reader_link: Option<String>,
}

/// Availability of one download format
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatAccess {
    #[serde(default)]
    pub is_available: bool,
    pub download_link: Option<String>,
}

/// Client for querying the Google Books catalog
#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    keys: ApiKeyRing,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    /// Creates a client against the live endpoint, keys taken from the environment
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            base_url: GOOGLE_BOOKS_BASE_URL.to_string(),
            keys: ApiKeyRing::from_env(),
        }
    }

    /// Creates a client with an explicit key ring
    pub fn with_keys(keys: ApiKeyRing) -> Self {
        Self {
            http: Client::new(),
            base_url: GOOGLE_BOOKS_BASE_URL.to_string(),
            keys,
        }
    }

    /// Creates a client against a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            keys: ApiKeyRing::new(vec![]),
        }
    }

    /// Runs a volume search against the catalog
    ///
    /// # Arguments
    /// * `query` - Free-text query, optionally carrying `subject:` filters
    /// * `order` - Sort order for the result page
    /// * `offset` - Pagination offset (`startIndex`)
    /// * `limit` - Requested page size, capped at the API maximum of 40
    ///
    /// # Returns
    /// * `Ok(VolumesResponse)` - The decoded result page
    /// * `Err(CatalogError)` - If the request, status, or body is bad
    pub async fn search_volumes(
        &self,
        query: &str,
        order: SortOrder,
        offset: u32,
        limit: u32,
    ) -> Result<VolumesResponse, CatalogError> {
        let mut request = self.http.get(&self.base_url).query(&[
            ("q", query.to_string()),
            ("startIndex", offset.to_string()),
            ("maxResults", limit.min(MAX_PAGE_SIZE).to_string()),
            ("orderBy", order.as_param().to_string()),
            ("printType", "books".to_string()),
        ]);
        if let Some(key) = self.keys.next_key() {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_body(status, &body)
    }

    /// Fetches a single volume by its catalog id
    pub async fn fetch_volume(&self, id: &str) -> Result<Volume, CatalogError> {
        let mut request = self.http.get(format!("{}/{}", self.base_url, id));
        if let Some(key) = self.keys.next_key() {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_body(status, &body)
    }
}

/// Validates an HTTP response body and decodes it
///
/// Fails on non-success status and on empty or null payloads; both show up in
/// practice when a key runs out of quota mid-rotation.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, CatalogError> {
    if !status.is_success() {
        return Err(CatalogError::Status(status));
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(CatalogError::EmptyPayload);
    }
    Ok(serde_json::from_str(trimmed)?)
}
