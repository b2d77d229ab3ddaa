//! Places REST API Client
//!
//! HTTP client for the ranking service. Owns the click history that is sent
//! along with every catalog request.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::place::{ClickHistory, Place};

/// Default address of the ranking service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Operations the catalog and detail views need from a places backend
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Places ranked against the click history as it stands right now
    async fn list(&self) -> Result<Vec<Place>, ClientError>;

    /// Places matching the given id (expected to hold exactly one entry)
    async fn get_by_id(&self, id: &str) -> Result<Vec<Place>, ClientError>;

    /// Remember that a place was opened. Local only.
    async fn record_click(&self, id: i64);
}

/// Configuration for the places client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the ranking service (e.g., "http://127.0.0.1:5000")
    pub base_url: String,
    /// Request timeout in milliseconds, none by default
    pub request_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Places REST API client.
///
/// Clones share the same click history.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    base_url: Arc<str>,
    history: Arc<RwLock<ClickHistory>>,
}

impl PlacesClient {
    /// Create a new client with an empty click history
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            history: Arc::new(RwLock::new(ClickHistory::new())),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the click history
    pub async fn history(&self) -> ClickHistory {
        self.history.read().await.clone()
    }

    /// Places in the service's default order, ignoring the click history
    pub async fn default_ranking(&self) -> Result<Vec<Place>, ClientError> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        read_places(response).await
    }

    async fn fetch_ranked(&self) -> Result<Vec<Place>, ClientError> {
        let url = format!("{}/history", self.base_url);
        let body = HistoryRequest {
            history: self.history().await,
        };

        tracing::debug!(clicks = body.history.len(), "Requesting ranked places");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        read_places(response).await
    }

    async fn fetch_place(&self, id: &str) -> Result<Vec<Place>, ClientError> {
        let url = format!("{}/place?id={}", self.base_url, urlencoding::encode(id));

        tracing::debug!(id = %id, "Requesting place");

        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        read_places(response).await
    }
}

#[async_trait]
impl PlacesApi for PlacesClient {
    async fn list(&self) -> Result<Vec<Place>, ClientError> {
        self.fetch_ranked().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Vec<Place>, ClientError> {
        self.fetch_place(id).await
    }

    async fn record_click(&self, id: i64) {
        self.history.write().await.push(id);
    }
}

#[derive(Debug, Serialize)]
struct HistoryRequest {
    history: ClickHistory,
}

fn map_send_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

async fn read_places(response: reqwest::Response) -> Result<Vec<Place>, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ClientError::ApiError {
            status: status.as_u16(),
            message: text,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Decode)
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the ranking service
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Places service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(serde_json::Error),

    #[error("Request timeout")]
    Timeout,
}
