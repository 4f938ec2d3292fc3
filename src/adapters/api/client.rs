//! Talent API HTTP Client
//!
//! Wraps reqwest with base URL handling, API-key authentication, and a
//! request timeout for all Talent Protocol REST calls. Deliberately no
//! retry layer: a non-2xx response surfaces to the caller as-is and is
//! never retried automatically.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use tracing::debug;

use crate::domain::error::SearchError;

/// Configuration for the Talent API client.
#[derive(Debug, Clone)]
pub struct TalentClientConfig {
  /// Base URL for the passport API.
  pub base_url: String,
  /// API key sent as the `X-API-KEY` header.
  pub api_key: String,
  /// Request timeout.
  pub timeout: Duration,
}

impl Default for TalentClientConfig {
  fn default() -> Self {
    Self {
      base_url: "https://api.talentprotocol.com/api/v2".to_string(),
      api_key: String::new(),
      timeout: Duration::from_secs(30),
    }
  }
}

/// HTTP client for the Talent Protocol passport API.
pub struct TalentClient {
  /// Underlying HTTP client.
  http: Client,
  /// Client configuration.
  config: TalentClientConfig,
}

impl TalentClient {
  /// Create a new API client.
  pub fn new(config: TalentClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(5)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http, config })
  }

  /// Execute a GET request against an API path (joined to the base URL).
  ///
  /// Only transport failures are mapped here; HTTP status handling is
  /// the caller's business (404 means "not found" on some endpoints).
  pub async fn get(&self, path_and_query: &str) -> Result<Response, SearchError> {
    let url = format!("{}{}", self.config.base_url, path_and_query);
    debug!(%url, "GET");

    self
      .http
      .get(&url)
      .header("X-API-KEY", &self.config.api_key)
      .send()
      .await
      .map_err(|e| SearchError::Transport(e.to_string()))
  }

  /// Consume a non-2xx response into a [`SearchError::Upstream`].
  pub async fn upstream_error(response: Response) -> SearchError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    SearchError::Upstream { status, body }
  }

  /// Check if the API is reachable.
  pub async fn health_check(&self) -> bool {
    matches!(self.get("/passports?page=1").await, Ok(r) if r.status().is_success())
  }
}
