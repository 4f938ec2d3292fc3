//! Passport Endpoint Adapter - PassportApi over HTTP
//!
//! Implements the `PassportApi` port against the Talent Protocol
//! passports endpoints, translating envelopes and HTTP statuses into
//! domain terms.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, instrument};

use crate::adapters::metrics::GateMetrics;
use crate::domain::builder::RawPassport;
use crate::domain::error::SearchError;
use crate::ports::passport_api::PassportApi;

use super::client::TalentClient;
use super::types::{PassportEnvelope, PassportsEnvelope};

/// Passport API adapter wrapping the HTTP client.
pub struct TalentPassports {
  client: Arc<TalentClient>,
  metrics: Option<Arc<GateMetrics>>,
}

impl TalentPassports {
  /// Create a new passports adapter.
  pub fn new(client: Arc<TalentClient>) -> Self {
    Self {
      client,
      metrics: None,
    }
  }

  /// Attach a metrics registry for the page-fetch counter.
  pub fn with_metrics(mut self, metrics: Arc<GateMetrics>) -> Self {
    self.metrics = Some(metrics);
    self
  }
}

#[async_trait]
impl PassportApi for TalentPassports {
  #[instrument(skip(self))]
  async fn fetch_page(
    &self,
    keyword: Option<&str>,
    page: u32,
  ) -> Result<Vec<RawPassport>, SearchError> {
    let path = match keyword {
      Some(kw) => format!("/passports?keyword={}&page={page}", urlencoding::encode(kw)),
      None => format!("/passports?page={page}"),
    };

    let response = self.client.get(&path).await?;
    if !response.status().is_success() {
      return Err(TalentClient::upstream_error(response).await);
    }

    let envelope: PassportsEnvelope = response
      .json()
      .await
      .map_err(|e| SearchError::Transport(e.to_string()))?;

    if let Some(m) = &self.metrics {
      m.pages_fetched.inc();
    }

    debug!(page, records = envelope.passports.len(), "Passport page fetched");
    Ok(envelope.passports)
  }

  #[instrument(skip(self))]
  async fn fetch_passport(&self, id: &str) -> Result<Option<RawPassport>, SearchError> {
    let path = format!("/passports/{}", urlencoding::encode(id));

    let response = self.client.get(&path).await?;
    if response.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if !response.status().is_success() {
      return Err(TalentClient::upstream_error(response).await);
    }

    let envelope: PassportEnvelope = response
      .json()
      .await
      .map_err(|e| SearchError::Transport(e.to_string()))?;

    Ok(envelope.passport)
  }
}
