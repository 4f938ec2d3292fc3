//! Aggregation Pipeline - Multi-page Fetch, Normalize, De-duplicate
//!
//! Drives the passport API across pages for one search, normalizes every
//! record, and de-duplicates by passport id. Sorting and filtering are
//! not done here; `domain::filter` owns both.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::domain::builder::{normalize, Builder};
use crate::domain::error::SearchError;
use crate::domain::filter;
use crate::domain::search::SearchParams;
use crate::ports::passport_api::{PassportApi, PAGE_SIZE};

/// Hard cap on pages fetched per search. Bounds upstream rate-limit
/// exposure; the upstream ranks by relevance, so later pages matter less.
pub const MAX_PAGES: u32 = 5;

/// Aggregates paginated upstream results into a canonical roster.
pub struct AggregationPipeline<P: PassportApi> {
  api: Arc<P>,
}

impl<P: PassportApi> AggregationPipeline<P> {
  /// Create a new pipeline over a passport API port.
  pub fn new(api: Arc<P>) -> Self {
    Self { api }
  }

  /// Collect the de-duplicated, normalized roster for a search.
  ///
  /// Fetches pages 1..=[`MAX_PAGES`] sequentially, stopping early on an
  /// empty or short page. De-duplication is first-seen-wins on passport
  /// id, preserving first-appearance order.
  ///
  /// A first-page failure fails the whole operation. A later-page
  /// failure stops pagination and returns everything aggregated so far:
  /// earlier pages carry the upstream's highest-relevance records, so a
  /// partial roster beats no roster.
  #[instrument(skip(self, params))]
  pub async fn collect(&self, params: &SearchParams) -> Result<Vec<Builder>, SearchError> {
    let keyword = params.upstream_keyword();

    let mut seen: HashSet<u64> = HashSet::new();
    let mut roster: Vec<Builder> = Vec::new();

    for page in 1..=MAX_PAGES {
      let records = match self.api.fetch_page(keyword.as_deref(), page).await {
        Ok(records) => records,
        Err(e) if page == 1 => return Err(e),
        Err(e) => {
          warn!(page, error = %e, "Later page fetch failed, returning partial roster");
          break;
        }
      };

      let fetched = records.len();
      for raw in records {
        let builder = normalize(raw);
        if seen.insert(builder.passport_id) {
          roster.push(builder);
        }
      }

      debug!(page, fetched, total = roster.len(), "Page aggregated");

      if fetched < PAGE_SIZE {
        break;
      }
    }

    Ok(roster)
  }

  /// Run a full search: aggregate, then filter and rank client-side.
  #[instrument(skip(self, params))]
  pub async fn search(&self, params: &SearchParams) -> Result<Vec<Builder>, SearchError> {
    let roster = self.collect(params).await?;
    Ok(filter::apply(roster, params))
  }

  /// Load a single profile by id, normalized. `None` when unknown.
  #[instrument(skip(self))]
  pub async fn profile(&self, id: &str) -> Result<Option<Builder>, SearchError> {
    let raw = self.api.fetch_passport(id).await?;
    Ok(raw.map(normalize))
  }
}
