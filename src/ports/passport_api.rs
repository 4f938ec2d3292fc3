//! Passport API Port - Upstream Talent Search Interface
//!
//! Defines the trait for the external reputation API that serves
//! paginated passport records. Adapters implement it over HTTP;
//! tests implement it with mocks.

use async_trait::async_trait;

use crate::domain::builder::RawPassport;
use crate::domain::error::SearchError;

/// Maximum number of records the upstream serves per page. A shorter
/// page signals the final page.
pub const PAGE_SIZE: usize = 25;

/// Trait for the upstream passport search API.
///
/// Pages are 1-based. Implementations perform one network round trip per
/// call and no retries: a non-2xx response surfaces as
/// [`SearchError::Upstream`] for the caller to handle.
#[async_trait]
pub trait PassportApi: Send + Sync + 'static {
  /// Fetch one page of passport records for an optional keyword.
  ///
  /// Returns at most [`PAGE_SIZE`] records; fewer only on the last page.
  async fn fetch_page(
    &self,
    keyword: Option<&str>,
    page: u32,
  ) -> Result<Vec<RawPassport>, SearchError>;

  /// Fetch a single passport by id.
  ///
  /// Returns `None` on 404; other non-2xx statuses are errors.
  async fn fetch_passport(&self, id: &str) -> Result<Option<RawPassport>, SearchError>;
}
