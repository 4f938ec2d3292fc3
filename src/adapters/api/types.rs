//! Talent API Response Envelopes
//!
//! Wire-level wrapper shapes for the passport endpoints. The per-record
//! shape itself ([`RawPassport`]) lives in the domain layer because the
//! normalizer is defined over it.

use serde::Deserialize;

use crate::domain::builder::RawPassport;

/// Envelope of the search endpoint: `{ "passports": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassportsEnvelope {
  /// One page of raw passport records.
  #[serde(default)]
  pub passports: Vec<RawPassport>,
}

/// Envelope of the single-profile endpoint: `{ "passport": {...} }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassportEnvelope {
  /// The requested passport, when present.
  pub passport: Option<RawPassport>,
}
