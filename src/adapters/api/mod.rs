//! Talent Protocol API Adapter
//!
//! Implements the HTTP client and the `PassportApi` port for the
//! Talent Protocol passport endpoints:
//! - `client`: reqwest wrapper with API-key auth and timeouts
//! - `passports`: paginated search + single-profile lookups
//! - `types`: wire-level response envelopes

pub mod client;
pub mod passports;
pub mod types;

pub use client::{TalentClient, TalentClientConfig};
pub use passports::TalentPassports;
