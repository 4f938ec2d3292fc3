//! Domain layer - Core business logic and models.
//!
//! This module contains the pure domain logic for the talent gate.
//! No I/O happens here (hexagonal architecture inner ring); every type is
//! serializable and testable in isolation.

pub mod access;
pub mod builder;
pub mod error;
pub mod filter;
pub mod search;

// Re-export core types for convenience
pub use access::AccessState;
pub use builder::{normalize, Builder, RawPassport, RawProfile, ScoreBreakdown};
pub use error::{GateError, SearchError};
pub use search::SearchParams;
