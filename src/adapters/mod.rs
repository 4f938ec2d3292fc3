//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! technology choices:
//! - `api`: Talent Protocol passport API over reqwest
//! - `chain`: Celo contracts over alloy-rs
//! - `metrics`: Prometheus export + axum health endpoints

pub mod api;
pub mod chain;
pub mod metrics;
