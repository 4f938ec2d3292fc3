//! Prometheus Metrics Registry - Gate and Search Observability
//!
//! Registers the counters and gauges the pipeline and access flow
//! report, and renders them in the Prometheus text format for the
//! health server's `/metrics` endpoint.

use anyhow::Result;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

/// Centralized Prometheus metrics for the talent gate.
///
/// All metrics follow the naming convention `talent_gate_*`.
pub struct GateMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// Upstream passport pages fetched.
    pub pages_fetched: IntCounter,
    /// Searches completed (aggregate + filter).
    pub searches_total: IntCounter,
    /// Payment sequences started.
    pub payment_attempts: IntCounter,
    /// Wallet connection status (1 = connected).
    pub wallet_connected: IntGauge,
    /// On-chain access status for the session (1 = granted).
    pub access_granted: IntGauge,
}

impl GateMetrics {
    /// Create and register all metrics.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let pages_fetched = IntCounter::new(
            "talent_gate_pages_fetched_total",
            "Upstream passport pages fetched",
        )?;
        let searches_total = IntCounter::new(
            "talent_gate_searches_total",
            "Builder searches completed",
        )?;
        let payment_attempts = IntCounter::new(
            "talent_gate_payment_attempts_total",
            "Access payment sequences started",
        )?;
        let wallet_connected = IntGauge::new(
            "talent_gate_wallet_connected",
            "Wallet connection status (1 = connected)",
        )?;
        let access_granted = IntGauge::new(
            "talent_gate_access_granted",
            "On-chain access status for this session (1 = granted)",
        )?;

        registry.register(Box::new(pages_fetched.clone()))?;
        registry.register(Box::new(searches_total.clone()))?;
        registry.register(Box::new(payment_attempts.clone()))?;
        registry.register(Box::new(wallet_connected.clone()))?;
        registry.register(Box::new(access_granted.clone()))?;

        Ok(Self {
            registry,
            pages_fetched,
            searches_total,
            payment_attempts,
            wallet_connected,
            access_granted,
        })
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if encoder
            .encode(&self.registry.gather(), &mut buffer)
            .is_err()
        {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
