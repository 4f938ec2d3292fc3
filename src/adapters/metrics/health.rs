//! Health Check Server - Liveness, Readiness, and Metrics Endpoints
//!
//! Exposes /live, /ready, and /metrics via axum 0.7 for Docker health
//! checks and monitoring. Readiness depends on upstream API and chain
//! provider health.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tracing::info;

use super::prometheus::GateMetrics;

/// Shared health state polled by readiness probes.
#[derive(Debug, Clone)]
pub struct HealthState {
    /// Whether the upstream passport API is reachable.
    pub upstream_healthy: Arc<AtomicBool>,
    /// Whether the chain provider is reachable.
    pub chain_healthy: Arc<AtomicBool>,
}

impl HealthState {
    /// Create a new health state (all healthy by default).
    pub fn new() -> Self {
        Self {
            upstream_healthy: Arc::new(AtomicBool::new(true)),
            chain_healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Check if the system is ready to serve traffic.
    pub fn is_ready(&self) -> bool {
        self.upstream_healthy.load(Ordering::Relaxed)
            && self.chain_healthy.load(Ordering::Relaxed)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
struct ServerState {
    health: Arc<HealthState>,
    metrics: Arc<GateMetrics>,
}

/// Axum-based health and metrics HTTP server.
pub struct HealthServer {
    state: ServerState,
    port: u16,
}

impl HealthServer {
    /// Create a new health server.
    pub fn new(health: Arc<HealthState>, metrics: Arc<GateMetrics>, port: u16) -> Self {
        Self {
            state: ServerState { health, metrics },
            port,
        }
    }

    /// Serve until the process exits.
    pub async fn run(self) -> anyhow::Result<()> {
        let app = Router::new()
            .route("/live", get(live))
            .route("/ready", get(ready))
            .route("/metrics", get(metrics))
            .with_state(self.state);

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(%addr, "Health server listening");

        axum::serve(listener, app).await?;
        Ok(())
    }
}

async fn live() -> impl IntoResponse {
    StatusCode::OK
}

async fn ready(State(state): State<ServerState>) -> impl IntoResponse {
    if state.health.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(State(state): State<ServerState>) -> impl IntoResponse {
    state.metrics.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_requires_both_probes() {
        let health = HealthState::new();
        assert!(health.is_ready());

        health.chain_healthy.store(false, Ordering::Relaxed);
        assert!(!health.is_ready());

        health.chain_healthy.store(true, Ordering::Relaxed);
        health.upstream_healthy.store(false, Ordering::Relaxed);
        assert!(!health.is_ready());
    }
}
