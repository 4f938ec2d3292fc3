//! Talent Gate - Entry Point
//!
//! Initializes configuration, logging, the upstream API client, and the
//! Celo chain connection, then runs one gated session: connect the
//! wallet, verify (or pay for) access, and execute a builder search.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (env-filter, JSON structured logging)
//! 3. Create metrics registry, spawn health server (/live /ready /metrics)
//! 4. Create Talent API client + aggregation pipeline
//! 5. Connect Celo provider (signer from env when present), bind contracts
//! 6. Run the access flow: connect → check → pay if denied
//! 7. Run the configured search and print the ranked roster as JSON

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use tracing::{info, warn};

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::api::{TalentClient, TalentClientConfig, TalentPassports};
use adapters::chain::{CeloProvider, CeloWalletGateway, ContractAddresses};
use adapters::metrics::{GateMetrics, HealthServer, HealthState};
use domain::access::units_to_raw;
use domain::AccessState;
use usecases::{AccessFlow, AggregationPipeline, Session};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured logging ────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.app.log_level)
                }),
        )
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        chain_id = config.chain.chain_id,
        "Starting talent gate"
    );

    // ── 3. Metrics registry + health server ─────────────────
    let metrics = Arc::new(GateMetrics::new().context("Failed to register metrics")?);
    let health = Arc::new(HealthState::new());
    if config.metrics.enabled {
        let server = HealthServer::new(
            Arc::clone(&health),
            Arc::clone(&metrics),
            config.metrics.port,
        );
        tokio::spawn(async move {
            if let Err(e) = server.run().await {
                warn!(error = %e, "Health server exited");
            }
        });
    }

    // ── 4. Talent API client + aggregation pipeline ─────────
    let api_key = std::env::var(&config.api.api_key_env)
        .with_context(|| format!("{} not set", config.api.api_key_env))?;
    let client = Arc::new(
        TalentClient::new(TalentClientConfig {
            base_url: config.api.base_url.clone(),
            api_key,
            timeout: std::time::Duration::from_millis(config.api.timeout_ms),
        })
        .context("Failed to create Talent API client")?,
    );
    let passports = Arc::new(
        TalentPassports::new(Arc::clone(&client)).with_metrics(Arc::clone(&metrics)),
    );
    let pipeline = AggregationPipeline::new(passports);

    // ── 5. Celo provider + contract bindings ────────────────
    let signer = match std::env::var(&config.chain.signer_key_env) {
        Ok(key) => Some(key.parse().context("Invalid signer private key")?),
        Err(_) => None,
    };
    let provider = Arc::new(
        CeloProvider::connect(&config.chain.rpc_url, signer)
            .await
            .context("Failed to connect to Celo RPC")?,
    );
    let addresses = ContractAddresses {
        token: config
            .chain
            .token_address
            .parse()
            .context("Invalid token address")?,
        access_gate: config
            .chain
            .access_gate_address
            .parse()
            .context("Invalid access gate address")?,
    };
    let gateway = Arc::new(
        CeloWalletGateway::new(Arc::clone(&provider), addresses)
            .await
            .context("Failed to bind contracts")?,
    );

    health
        .upstream_healthy
        .store(client.health_check().await, Ordering::Relaxed);
    health
        .chain_healthy
        .store(provider.is_healthy().await, Ordering::Relaxed);

    // ── 6. Access flow: connect, check, pay if denied ───────
    let session = Session::new();
    let mut flow = AccessFlow::new(
        gateway,
        config.chain.chain_id,
        units_to_raw(config.chain.payment_amount_units),
    );

    let mut state = flow.connect().await.context("Wallet connection failed")?;
    if let Some(address) = flow.address() {
        session.set_address(address.to_string()).await;
        metrics.wallet_connected.set(1);
    }

    if let AccessState::AccessDenied { .. } = state {
        info!(
            fee = config.chain.payment_amount_units,
            "No access recorded, paying the access fee"
        );
        metrics.payment_attempts.inc();
        state = flow.pay().await;
    }

    match state {
        AccessState::AccessGranted => {
            session.unlock();
            metrics.access_granted.set(1);
            info!(session = %session.id(), "Access granted, session unlocked");
        }
        AccessState::PaymentFailed { reason } => {
            anyhow::bail!("Payment failed: {reason}");
        }
        other => anyhow::bail!("Unexpected access state: {other}"),
    }

    // ── 7. Run the configured search ────────────────────────
    let results = pipeline
        .search(&config.search)
        .await
        .context("Builder search failed")?;

    metrics.searches_total.inc();
    info!(results = results.len(), "Search complete");
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
