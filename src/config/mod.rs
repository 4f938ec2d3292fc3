//! Configuration Module - TOML-based Application Configuration
//!
//! Loads and validates configuration from `config.toml`. All contract
//! addresses, endpoints, and amounts are externalized here - nothing is
//! hardcoded in the domain layer. Secrets (API key, signer key) are
//! referenced by environment variable name only and never stored in the
//! file itself.

pub mod loader;

use serde::Deserialize;

use crate::domain::search::SearchParams;

/// Top-level application configuration.
///
/// Loaded from `config.toml` at startup and validated before anything
/// connects.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Application identity and logging.
  pub app: AppSection,
  /// Upstream passport API settings.
  pub api: ApiConfig,
  /// Celo chain and contract settings.
  pub chain: ChainConfig,
  /// Metrics and health endpoints.
  pub metrics: MetricsConfig,
  /// Default search filters for a headless run.
  #[serde(default)]
  pub search: SearchParams,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable application name.
  pub name: String,
  /// Default tracing filter (overridable via RUST_LOG).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Upstream passport API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Base URL of the passport API.
  pub base_url: String,
  /// Name of the env var holding the API key.
  #[serde(default = "default_api_key_env")]
  pub api_key_env: String,
  /// Request timeout in milliseconds.
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
}

/// Chain and contract configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
  /// Celo RPC endpoint URL.
  pub rpc_url: String,
  /// Expected chain id (Celo mainnet: 42220).
  pub chain_id: u64,
  /// cUSD token contract address.
  pub token_address: String,
  /// TalentAccessGate contract address.
  pub access_gate_address: String,
  /// Access fee in whole token units (18 decimals applied internally).
  #[serde(default = "default_payment_units")]
  pub payment_amount_units: u64,
  /// Name of the env var holding the signer's private key.
  #[serde(default = "default_signer_key_env")]
  pub signer_key_env: String,
}

/// Metrics server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Whether to run the health/metrics server.
  #[serde(default)]
  pub enabled: bool,
  /// Bind port for /live, /ready, /metrics.
  #[serde(default = "default_metrics_port")]
  pub port: u16,
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_api_key_env() -> String {
  "TALENT_API_KEY".to_string()
}

fn default_timeout_ms() -> u64 {
  30_000
}

fn default_payment_units() -> u64 {
  1
}

fn default_signer_key_env() -> String {
  "WALLET_PRIVATE_KEY".to_string()
}

fn default_metrics_port() -> u16 {
  9090
}
