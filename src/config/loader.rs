//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    name = %config.app.name,
    chain_id = config.chain.chain_id,
    fee_units = config.chain.payment_amount_units,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(!config.app.name.is_empty(), "app.name must not be empty");

  // API validation
  anyhow::ensure!(
    config.api.base_url.starts_with("http"),
    "api.base_url must be an http(s) URL, got {}",
    config.api.base_url
  );
  anyhow::ensure!(
    !config.api.api_key_env.is_empty(),
    "api.api_key_env must name an environment variable"
  );
  anyhow::ensure!(config.api.timeout_ms > 0, "api.timeout_ms must be positive");

  // Chain validation
  anyhow::ensure!(
    config.chain.rpc_url.starts_with("http"),
    "chain.rpc_url must be an http(s) URL, got {}",
    config.chain.rpc_url
  );
  anyhow::ensure!(config.chain.chain_id > 0, "chain.chain_id must be positive");
  for (field, addr) in [
    ("chain.token_address", &config.chain.token_address),
    ("chain.access_gate_address", &config.chain.access_gate_address),
  ] {
    anyhow::ensure!(
      addr.starts_with("0x") && addr.len() == 42,
      "{field} must be a 0x-prefixed 20-byte hex address, got {addr}"
    );
  }
  anyhow::ensure!(
    config.chain.payment_amount_units > 0,
    "chain.payment_amount_units must be positive"
  );

  // Metrics validation
  if config.metrics.enabled {
    anyhow::ensure!(config.metrics.port > 0, "metrics.port must be positive");
  }

  Ok(())
}
