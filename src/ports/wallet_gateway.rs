//! Wallet Gateway Port - Wallet and Access-Gate Capability Surface
//!
//! Defines the trait for everything the access flow needs from a wallet
//! and the two contracts behind it: account access, chain selection,
//! token balance, the approve/pay transaction pair, and the on-chain
//! access flag. The access flow never sees transport details.

use async_trait::async_trait;

use crate::domain::error::GateError;

/// Opaque handle to a submitted transaction (the hash, hex-encoded).
pub type TxHandle = String;

/// Trait for wallet and access-gate contract operations.
///
/// Balance and payment amounts are raw 18-decimal token units; display
/// formatting is a domain concern (`domain::access::format_units`).
/// None of these calls enforce a timeout: a hung wallet prompt or chain
/// confirmation suspends the calling task until it resolves.
#[async_trait]
pub trait WalletGateway: Send + Sync + 'static {
  /// Request the user's accounts; returns the active address.
  ///
  /// Fails with [`GateError::WalletUnavailable`] when no wallet
  /// capability is present and [`GateError::UserRejected`] when the
  /// user declines the prompt.
  async fn request_accounts(&self) -> Result<String, GateError>;

  /// Ensure the wallet is on the given chain, switching or adding it
  /// if necessary. Fails with [`GateError::ChainMismatch`] when the
  /// chain cannot be reached.
  async fn switch_or_add_chain(&self, chain_id: u64) -> Result<(), GateError>;

  /// Read the payment token balance of an address, in raw units.
  async fn read_token_balance(&self, address: &str) -> Result<u128, GateError>;

  /// Approve the access-gate contract to spend `amount` raw token units.
  /// Returns the transaction handle; confirmation is separate.
  async fn approve_spender(&self, amount: u128) -> Result<TxHandle, GateError>;

  /// Wait until a submitted transaction is confirmed on-chain.
  async fn await_confirmation(&self, handle: &str) -> Result<(), GateError>;

  /// Invoke the access-gate payment entry point. Requires a confirmed
  /// allowance covering the payment amount.
  async fn invoke_payment(&self) -> Result<TxHandle, GateError>;

  /// Read whether an address has recorded access on the gate contract.
  async fn read_access_flag(&self, address: &str) -> Result<bool, GateError>;
}
