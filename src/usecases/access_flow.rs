//! Access Flow - Wallet Connection and Payment State Machine
//!
//! Orchestrates the WalletGateway through the gate lifecycle:
//! Disconnected → Connecting → CheckingAccess → AccessGranted, or
//! AccessDenied → Paying → AccessGranted / PaymentFailed.
//!
//! Recovery policy:
//! - A failed connect returns to Disconnected with the error surfaced;
//!   the user may retry.
//! - A failed on-chain access read downgrades to AccessDenied instead of
//!   erroring: showing the payment prompt beats blocking the user on an
//!   unreadable contract.
//! - Any failed payment step lands in PaymentFailed with the reason
//!   stored verbatim; retry re-enters Paying. The ERC-20 approve is
//!   idempotent, so a retry safely repeats the whole two-phase sequence,
//!   and the pay call is only ever issued after the approve confirmation
//!   was observed.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::access::{format_units, AccessState};
use crate::domain::error::GateError;
use crate::ports::wallet_gateway::WalletGateway;

/// Drives the access-gate state machine over a wallet gateway port.
///
/// Owns the [`AccessState`] exclusively; callers observe it via
/// [`state`](Self::state) and mutate it only through the transition
/// methods. One transition in flight at a time: the type is `&mut self`
/// throughout, and there is no persistence: a new session starts over at
/// `Disconnected` and reads the truth from the chain.
pub struct AccessFlow<W: WalletGateway> {
  wallet: Arc<W>,
  state: AccessState,
  address: Option<String>,
  chain_id: u64,
  payment_amount_raw: u128,
}

impl<W: WalletGateway> AccessFlow<W> {
  /// Create a new flow in the `Disconnected` state.
  pub fn new(wallet: Arc<W>, chain_id: u64, payment_amount_raw: u128) -> Self {
    Self {
      wallet,
      state: AccessState::Disconnected,
      address: None,
      chain_id,
      payment_amount_raw,
    }
  }

  /// Current state of the machine.
  pub fn state(&self) -> &AccessState {
    &self.state
  }

  /// Connected wallet address, once known.
  pub fn address(&self) -> Option<&str> {
    self.address.as_deref()
  }

  /// Connect the wallet and check on-chain access.
  ///
  /// On success the machine lands in `AccessGranted` or `AccessDenied`.
  /// On connection failure it returns to `Disconnected` and the error is
  /// returned for display; the user may retry.
  #[instrument(skip(self))]
  pub async fn connect(&mut self) -> Result<AccessState, GateError> {
    self.state = AccessState::Connecting;

    let address = match self.connect_wallet().await {
      Ok(addr) => addr,
      Err(e) => {
        warn!(error = %e, "Wallet connection failed");
        self.state = AccessState::Disconnected;
        return Err(e);
      }
    };

    info!(address = %address, "Wallet connected");
    self.address = Some(address.clone());

    self.state = AccessState::CheckingAccess;

    // A read failure is deliberately conflated with "no access": the
    // user gets the payment prompt either way.
    let granted = match self.wallet.read_access_flag(&address).await {
      Ok(flag) => flag,
      Err(e) => {
        warn!(error = %e, "Access check failed, treating as no access");
        false
      }
    };

    self.state = if granted {
      AccessState::AccessGranted
    } else {
      AccessState::AccessDenied { needs_payment: true }
    };

    Ok(self.state.clone())
  }

  /// Run the approve-then-pay sequence.
  ///
  /// Legal from `AccessDenied` and `PaymentFailed`; from any other state
  /// this is a no-op returning the current state. Ends in
  /// `AccessGranted` on success or `PaymentFailed(reason)` on any step
  /// failing.
  #[instrument(skip(self))]
  pub async fn pay(&mut self) -> AccessState {
    if !self.state.can_start_payment() {
      warn!(state = %self.state, "Payment attempted from illegal state, ignoring");
      return self.state.clone();
    }

    let Some(address) = self.address.clone() else {
      self.state = AccessState::PaymentFailed {
        reason: GateError::WalletUnavailable.to_string(),
      };
      return self.state.clone();
    };

    self.state = AccessState::Paying;

    self.state = match self.run_payment(&address).await {
      Ok(()) => {
        info!("Payment confirmed, access recorded");
        AccessState::AccessGranted
      }
      Err(GateError::AlreadyGranted) => {
        // The contract already knows this address; treat as success.
        info!("Access already recorded on-chain");
        AccessState::AccessGranted
      }
      Err(e) => {
        warn!(error = %e, "Payment failed");
        AccessState::PaymentFailed {
          reason: e.to_string(),
        }
      }
    };

    self.state.clone()
  }

  async fn connect_wallet(&self) -> Result<String, GateError> {
    let address = self.wallet.request_accounts().await?;
    self.wallet.switch_or_add_chain(self.chain_id).await?;
    Ok(address)
  }

  /// Two-phase payment: phase 1 (approve) is idempotent and retryable;
  /// phase 2 (pay) runs only after phase 1's confirmation is observed.
  async fn run_payment(&self, address: &str) -> Result<(), GateError> {
    let balance = self.wallet.read_token_balance(address).await?;
    if balance < self.payment_amount_raw {
      return Err(GateError::InsufficientFunds {
        balance: format_units(balance),
        required: format_units(self.payment_amount_raw),
      });
    }

    let approve_tx = self.wallet.approve_spender(self.payment_amount_raw).await?;
    self.wallet.await_confirmation(&approve_tx).await?;
    info!(tx = %approve_tx, "Approval confirmed");

    let pay_tx = self.wallet.invoke_payment().await?;
    self.wallet.await_confirmation(&pay_tx).await?;
    info!(tx = %pay_tx, "Payment confirmed");

    Ok(())
  }
}
