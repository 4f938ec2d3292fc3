//! Error taxonomy for the search pipeline and the access gate.
//!
//! User-facing messages match what the application surfaces verbatim, so
//! the `Display` strings here are part of the product contract, not just
//! diagnostics.

use thiserror::Error;

/// Failures of the upstream passport API.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Non-2xx response from the search or profile endpoint. Never retried
    /// automatically.
    #[error("upstream API error {status}: {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body, for the user-visible message.
        body: String,
    },

    /// Transport-level failure before any HTTP status was received.
    #[error("upstream request failed: {0}")]
    Transport(String),
}

/// Failures of the wallet / access-gate flow.
#[derive(Debug, Error)]
pub enum GateError {
    /// No wallet capability is available at all. Fatal for the current
    /// operation; the user must install or enable a wallet.
    #[error("No wallet found. Please install MetaMask or another Web3 wallet.")]
    WalletUnavailable,

    /// The user declined a wallet prompt. A re-attempt is permitted.
    #[error("Transaction was rejected by user")]
    UserRejected,

    /// Token balance below the required payment amount. Amounts are
    /// pre-formatted decimal strings of whole token units.
    #[error("Insufficient cUSD balance: {balance} available, {required} required")]
    InsufficientFunds {
        /// Current balance, formatted.
        balance: String,
        /// Required payment amount, formatted.
        required: String,
    },

    /// Wallet is on the wrong network and switching it failed.
    #[error("Wrong network: expected chain {expected}, connected to {actual}")]
    ChainMismatch {
        /// Chain id the gate contract lives on.
        expected: u64,
        /// Chain id the wallet/provider reported.
        actual: u64,
    },

    /// The gate contract reports access was already recorded. Success in
    /// disguise: callers should refresh rather than show an error.
    #[error("You already have access! Please refresh the page.")]
    AlreadyGranted,

    /// Any other chain or provider failure.
    #[error("chain call failed: {0}")]
    Chain(String),
}

impl GateError {
    /// Classify a raw provider/wallet error message into the taxonomy.
    ///
    /// Wallet providers and RPC nodes only expose stringly-typed errors,
    /// so the well-known cases are recognized by substring.
    pub fn from_provider_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("user rejected") || lower.contains("rejected by user") {
            Self::UserRejected
        } else if lower.contains("access already granted") {
            Self::AlreadyGranted
        } else {
            Self::Chain(message.to_string())
        }
    }
}
