//! Access-gate state machine states and token amount helpers.
//!
//! The state lifecycle is owned entirely by the access flow use case; these
//! types only describe the states and which transitions are legal next.
//! Nothing here is persisted; access truth lives on-chain and every fresh
//! session starts at `Disconnected`.

use serde::{Deserialize, Serialize};

/// Decimals of the payment token (cUSD).
pub const TOKEN_DECIMALS: u32 = 18;

/// States of the wallet/payment access gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessState {
    /// No wallet connected yet.
    Disconnected,
    /// Wallet prompt in flight.
    Connecting,
    /// On-chain access flag read in flight.
    CheckingAccess,
    /// Access verified on-chain. Terminal for the session.
    AccessGranted,
    /// No recorded access; the payment prompt should be shown.
    AccessDenied {
        /// Whether the payment prompt applies (always true today; kept
        /// explicit so a free-tier gate can reuse the state).
        needs_payment: bool,
    },
    /// Approve/pay transaction sequence in flight.
    Paying,
    /// A payment step failed; the user may retry.
    PaymentFailed {
        /// User-displayable reason the payment stopped.
        reason: String,
    },
}

impl AccessState {
    /// Terminal success state: the application unlocks and the machine is
    /// not consulted again this session.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::AccessGranted)
    }

    /// States from which a payment attempt may be started.
    pub fn can_start_payment(&self) -> bool {
        matches!(self, Self::AccessDenied { .. } | Self::PaymentFailed { .. })
    }
}

impl std::fmt::Display for AccessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::CheckingAccess => write!(f, "checking_access"),
            Self::AccessGranted => write!(f, "access_granted"),
            Self::AccessDenied { .. } => write!(f, "access_denied"),
            Self::Paying => write!(f, "paying"),
            Self::PaymentFailed { reason } => write!(f, "payment_failed: {reason}"),
        }
    }
}

/// Convert whole token units to raw 18-decimal units.
pub fn units_to_raw(units: u64) -> u128 {
    u128::from(units) * 10u128.pow(TOKEN_DECIMALS)
}

/// Format a raw 18-decimal amount as a decimal string, trimming trailing
/// zeros ("1", "0.5", "12.25").
pub fn format_units(raw: u128) -> String {
    let base = 10u128.pow(TOKEN_DECIMALS);
    let whole = raw / base;
    let frac = raw % base;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{frac:018}");
    let trimmed = frac_str.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}
