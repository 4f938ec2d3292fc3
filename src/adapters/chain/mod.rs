//! Chain Adapters - Celo Blockchain Interaction Layer
//!
//! Provides on-chain access via alloy-rs 0.9 for:
//! - `provider`: shared RPC connection with optional local signer
//! - `contracts`: cUSD token + TalentAccessGate bindings implementing
//!   the `WalletGateway` port

pub mod contracts;
pub mod provider;

pub use contracts::{CeloWalletGateway, ContractAddresses};
pub use provider::CeloProvider;
