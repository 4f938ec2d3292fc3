//! Access-Gate Contract Interactions - WalletGateway over alloy
//!
//! Implements the `WalletGateway` port against the cUSD token contract
//! and the TalentAccessGate contract on Celo. Contract addresses come
//! from `config.toml` and are validated on-chain at startup. Calldata is
//! built by hand (keccak256 selector + left-padded arguments); the ABI
//! surface is four functions:
//! - token:  `balanceOf(address)`, `approve(address,uint256)`
//! - gate:   `hasAccess(address)`, `payAccess()`

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{keccak256, Address, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use crate::domain::error::GateError;
use crate::ports::wallet_gateway::{TxHandle, WalletGateway};

use super::provider::CeloProvider;

/// Receipt polling interval while awaiting confirmation. There is no
/// upper bound: a hung confirmation suspends the calling task, which is
/// a documented limitation of the flow.
const CONFIRMATION_POLL: Duration = Duration::from_secs(2);

/// Token and gate contract addresses loaded from config.
#[derive(Debug, Clone)]
pub struct ContractAddresses {
    /// cUSD (payment token) contract.
    pub token: Address,
    /// TalentAccessGate contract.
    pub access_gate: Address,
}

/// Implements wallet and contract operations via alloy-rs 0.9.
///
/// Balance and access-flag reads work without a signer; the approve and
/// payment calls require one and fail with `WalletUnavailable` when the
/// provider carries no key material.
pub struct CeloWalletGateway {
    /// Shared Celo RPC provider.
    provider: Arc<CeloProvider>,
    /// Contract addresses from config.
    addresses: ContractAddresses,
}

impl CeloWalletGateway {
    /// Create and validate the contract bindings.
    ///
    /// Validates that each contract address has deployed code on-chain.
    /// This prevents misconfiguration from silently failing at runtime.
    #[instrument(skip_all)]
    pub async fn new(
        provider: Arc<CeloProvider>,
        addresses: ContractAddresses,
    ) -> Result<Self> {
        let inner = provider.inner();

        for (name, addr) in [
            ("cUSD token", addresses.token),
            ("TalentAccessGate", addresses.access_gate),
        ] {
            let code = inner
                .get_code_at(addr)
                .await
                .context(format!("Failed to query code for {name}"))?;

            if code.is_empty() {
                bail!(
                    "Contract {name} at {} has no deployed code, check config.toml",
                    addr
                );
            }

            info!(contract = name, address = %addr, "Validated on-chain");
        }

        Ok(Self { provider, addresses })
    }

    /// Build calldata from a function signature and pre-encoded words.
    fn calldata(signature: &[u8], words: &[[u8; 32]]) -> Bytes {
        let selector = &keccak256(signature)[..4];
        let mut data = Vec::with_capacity(4 + 32 * words.len());
        data.extend_from_slice(selector);
        for word in words {
            data.extend_from_slice(word);
        }
        Bytes::from(data)
    }

    /// Left-pad an address into a 32-byte ABI word.
    fn address_word(addr: Address) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(addr.as_slice());
        word
    }

    /// Read-only eth_call returning the raw result bytes.
    async fn call(&self, to: Address, input: Bytes) -> Result<Vec<u8>, GateError> {
        let tx = TransactionRequest::default().to(to).input(input.into());
        self.provider
            .inner()
            .call(&tx)
            .await
            .map(|b| b.to_vec())
            .map_err(|e| GateError::from_provider_message(&e.to_string()))
    }

    /// Sign and submit a state-changing transaction, returning its hash.
    async fn send(&self, to: Address, input: Bytes) -> Result<TxHandle, GateError> {
        let from = self
            .provider
            .signer_address()
            .ok_or(GateError::WalletUnavailable)?;

        let tx = TransactionRequest::default()
            .from(from)
            .to(to)
            .input(input.into());

        let pending = self
            .provider
            .inner()
            .send_transaction(tx)
            .await
            .map_err(|e| GateError::from_provider_message(&e.to_string()))?;

        let hash = *pending.tx_hash();
        debug!(tx = %hash, "Transaction submitted");
        Ok(hash.to_string())
    }

    fn parse_address(raw: &str) -> Result<Address, GateError> {
        raw.parse::<Address>()
            .map_err(|e| GateError::Chain(format!("invalid address {raw}: {e}")))
    }
}

#[async_trait]
impl WalletGateway for CeloWalletGateway {
    #[instrument(skip(self))]
    async fn request_accounts(&self) -> Result<String, GateError> {
        match self.provider.signer_address() {
            Some(addr) => Ok(addr.to_string()),
            None => Err(GateError::WalletUnavailable),
        }
    }

    #[instrument(skip(self))]
    async fn switch_or_add_chain(&self, chain_id: u64) -> Result<(), GateError> {
        // A fixed RPC endpoint cannot switch networks the way a browser
        // wallet can; the check degenerates to verifying the endpoint
        // already serves the requested chain.
        let actual = self.provider.chain_id();
        if actual == chain_id {
            return Ok(());
        }
        Err(GateError::ChainMismatch {
            expected: chain_id,
            actual,
        })
    }

    #[instrument(skip(self))]
    async fn read_token_balance(&self, address: &str) -> Result<u128, GateError> {
        let holder = Self::parse_address(address)?;
        let input = Self::calldata(b"balanceOf(address)", &[Self::address_word(holder)]);

        let result = self.call(self.addresses.token, input).await?;
        let balance = U256::from_be_slice(&result);

        Ok(u128::try_from(balance).unwrap_or(u128::MAX))
    }

    #[instrument(skip(self))]
    async fn approve_spender(&self, amount: u128) -> Result<TxHandle, GateError> {
        let input = Self::calldata(
            b"approve(address,uint256)",
            &[
                Self::address_word(self.addresses.access_gate),
                U256::from(amount).to_be_bytes::<32>(),
            ],
        );

        self.send(self.addresses.token, input).await
    }

    #[instrument(skip(self))]
    async fn await_confirmation(&self, handle: &str) -> Result<(), GateError> {
        let hash: TxHash = handle
            .parse()
            .map_err(|_| GateError::Chain(format!("invalid tx hash {handle}")))?;

        loop {
            let receipt = self
                .provider
                .inner()
                .get_transaction_receipt(hash)
                .await
                .map_err(|e| GateError::from_provider_message(&e.to_string()))?;

            match receipt {
                Some(receipt) if receipt.status() => {
                    info!(tx = %hash, "Transaction confirmed");
                    return Ok(());
                }
                Some(_) => {
                    return Err(GateError::Chain(format!("transaction {hash} reverted")));
                }
                None => sleep(CONFIRMATION_POLL).await,
            }
        }
    }

    #[instrument(skip(self))]
    async fn invoke_payment(&self) -> Result<TxHandle, GateError> {
        let input = Self::calldata(b"payAccess()", &[]);
        self.send(self.addresses.access_gate, input).await
    }

    #[instrument(skip(self))]
    async fn read_access_flag(&self, address: &str) -> Result<bool, GateError> {
        let user = Self::parse_address(address)?;
        let input = Self::calldata(b"hasAccess(address)", &[Self::address_word(user)]);

        let result = self.call(self.addresses.access_gate, input).await?;
        Ok(U256::from_be_slice(&result) != U256::ZERO)
    }
}
