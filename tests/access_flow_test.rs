//! Access Flow Tests - State Machine Transitions over a Mock Wallet
//!
//! Tests the connect/check/pay lifecycle against a mockall mock of the
//! WalletGateway port: recovery policy on failed access reads, the
//! approve-then-pay ordering, and payment retry eligibility.

use std::sync::Arc;

use mockall::mock;
use mockall::predicate::*;

use talent_gate::domain::access::{units_to_raw, AccessState};
use talent_gate::domain::error::GateError;
use talent_gate::usecases::AccessFlow;

const CHAIN_ID: u64 = 42220;
const ADDRESS: &str = "0x765DE816845861e75A25fCA122bb6898B8B1282a";

mock! {
    pub Wallet {}

    #[async_trait::async_trait]
    impl talent_gate::ports::wallet_gateway::WalletGateway for Wallet {
        async fn request_accounts(&self) -> Result<String, GateError>;
        async fn switch_or_add_chain(&self, chain_id: u64) -> Result<(), GateError>;
        async fn read_token_balance(&self, address: &str) -> Result<u128, GateError>;
        async fn approve_spender(&self, amount: u128) -> Result<String, GateError>;
        async fn await_confirmation(&self, handle: &str) -> Result<(), GateError>;
        async fn invoke_payment(&self) -> Result<String, GateError>;
        async fn read_access_flag(&self, address: &str) -> Result<bool, GateError>;
    }
}

fn expect_connect(wallet: &mut MockWallet) {
    wallet
        .expect_request_accounts()
        .times(1)
        .returning(|| Ok(ADDRESS.to_string()));
    wallet
        .expect_switch_or_add_chain()
        .with(eq(CHAIN_ID))
        .times(1)
        .returning(|_| Ok(()));
}

fn flow(wallet: MockWallet) -> AccessFlow<MockWallet> {
    AccessFlow::new(Arc::new(wallet), CHAIN_ID, units_to_raw(1))
}

#[tokio::test]
async fn connect_with_recorded_access_grants_immediately() {
    let mut wallet = MockWallet::new();
    expect_connect(&mut wallet);
    wallet
        .expect_read_access_flag()
        .with(eq(ADDRESS))
        .times(1)
        .returning(|_| Ok(true));

    let mut flow = flow(wallet);
    let state = flow.connect().await.unwrap();

    assert_eq!(state, AccessState::AccessGranted);
    assert_eq!(flow.address(), Some(ADDRESS));
}

#[tokio::test]
async fn failed_access_read_downgrades_to_denied() {
    let mut wallet = MockWallet::new();
    expect_connect(&mut wallet);
    wallet
        .expect_read_access_flag()
        .times(1)
        .returning(|_| Err(GateError::Chain("rpc unreachable".to_string())));

    let mut flow = flow(wallet);
    let state = flow.connect().await.unwrap();

    // Could-not-check is deliberately treated as no access, never an error.
    assert_eq!(state, AccessState::AccessDenied { needs_payment: true });
}

#[tokio::test]
async fn rejected_connection_returns_to_disconnected() {
    let mut wallet = MockWallet::new();
    wallet
        .expect_request_accounts()
        .times(1)
        .returning(|| Err(GateError::UserRejected));

    let mut flow = flow(wallet);
    let err = flow.connect().await.unwrap_err();

    assert!(matches!(err, GateError::UserRejected));
    assert_eq!(*flow.state(), AccessState::Disconnected);
}

#[tokio::test]
async fn chain_mismatch_surfaces_and_disconnects() {
    let mut wallet = MockWallet::new();
    wallet
        .expect_request_accounts()
        .times(1)
        .returning(|| Ok(ADDRESS.to_string()));
    wallet
        .expect_switch_or_add_chain()
        .times(1)
        .returning(|_| {
            Err(GateError::ChainMismatch {
                expected: CHAIN_ID,
                actual: 1,
            })
        });

    let mut flow = flow(wallet);
    let err = flow.connect().await.unwrap_err();

    assert!(matches!(err, GateError::ChainMismatch { .. }));
    assert_eq!(*flow.state(), AccessState::Disconnected);
}

#[tokio::test]
async fn successful_payment_runs_approve_then_pay() {
    let mut wallet = MockWallet::new();
    expect_connect(&mut wallet);
    wallet
        .expect_read_access_flag()
        .times(1)
        .returning(|_| Ok(false));
    wallet
        .expect_read_token_balance()
        .with(eq(ADDRESS))
        .times(1)
        .returning(|_| Ok(units_to_raw(5)));
    wallet
        .expect_approve_spender()
        .with(eq(units_to_raw(1)))
        .times(1)
        .returning(|_| Ok("0xapprove".to_string()));
    wallet
        .expect_await_confirmation()
        .with(eq("0xapprove"))
        .times(1)
        .returning(|_| Ok(()));
    wallet
        .expect_invoke_payment()
        .times(1)
        .returning(|| Ok("0xpay".to_string()));
    wallet
        .expect_await_confirmation()
        .with(eq("0xpay"))
        .times(1)
        .returning(|_| Ok(()));

    let mut flow = flow(wallet);
    flow.connect().await.unwrap();
    let state = flow.pay().await;

    assert_eq!(state, AccessState::AccessGranted);
}

#[tokio::test]
async fn rejected_payment_fails_with_verbatim_reason_and_is_retryable() {
    let mut wallet = MockWallet::new();
    expect_connect(&mut wallet);
    wallet
        .expect_read_access_flag()
        .times(1)
        .returning(|_| Ok(false));
    wallet
        .expect_read_token_balance()
        .times(2)
        .returning(|_| Ok(units_to_raw(2)));
    wallet
        .expect_approve_spender()
        .times(2)
        .returning(|_| Ok("0xapprove".to_string()));
    wallet
        .expect_await_confirmation()
        .times(3)
        .returning(|_| Ok(()));
    // First payment invocation is rejected by the user, second succeeds.
    wallet
        .expect_invoke_payment()
        .times(1)
        .returning(|| Err(GateError::UserRejected));
    wallet
        .expect_invoke_payment()
        .times(1)
        .returning(|| Ok("0xpay".to_string()));

    let mut flow = flow(wallet);
    flow.connect().await.unwrap();

    let state = flow.pay().await;
    assert_eq!(
        state,
        AccessState::PaymentFailed {
            reason: "Transaction was rejected by user".to_string()
        }
    );
    assert!(state.can_start_payment());

    // Retry re-enters Paying and completes.
    let state = flow.pay().await;
    assert_eq!(state, AccessState::AccessGranted);
}

#[tokio::test]
async fn insufficient_balance_never_reaches_the_contracts() {
    let mut wallet = MockWallet::new();
    expect_connect(&mut wallet);
    wallet
        .expect_read_access_flag()
        .times(1)
        .returning(|_| Ok(false));
    wallet
        .expect_read_token_balance()
        .times(1)
        .returning(|_| Ok(units_to_raw(1) / 2));
    // No approve/pay expectations: any contract call would panic the mock.

    let mut flow = flow(wallet);
    flow.connect().await.unwrap();
    let state = flow.pay().await;

    match state {
        AccessState::PaymentFailed { reason } => {
            assert!(reason.contains("Insufficient cUSD balance"), "{reason}");
            assert!(reason.contains("0.5"), "{reason}");
        }
        other => panic!("expected PaymentFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn already_granted_revert_counts_as_success() {
    let mut wallet = MockWallet::new();
    expect_connect(&mut wallet);
    wallet
        .expect_read_access_flag()
        .times(1)
        .returning(|_| Ok(false));
    wallet
        .expect_read_token_balance()
        .times(1)
        .returning(|_| Ok(units_to_raw(3)));
    wallet
        .expect_approve_spender()
        .times(1)
        .returning(|_| Ok("0xapprove".to_string()));
    wallet
        .expect_await_confirmation()
        .times(1)
        .returning(|_| Ok(()));
    wallet
        .expect_invoke_payment()
        .times(1)
        .returning(|| Err(GateError::AlreadyGranted));

    let mut flow = flow(wallet);
    flow.connect().await.unwrap();
    let state = flow.pay().await;

    assert_eq!(state, AccessState::AccessGranted);
}

#[tokio::test]
async fn payment_from_an_illegal_state_is_ignored() {
    let wallet = MockWallet::new();
    let mut flow = flow(wallet);

    // Still Disconnected: pay() must not touch the wallet at all.
    let state = flow.pay().await;
    assert_eq!(state, AccessState::Disconnected);
}
