//! Shared fixtures for treasury tests

use std::sync::{Arc, Once};

use crate::auth::RoleKind;
use crate::clients::mock::{
    InMemoryLedger, MockAdapter, MockDistributor, MockExchange, MockVault,
};
use crate::clients::Clients;
use crate::config::TreasuryConfig;
use crate::treasury::Treasury;
use crate::types::Address;

static TRACING: Once = Once::new();

/// Route treasury logs to the test output, honoring `RUST_LOG`
pub(crate) fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub(crate) fn addr(n: u8) -> Address {
    Address::new([n; 32])
}

pub(crate) const TREASURY: Address = Address::new([10; 32]);
pub(crate) const ADMIN: Address = Address::new([11; 32]);
pub(crate) const OPERATOR: Address = Address::new([12; 32]);
pub(crate) const ADAPTER: Address = Address::new([20; 32]);
pub(crate) const VAULT: Address = Address::new([21; 32]);
pub(crate) const EXCHANGE: Address = Address::new([22; 32]);
pub(crate) const DISTRIBUTOR: Address = Address::new([23; 32]);
pub(crate) const REWARD_TOKEN: Address = Address::new([30; 32]);
pub(crate) const PARENT_TOKEN: Address = Address::new([31; 32]);

pub(crate) fn test_config() -> TreasuryConfig {
    TreasuryConfig {
        address: TREASURY,
        admin: ADMIN,
        exchange: EXCHANGE,
        distributor: DISTRIBUTOR,
        event_capacity: 64,
    }
}

/// A treasury wired to in-memory mocks, with the operator role granted
pub(crate) struct TestBed {
    pub treasury: Arc<Treasury>,
    pub ledger: Arc<InMemoryLedger>,
    pub adapter: Arc<MockAdapter>,
    pub vault: Arc<MockVault>,
    pub exchange: Arc<MockExchange>,
    pub distributor: Arc<MockDistributor>,
}

impl TestBed {
    pub async fn new() -> Self {
        init_tracing();

        let ledger = InMemoryLedger::new();
        let adapter = MockAdapter::new(ADAPTER, VAULT, ledger.clone());
        let vault = MockVault::new();
        vault.register(VAULT, PARENT_TOKEN);
        let exchange = MockExchange::new(ledger.clone(), TREASURY, 0);
        let distributor = MockDistributor::new();

        let clients = Clients {
            tokens: ledger.clone(),
            adapters: adapter.clone(),
            vaults: vault.clone(),
            exchange: exchange.clone(),
            distributor: distributor.clone(),
        };

        let treasury = Arc::new(Treasury::new(&test_config(), clients).unwrap());
        treasury
            .grant_role(ADMIN, RoleKind::Operator, OPERATOR)
            .unwrap();

        Self {
            treasury,
            ledger,
            adapter,
            vault,
            exchange,
            distributor,
        }
    }
}
