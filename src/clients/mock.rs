//! In-memory mock collaborators for tests
//!
//! A shared `InMemoryLedger` plays the token layer; the mock adapter,
//! vault, exchange, and distributor act against it the way their real
//! counterparts would move value on chain.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::clients::{AdapterClient, DistributorClient, ExchangeClient, TokenClient, VaultClient};
use crate::error::{Error, Result};
use crate::types::Address;

/// Token balances and allowances, keyed by (token, owner)
#[derive(Debug, Default)]
pub(crate) struct InMemoryLedger {
    balances: DashMap<(Address, Address), u64>,
    allowances: DashMap<(Address, Address, Address), u64>,
}

impl InMemoryLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn mint(&self, token: Address, owner: Address, amount: u64) {
        *self.balances.entry((token, owner)).or_insert(0) += amount;
    }

    pub fn balance(&self, token: Address, owner: Address) -> u64 {
        self.balances
            .get(&(token, owner))
            .map(|b| *b)
            .unwrap_or(0)
    }

    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> u64 {
        self.allowances
            .get(&(token, owner, spender))
            .map(|a| *a)
            .unwrap_or(0)
    }

    fn debit(&self, token: Address, owner: Address, amount: u64) -> Result<()> {
        let mut entry = self
            .balances
            .get_mut(&(token, owner))
            .ok_or_else(|| Error::Token(format!("no balance of {} for {}", token, owner)))?;
        if *entry < amount {
            return Err(Error::Token(format!(
                "insufficient balance: {} < {}",
                *entry, amount
            )));
        }
        *entry -= amount;
        Ok(())
    }

    fn credit(&self, token: Address, owner: Address, amount: u64) {
        *self.balances.entry((token, owner)).or_insert(0) += amount;
    }

    pub fn spend_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: u64,
    ) -> Result<()> {
        let mut entry = self
            .allowances
            .get_mut(&(token, owner, spender))
            .ok_or_else(|| Error::Token("no allowance granted".to_string()))?;
        if *entry < amount {
            return Err(Error::Token(format!(
                "insufficient allowance: {} < {}",
                *entry, amount
            )));
        }
        *entry -= amount;
        Ok(())
    }
}

#[async_trait]
impl TokenClient for InMemoryLedger {
    async fn balance_of(&self, token: Address, owner: Address) -> Result<u64> {
        Ok(self.balance(token, owner))
    }

    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<()> {
        self.debit(token, from, amount)?;
        self.credit(token, to, amount);
        Ok(())
    }

    async fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: u64,
    ) -> Result<()> {
        self.allowances.insert((token, owner, spender), amount);
        Ok(())
    }
}

/// Single-adapter mock: pushes its entire held balance on collect
#[derive(Debug)]
pub(crate) struct MockAdapter {
    pub address: Address,
    pub parent: Address,
    ledger: Arc<InMemoryLedger>,
}

impl MockAdapter {
    pub fn new(address: Address, parent: Address, ledger: Arc<InMemoryLedger>) -> Arc<Self> {
        Arc::new(Self {
            address,
            parent,
            ledger,
        })
    }
}

#[async_trait]
impl AdapterClient for MockAdapter {
    async fn collect_into(
        &self,
        adapter: Address,
        token: Address,
        recipient: Address,
    ) -> Result<()> {
        if adapter != self.address {
            return Err(Error::Adapter(format!("unknown adapter {}", adapter)));
        }
        let held = self.ledger.balance(token, self.address);
        if held > 0 {
            self.ledger.debit(token, self.address, held)?;
            self.ledger.credit(token, recipient, held);
        }
        Ok(())
    }

    async fn parent_vault(&self, adapter: Address) -> Result<Address> {
        if adapter != self.address {
            return Err(Error::Adapter(format!("unknown adapter {}", adapter)));
        }
        Ok(self.parent)
    }
}

/// Vault registry mock: vault address -> base asset
#[derive(Debug, Default)]
pub(crate) struct MockVault {
    assets: DashMap<Address, Address>,
}

impl MockVault {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn register(&self, vault: Address, asset: Address) {
        self.assets.insert(vault, asset);
    }
}

#[async_trait]
impl VaultClient for MockVault {
    async fn base_asset(&self, vault: Address) -> Result<Address> {
        self.assets
            .get(&vault)
            .map(|a| *a)
            .ok_or_else(|| Error::Vault(format!("unknown vault {}", vault)))
    }
}

/// Exchange mock with a scripted output amount.
///
/// Pulls the sold tokens from the treasury through the allowance path, so a
/// missing or too-small allowance fails the sale the way a real exchange
/// would.
#[derive(Debug)]
pub(crate) struct MockExchange {
    ledger: Arc<InMemoryLedger>,
    treasury: Address,
    out_amount: AtomicU64,
    calls: AtomicUsize,
}

impl MockExchange {
    pub fn new(ledger: Arc<InMemoryLedger>, treasury: Address, out_amount: u64) -> Arc<Self> {
        Arc::new(Self {
            ledger,
            treasury,
            out_amount: AtomicU64::new(out_amount),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_out_amount(&self, amount: u64) {
        self.out_amount.store(amount, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeClient for MockExchange {
    async fn sell(
        &self,
        exchange: Address,
        from_token: Address,
        to_token: Address,
        amount: u64,
        _payload: &[u8],
    ) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ledger
            .spend_allowance(from_token, self.treasury, exchange, amount)?;
        self.ledger.debit(from_token, self.treasury, amount)?;
        let out = self.out_amount.load(Ordering::SeqCst);
        if out > 0 {
            self.ledger.credit(to_token, self.treasury, out);
        }
        Ok(())
    }
}

/// Distributor mock recording batch shapes, optionally failing whole batches
#[derive(Debug, Default)]
pub(crate) struct MockDistributor {
    calls: AtomicUsize,
    fail: AtomicBool,
    last_batch_len: AtomicUsize,
}

impl MockDistributor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_batch_len(&self) -> usize {
        self.last_batch_len.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DistributorClient for MockDistributor {
    async fn claim_batch(
        &self,
        _distributor: Address,
        claimants: &[Address],
        _tokens: &[Address],
        _amounts: &[u64],
        _proofs: &[Vec<u8>],
    ) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Distributor("batch rejected".to_string()));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_batch_len.store(claimants.len(), Ordering::SeqCst);
        Ok(())
    }
}
