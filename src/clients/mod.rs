//! Collaborator client traits
//!
//! The treasury talks to four kinds of external collaborators (adapters,
//! vaults, an exchange, a distributor) plus the token ledger its balances
//! live on. Each seam is a trait addressed by `Address` so one client object
//! can reach any number of on-chain entities. None of these collaborators is
//! trusted for exact amounts: the treasury measures value movement by
//! comparing its own balances before and after each call.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::Address;

#[cfg(test)]
pub(crate) mod mock;

/// Balance reads, transfers, and allowance grants on the token ledger
#[async_trait]
pub trait TokenClient: Send + Sync {
    /// Current balance of `owner` in `token`'s smallest unit
    async fn balance_of(&self, token: Address, owner: Address) -> Result<u64>;

    /// Move `amount` of `token` from `from` to `to`
    async fn transfer(&self, token: Address, from: Address, to: Address, amount: u64)
        -> Result<()>;

    /// Set `spender`'s allowance over `owner`'s `token` balance to exactly
    /// `amount`, replacing any previous allowance
    async fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: u64,
    ) -> Result<()>;
}

/// A yield-generating position wrapper that accrues reward balances
#[async_trait]
pub trait AdapterClient: Send + Sync {
    /// Instruct the adapter to push its held balance of `token` to
    /// `recipient`. The amount actually pushed is not a trusted return
    /// value; callers must measure their own balance delta.
    async fn collect_into(&self, adapter: Address, token: Address, recipient: Address)
        -> Result<()>;

    /// The custodial vault this adapter allocates capital for
    async fn parent_vault(&self, adapter: Address) -> Result<Address>;
}

/// The custodial pool an adapter belongs to
#[async_trait]
pub trait VaultClient: Send + Sync {
    /// The vault's single designated base asset
    async fn base_asset(&self, vault: Address) -> Result<Address>;
}

/// Opaque conversion collaborator. Routing and pricing are its business.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Attempt to convert `amount` of `from_token` into `to_token` using
    /// caller-supplied opaque routing data. Output is never trusted as a
    /// return value; callers measure their own `to_token` balance delta.
    async fn sell(
        &self,
        exchange: Address,
        from_token: Address,
        to_token: Address,
        amount: u64,
        payload: &[u8],
    ) -> Result<()>;
}

/// Batched reward-claim collaborator, all-or-nothing per call
#[async_trait]
pub trait DistributorClient: Send + Sync {
    async fn claim_batch(
        &self,
        distributor: Address,
        claimants: &[Address],
        tokens: &[Address],
        amounts: &[u64],
        proofs: &[Vec<u8>],
    ) -> Result<()>;
}

/// Bundle of client handles the treasury is constructed with
#[derive(Clone)]
pub struct Clients {
    pub tokens: Arc<dyn TokenClient>,
    pub adapters: Arc<dyn AdapterClient>,
    pub vaults: Arc<dyn VaultClient>,
    pub exchange: Arc<dyn ExchangeClient>,
    pub distributor: Arc<dyn DistributorClient>,
}
