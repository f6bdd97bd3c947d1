//! The skim workflow
//!
//! Pulls an adapter's accrued reward-token balance into the treasury,
//! converts it to the adapter's parent vault base asset when the two differ,
//! and forwards the proceeds to the vault.
//!
//! Every amount this workflow reasons about is derived from the treasury's
//! own balance change, never from a collaborator's self-reported value. That
//! delta measurement is the load-bearing defense against a malicious or
//! buggy adapter or exchange under-reporting work done or over-reporting an
//! amount that was never actually transferred. The `min_proceeds` floor is
//! the operator's only conversion-slippage protection; it must come from an
//! off-chain pricing check and is enforced here mechanically.

use tracing::{debug, info};

use crate::auth::RoleKind;
use crate::error::{Error, Result};
use crate::events::TreasuryEvent;
use crate::types::Address;

use super::Treasury;

/// What a successful skim actually moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkimOutcome {
    pub adapter: Address,
    pub reward_token: Address,
    pub parent_token: Address,
    pub parent_vault: Address,
    /// Measured reward-token delta pushed by the adapter
    pub rewards_in: u64,
    /// Measured parent-token amount forwarded to the vault
    pub proceeds: u64,
}

impl Treasury {
    /// Skim an adapter's accrued rewards into its parent vault.
    ///
    /// Operator-only, guarded against reentrancy. `swap_payload` is opaque
    /// routing data handed to the exchange collaborator untouched;
    /// `min_proceeds` is the minimum acceptable conversion output in the
    /// parent token's smallest unit (ignored when no conversion is needed).
    pub async fn skim(
        &self,
        caller: Address,
        adapter: Address,
        reward_token: Address,
        swap_payload: &[u8],
        min_proceeds: u64,
    ) -> Result<SkimOutcome> {
        self.roles.require(RoleKind::Operator, caller)?;
        let _guard = self.lock.enter()?;

        if adapter.is_zero() {
            return Err(Error::InvalidAddress(
                "adapter cannot be the zero address".to_string(),
            ));
        }
        if reward_token.is_zero() {
            return Err(Error::InvalidAddress(
                "reward token cannot be the zero address".to_string(),
            ));
        }

        debug!(
            "Skim start: adapter={}, reward_token={}, min_proceeds={}",
            adapter, reward_token, min_proceeds
        );

        // Measure what the adapter actually pushed, never what it claims
        let before = self
            .clients
            .tokens
            .balance_of(reward_token, self.address)
            .await?;
        self.clients
            .adapters
            .collect_into(adapter, reward_token, self.address)
            .await?;
        let after = self
            .clients
            .tokens
            .balance_of(reward_token, self.address)
            .await?;

        let rewards_in = after.saturating_sub(before);
        if rewards_in == 0 {
            return Err(Error::NothingToSkim);
        }

        let parent_vault = self.clients.adapters.parent_vault(adapter).await?;
        let parent_token = self.clients.vaults.base_asset(parent_vault).await?;

        let proceeds = if parent_token == reward_token {
            rewards_in
        } else {
            self.convert(reward_token, parent_token, rewards_in, swap_payload, min_proceeds)
                .await?
        };

        self.clients
            .tokens
            .transfer(parent_token, self.address, parent_vault, proceeds)
            .await?;

        info!(
            "Skim complete: adapter={}, rewards_in={} {}, proceeds={} {} -> vault {}",
            adapter, rewards_in, reward_token, proceeds, parent_token, parent_vault
        );
        self.events.emit(TreasuryEvent::Skimmed {
            adapter,
            reward_token,
            parent_token,
            rewards_in,
            proceeds,
        });
        self.events.emit(TreasuryEvent::ProceedsForwarded {
            vault: parent_vault,
            token: parent_token,
            amount: proceeds,
        });

        Ok(SkimOutcome {
            adapter,
            reward_token,
            parent_token,
            parent_vault,
            rewards_in,
            proceeds,
        })
    }

    /// Sell `amount` of `reward_token` for `parent_token` and return the
    /// measured proceeds.
    ///
    /// The exchange gets an exact, single-use allowance of the amount about
    /// to be sold, never a standing approval: a compromised exchange can
    /// take at most this sale.
    async fn convert(
        &self,
        reward_token: Address,
        parent_token: Address,
        amount: u64,
        swap_payload: &[u8],
        min_proceeds: u64,
    ) -> Result<u64> {
        let exchange = self.collaborators.read().await.exchange;

        self.clients
            .tokens
            .approve(reward_token, self.address, exchange, amount)
            .await?;

        let before = self
            .clients
            .tokens
            .balance_of(parent_token, self.address)
            .await?;
        self.clients
            .exchange
            .sell(exchange, reward_token, parent_token, amount, swap_payload)
            .await?;
        let after = self
            .clients
            .tokens
            .balance_of(parent_token, self.address)
            .await?;

        let proceeds = after.saturating_sub(before);
        if proceeds == 0 || proceeds < min_proceeds {
            return Err(Error::NotEnoughProceeds {
                proceeds,
                min_proceeds,
            });
        }
        Ok(proceeds)
    }
}
