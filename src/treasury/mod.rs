//! The treasury module: custodial accounting and control
//!
//! Collects reward-token balances accrued by adapter positions, converts
//! them into the parent vault's base asset through the exchange
//! collaborator, forwards the proceeds, and relays batched reward claims
//! through the distributor collaborator. Operated by a small set of
//! privileged callers.
//!
//! # Trust model
//!
//! Every external collaborator (adapter, exchange, distributor, vault) is
//! untrusted for exact amounts. The treasury measures value movement by
//! reading its own balance before and after each external call and works
//! only with the delta. The operator-gated workflows additionally run under
//! a single-flight execution lock so a collaborator cannot re-enter them
//! mid-measurement.

mod claim;
mod skim;

#[cfg(test)]
pub(crate) mod testkit;

pub use skim::SkimOutcome;

use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::auth::{RoleKind, RoleRegistry};
use crate::clients::Clients;
use crate::config::TreasuryConfig;
use crate::error::{Error, Result};
use crate::events::{EventBus, EventEnvelope, TreasuryEvent};
use crate::guard::ExecutionLock;
use crate::types::Address;

/// Current references of the two configured collaborators
#[derive(Debug, Clone, Copy)]
pub struct CollaboratorSet {
    pub exchange: Address,
    pub distributor: Address,
}

/// Custodial reward treasury
pub struct Treasury {
    address: Address,
    roles: RoleRegistry,
    lock: ExecutionLock,
    collaborators: RwLock<CollaboratorSet>,
    clients: Clients,
    events: EventBus,
}

impl Treasury {
    /// Construct a treasury from validated configuration.
    ///
    /// Fails with `InvalidAddress` if the treasury address, initial
    /// administrator, or either collaborator reference is zero. Seeds the
    /// role table with the configured administrator.
    pub fn new(config: &TreasuryConfig, clients: Clients) -> Result<Self> {
        config.validate()?;

        let roles = RoleRegistry::new(config.admin)?;
        info!(
            "Treasury initialized: address={}, admin={}, exchange={}, distributor={}",
            config.address, config.admin, config.exchange, config.distributor
        );

        Ok(Self {
            address: config.address,
            roles,
            lock: ExecutionLock::new(),
            collaborators: RwLock::new(CollaboratorSet {
                exchange: config.exchange,
                distributor: config.distributor,
            }),
            clients,
            events: EventBus::new(config.event_capacity),
        })
    }

    /// Address this treasury custodies balances under
    pub fn address(&self) -> Address {
        self.address
    }

    /// Subscribe to treasury event notifications
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    /// Pure role lookup, no side effects
    pub fn has_role(&self, role: RoleKind, principal: Address) -> bool {
        self.roles.has_role(role, principal)
    }

    /// Currently configured exchange collaborator
    pub async fn exchange(&self) -> Address {
        self.collaborators.read().await.exchange
    }

    /// Currently configured distributor collaborator
    pub async fn distributor(&self) -> Address {
        self.collaborators.read().await.distributor
    }

    /// Replace the exchange collaborator reference. Administrator-only.
    ///
    /// No validation that the address behaves like an exchange - trust is
    /// established out of band by the administrator.
    pub async fn set_exchange(&self, caller: Address, addr: Address) -> Result<()> {
        self.roles.require(RoleKind::Administrator, caller)?;
        if addr.is_zero() {
            return Err(Error::InvalidAddress(
                "exchange cannot be the zero address".to_string(),
            ));
        }

        let previous = {
            let mut set = self.collaborators.write().await;
            std::mem::replace(&mut set.exchange, addr)
        };

        info!("Exchange collaborator updated: {} -> {}", previous, addr);
        self.events.emit(TreasuryEvent::ExchangeUpdated {
            previous,
            current: addr,
        });
        Ok(())
    }

    /// Replace the distributor collaborator reference. Administrator-only.
    pub async fn set_distributor(&self, caller: Address, addr: Address) -> Result<()> {
        self.roles.require(RoleKind::Administrator, caller)?;
        if addr.is_zero() {
            return Err(Error::InvalidAddress(
                "distributor cannot be the zero address".to_string(),
            ));
        }

        let previous = {
            let mut set = self.collaborators.write().await;
            std::mem::replace(&mut set.distributor, addr)
        };

        info!("Distributor collaborator updated: {} -> {}", previous, addr);
        self.events.emit(TreasuryEvent::DistributorUpdated {
            previous,
            current: addr,
        });
        Ok(())
    }

    /// Grant a role to a principal. Administrator-only, no-op-safe.
    pub fn grant_role(&self, caller: Address, role: RoleKind, principal: Address) -> Result<()> {
        self.roles.require(RoleKind::Administrator, caller)?;
        if self.roles.grant(role, principal)? {
            info!("Role granted: {} -> {}", role, principal);
            self.events.emit(TreasuryEvent::RoleGranted { role, principal });
        }
        Ok(())
    }

    /// Revoke a role from a principal. Administrator-only, no-op-safe.
    ///
    /// Refuses to revoke the last remaining administrator.
    pub fn revoke_role(&self, caller: Address, role: RoleKind, principal: Address) -> Result<()> {
        self.roles.require(RoleKind::Administrator, caller)?;
        if self.roles.revoke(role, principal)? {
            info!("Role revoked: {} from {}", role, principal);
            self.events.emit(TreasuryEvent::RoleRevoked { role, principal });
        }
        Ok(())
    }

    /// Unconditionally transfer a held token balance out. Administrator-only.
    ///
    /// Operational backstop for recovering stranded funds; bypasses all skim
    /// and claim logic. Not reentrancy-guarded: a single external transfer
    /// with no prior balance-sensitive measurement.
    pub async fn rescue(&self, caller: Address, token: Address, to: Address, amount: u64) -> Result<()> {
        self.roles.require(RoleKind::Administrator, caller)?;
        if to.is_zero() {
            return Err(Error::InvalidAddress(
                "rescue target cannot be the zero address".to_string(),
            ));
        }
        if amount == 0 {
            return Err(Error::InvalidAmount(
                "rescue amount must be non-zero".to_string(),
            ));
        }

        self.clients
            .tokens
            .transfer(token, self.address, to, amount)
            .await?;

        warn!("Rescue: {} units of {} sent to {}", amount, token, to);
        self.events.emit(TreasuryEvent::Rescued { token, to, amount });
        Ok(())
    }

}
