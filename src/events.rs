//! Treasury event notifications
//!
//! Every state-changing operation emits an event on a broadcast channel so
//! operator tooling can observe what the treasury did. Emission is
//! fire-and-forget: with no subscriber attached the event is dropped after
//! being logged.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::auth::RoleKind;
use crate::types::Address;

/// Notification emitted by a treasury operation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreasuryEvent {
    RoleGranted {
        role: RoleKind,
        principal: Address,
    },
    RoleRevoked {
        role: RoleKind,
        principal: Address,
    },
    ExchangeUpdated {
        previous: Address,
        current: Address,
    },
    DistributorUpdated {
        previous: Address,
        current: Address,
    },
    /// Produced exactly once per successful skim
    Skimmed {
        adapter: Address,
        reward_token: Address,
        parent_token: Address,
        rewards_in: u64,
        proceeds: u64,
    },
    ProceedsForwarded {
        vault: Address,
        token: Address,
        amount: u64,
    },
    /// One per (claimant, token, amount) triple successfully relayed.
    /// Amounts are nominal: the relay trusts the distributor's non-failure.
    Claimed {
        claimant: Address,
        token: Address,
        amount: u64,
    },
    Rescued {
        token: Address,
        to: Address,
        amount: u64,
    },
}

/// A timestamped event as delivered to subscribers
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: TreasuryEvent,
}

/// Broadcast fan-out for treasury events
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.tx.subscribe()
    }

    pub(crate) fn emit(&self, event: TreasuryEvent) {
        debug!("Treasury event: {:?}", event);
        // No subscribers is fine - events are observational, not load-bearing
        let _ = self.tx.send(EventEnvelope {
            at: Utc::now(),
            event,
        });
    }
}
