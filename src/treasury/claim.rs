//! The claim relay
//!
//! Forwards batched reward claims to the distributor collaborator on behalf
//! of adapters. The relay validates batch shape only; proof verification and
//! payout bookkeeping are the distributor's business. Emitted per-entry
//! notifications report nominal amounts and trust the distributor's
//! non-failure - if the distributor's batch semantics allow partial success,
//! the notifications can overstate what was actually claimed. That is a
//! documented trust boundary, not something this relay can verify.

use tracing::info;

use crate::auth::RoleKind;
use crate::error::{Error, Result};
use crate::events::TreasuryEvent;
use crate::types::Address;

use super::Treasury;

impl Treasury {
    /// Relay a batch of reward claims to the distributor.
    ///
    /// Operator-only, guarded against reentrancy. The four input sequences
    /// must be non-empty and of identical length; the batch is forwarded
    /// unmodified in a single distributor call, then one `Claimed` event is
    /// emitted per entry.
    pub async fn claim(
        &self,
        caller: Address,
        claimants: &[Address],
        tokens: &[Address],
        amounts: &[u64],
        proofs: &[Vec<u8>],
    ) -> Result<()> {
        self.roles.require(RoleKind::Operator, caller)?;
        let _guard = self.lock.enter()?;

        let len = claimants.len();
        if len == 0 || tokens.len() != len || amounts.len() != len || proofs.len() != len {
            return Err(Error::InvalidArrayLengths {
                claimants: len,
                tokens: tokens.len(),
                amounts: amounts.len(),
                proofs: proofs.len(),
            });
        }

        let distributor = self.collaborators.read().await.distributor;
        self.clients
            .distributor
            .claim_batch(distributor, claimants, tokens, amounts, proofs)
            .await?;

        info!("Claim batch relayed: {} entries via {}", len, distributor);
        for i in 0..len {
            self.events.emit(TreasuryEvent::Claimed {
                claimant: claimants[i],
                token: tokens[i],
                amount: amounts[i],
            });
        }
        Ok(())
    }
}
