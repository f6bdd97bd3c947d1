//! Error types for the reward treasury

use thiserror::Error;

use crate::auth::RoleKind;
use crate::types::Address;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the reward treasury
#[derive(Error, Debug)]
pub enum Error {
    // Authorization errors
    #[error("Unauthorized: {principal} does not hold role {role}")]
    Unauthorized { role: RoleKind, principal: Address },

    #[error("Cannot revoke the last remaining administrator")]
    LastAdministrator,

    // Input validation errors
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid array lengths: claimants={claimants}, tokens={tokens}, amounts={amounts}, proofs={proofs}")]
    InvalidArrayLengths {
        claimants: usize,
        tokens: usize,
        amounts: usize,
        proofs: usize,
    },

    // Skim workflow errors
    #[error("Nothing to skim: adapter pushed no reward balance")]
    NothingToSkim,

    #[error("Not enough proceeds: measured {proceeds}, floor is {min_proceeds}")]
    NotEnoughProceeds { proceeds: u64, min_proceeds: u64 },

    // Reentrancy guard
    #[error("Reentrant call rejected")]
    Reentrant,

    // Collaborator failures - propagated as-is, never suppressed
    #[error("Adapter call failed: {0}")]
    Adapter(String),

    #[error("Vault call failed: {0}")]
    Vault(String),

    #[error("Exchange call failed: {0}")]
    Exchange(String),

    #[error("Distributor call failed: {0}")]
    Distributor(String),

    #[error("Token ledger call failed: {0}")]
    Token(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this error is a caller-input validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidAddress(_)
                | Error::InvalidAmount(_)
                | Error::InvalidArrayLengths { .. }
        )
    }

    /// Check if this error was raised by an external collaborator
    pub fn is_collaborator(&self) -> bool {
        matches!(
            self,
            Error::Adapter(_)
                | Error::Vault(_)
                | Error::Exchange(_)
                | Error::Distributor(_)
                | Error::Token(_)
        )
    }
}
