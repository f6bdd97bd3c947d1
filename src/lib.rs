//! Custodial Reward Treasury Library
//!
//! Collects reward-token balances accrued by yield adapter positions,
//! converts them into a target vault's base asset through an exchange
//! collaborator, forwards the proceeds, and relays batched reward claims
//! from a distributor collaborator. Operated by a small set of privileged
//! callers; must never lose, double-spend, or misattribute custodied funds.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod events;
pub mod guard;
pub mod treasury;
pub mod types;

// Re-export commonly used types
pub use auth::RoleKind;
pub use config::TreasuryConfig;
pub use error::{Error, Result};
pub use events::{EventEnvelope, TreasuryEvent};
pub use treasury::{SkimOutcome, Treasury};
pub use types::Address;
