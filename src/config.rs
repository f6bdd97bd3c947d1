//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::error::Error;
use crate::types::Address;

fn default_event_capacity() -> usize {
    256
}

/// Treasury configuration
///
/// Construction-time invariants live in [`TreasuryConfig::validate`]: the
/// treasury's own address, the initial administrator, and both collaborator
/// references must be non-zero.
#[derive(Debug, Clone, Deserialize)]
pub struct TreasuryConfig {
    /// Address this treasury module custodies balances under
    pub address: Address,

    /// Initial administrator (self-administering; can appoint more)
    pub admin: Address,

    /// Exchange collaborator used for reward-token conversion
    pub exchange: Address,

    /// Distributor collaborator used for batched reward claims
    pub distributor: Address,

    /// Capacity of the event broadcast channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl TreasuryConfig {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            .set_default("event_capacity", default_event_capacity() as i64)?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix TREASURY_)
            .add_source(
                config::Environment::with_prefix("TREASURY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: TreasuryConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), Error> {
        if self.address.is_zero() {
            return Err(Error::InvalidAddress(
                "treasury address cannot be zero".to_string(),
            ));
        }
        if self.admin.is_zero() {
            return Err(Error::InvalidAddress(
                "admin address cannot be zero".to_string(),
            ));
        }
        if self.exchange.is_zero() {
            return Err(Error::InvalidAddress(
                "exchange address cannot be zero".to_string(),
            ));
        }
        if self.distributor.is_zero() {
            return Err(Error::InvalidAddress(
                "distributor address cannot be zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get configuration summary for display
    pub fn summary(&self) -> String {
        format!(
            r#"Configuration:
  Treasury:
    address: {}
    admin: {}
  Collaborators:
    exchange: {}
    distributor: {}
  Events:
    capacity: {}
"#,
            self.address, self.admin, self.exchange, self.distributor, self.event_capacity,
        )
    }
}
