//! Role-based authorization
//!
//! Two privilege levels: administrators configure collaborators, manage
//! roles, and rescue stranded funds; operators trigger the day-to-day skim
//! and claim workflows. The administrator role is self-administering - an
//! administrator can grant or revoke any role, including more administrators.
//!
//! Revoking the last remaining administrator would leave the treasury
//! permanently unmanageable, so that specific revocation is refused.

use std::fmt;
use std::sync::Mutex;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Address;

/// The two privilege levels recognized by the treasury
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// Configures collaborators, manages roles, rescues stranded funds
    Administrator,
    /// Triggers skim and claim workflows
    Operator,
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleKind::Administrator => write!(f, "administrator"),
            RoleKind::Operator => write!(f, "operator"),
        }
    }
}

#[derive(Debug, Default)]
struct RoleSet {
    administrator: bool,
    operator: bool,
}

/// Principal -> role-set table
#[derive(Debug)]
pub struct RoleRegistry {
    roles: DashMap<Address, RoleSet>,
    // Serializes administrator revocations: the last-administrator count
    // check and the flag clear must be atomic with respect to each other,
    // and DashMap's per-entry locks cannot give us that across entries.
    admin_revocation: Mutex<()>,
}

impl RoleRegistry {
    /// Create a registry seeded with a single administrator.
    ///
    /// Fails with `InvalidAddress` if the seed administrator is the zero
    /// address; the treasury must never start unmanageable.
    pub fn new(admin: Address) -> Result<Self> {
        if admin.is_zero() {
            return Err(Error::InvalidAddress(
                "initial administrator cannot be the zero address".to_string(),
            ));
        }
        let registry = Self {
            roles: DashMap::new(),
            admin_revocation: Mutex::new(()),
        };
        registry.roles.entry(admin).or_default().administrator = true;
        Ok(registry)
    }

    /// Pure lookup, no side effects
    pub fn has_role(&self, role: RoleKind, principal: Address) -> bool {
        self.roles
            .get(&principal)
            .map(|set| match role {
                RoleKind::Administrator => set.administrator,
                RoleKind::Operator => set.operator,
            })
            .unwrap_or(false)
    }

    /// Fail with `Unauthorized` unless the principal holds the role
    pub fn require(&self, role: RoleKind, principal: Address) -> Result<()> {
        if self.has_role(role, principal) {
            Ok(())
        } else {
            Err(Error::Unauthorized { role, principal })
        }
    }

    /// Grant a role. Returns true if the assignment actually changed.
    pub fn grant(&self, role: RoleKind, principal: Address) -> Result<bool> {
        if principal.is_zero() {
            return Err(Error::InvalidAddress(
                "cannot grant a role to the zero address".to_string(),
            ));
        }
        let mut entry = self.roles.entry(principal).or_default();
        let changed = match role {
            RoleKind::Administrator => !std::mem::replace(&mut entry.administrator, true),
            RoleKind::Operator => !std::mem::replace(&mut entry.operator, true),
        };
        Ok(changed)
    }

    /// Revoke a role. Returns true if the assignment actually changed.
    ///
    /// Refuses to revoke the administrator role from the last remaining
    /// administrator.
    pub fn revoke(&self, role: RoleKind, principal: Address) -> Result<bool> {
        // Administrator revocations run one at a time: with only per-entry
        // locking, two concurrent revokes of the two remaining
        // administrators would each observe a count of 2 and both succeed.
        let _serial = match role {
            RoleKind::Administrator => Some(
                self.admin_revocation
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner),
            ),
            RoleKind::Operator => None,
        };

        if !self.has_role(role, principal) {
            return Ok(false);
        }
        if role == RoleKind::Administrator && self.administrator_count() <= 1 {
            return Err(Error::LastAdministrator);
        }
        if let Some(mut entry) = self.roles.get_mut(&principal) {
            match role {
                RoleKind::Administrator => entry.administrator = false,
                RoleKind::Operator => entry.operator = false,
            }
        }
        Ok(true)
    }

    /// Number of principals currently holding the administrator role
    pub fn administrator_count(&self) -> usize {
        self.roles
            .iter()
            .filter(|entry| entry.value().administrator)
            .count()
    }
}
