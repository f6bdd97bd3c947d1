//! Reentrancy guard for the privileged workflows
//!
//! The skim and claim workflows hold intermediate balance snapshots across
//! external call boundaries. A collaborator that calls back into the treasury
//! mid-flight could exploit those snapshots, so at most one guarded operation
//! may be on the call stack at any time. Re-entry fails immediately with
//! `Error::Reentrant` before any workflow logic runs.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

/// Process-wide single-flight lock over the guarded workflows.
///
/// One instance per treasury covers both `skim` and `claim`.
#[derive(Debug, Default)]
pub struct ExecutionLock {
    held: AtomicBool,
}

impl ExecutionLock {
    pub fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }

    /// Acquire the lock, failing with `Reentrant` if it is already held.
    ///
    /// The returned guard releases the lock on drop, on every exit path.
    pub fn enter(&self) -> Result<ExecutionGuard<'_>> {
        if self
            .held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::Reentrant);
        }
        Ok(ExecutionGuard { lock: self })
    }

    /// True while a guarded operation is on the call stack
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// RAII handle that releases the execution lock when dropped
#[derive(Debug)]
pub struct ExecutionGuard<'a> {
    lock: &'a ExecutionLock,
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        self.lock.held.store(false, Ordering::Release);
    }
}
