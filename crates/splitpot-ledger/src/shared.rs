//! Coarse-grained lock for multi-threaded hosts.
//!
//! The ledger itself is a sequential state machine. A host that calls it
//! from several threads wraps the instance in a [`SharedLedger`]: one lock
//! per ledger, held for exactly one operation.

use std::sync::{Arc, Mutex, MutexGuard};

use splitpot_types::{Result, SplitPotError};

use crate::ledger::Ledger;

/// Cloneable handle to one ledger behind one mutex.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    #[must_use]
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run a read against the ledger.
    ///
    /// # Errors
    /// Returns `Internal` if the lock is poisoned.
    pub fn with<R>(&self, f: impl FnOnce(&Ledger) -> R) -> Result<R> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    /// Run one mutating operation with the lock held throughout.
    ///
    /// # Errors
    /// Returns the operation's own error, or `Internal` if the lock is
    /// poisoned.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Ledger) -> Result<R>) -> Result<R> {
        let mut guard = self.lock()?;
        f(&mut guard)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Ledger>> {
        self.inner
            .lock()
            .map_err(|_| SplitPotError::Internal("ledger lock poisoned".into()))
    }
}
