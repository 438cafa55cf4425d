//! # Adapters Module
//!
//! In-memory, scriptable implementations of the outbound ports. They back
//! the unit and integration tests and double as the reference for what a
//! production RPC adapter must provide: every method can be told to fail so
//! the swallow-vs-propagate boundary is exercisable.

pub mod domain_registry;
pub mod membership_ledgers;

pub use domain_registry::InMemoryDomainRegistry;
pub use membership_ledgers::{
    InMemoryPermanentLedger, InMemoryTemporaryLedger, InMemoryTokenAccessLedger,
};

use crate::domain::BackendError;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Per-method failure switch shared by the in-memory adapters.
#[derive(Debug, Default)]
pub(crate) struct FailureSwitch {
    failing: RwLock<HashSet<&'static str>>,
}

impl FailureSwitch {
    /// Make every future call to `method` fail until cleared.
    pub(crate) fn fail(&self, method: &'static str) {
        self.failing.write().insert(method);
    }

    /// Clear a single method's failure flag.
    pub(crate) fn restore(&self, method: &'static str) {
        self.failing.write().remove(method);
    }

    /// Fail the call if the method is switched off.
    pub(crate) fn check(&self, method: &'static str) -> Result<(), BackendError> {
        if self.failing.read().contains(method) {
            return Err(BackendError::Unreachable(format!(
                "{method} switched off for test"
            )));
        }
        Ok(())
    }
}
