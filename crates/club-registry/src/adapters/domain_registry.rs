//! In-Memory Domain Registry Adapter
//!
//! Implements `DomainRegistryClient` over scriptable in-memory state. Tests
//! register domains, flip statuses, transfer and burn tokens to walk the
//! registry through expiry/reregistration cycles.

use super::FailureSwitch;
use crate::domain::{BackendError, DomainStatus, NormalizedName};
use crate::ports::{DomainRegistryClient, DomainTokenInfo};
use async_trait::async_trait;
use club_types::{Address, TokenId};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone, Debug)]
struct DomainEntry {
    status: DomainStatus,
    token_id: TokenId,
    info: DomainTokenInfo,
}

/// Scriptable domain registry.
#[derive(Default)]
pub struct InMemoryDomainRegistry {
    domains: RwLock<HashMap<NormalizedName, DomainEntry>>,
    owners: RwLock<HashMap<TokenId, Address>>,
    failures: FailureSwitch,
}

impl InMemoryDomainRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain as Active with the given token and owner.
    pub fn register(&self, domain: &NormalizedName, token_id: TokenId, owner: Address) {
        self.domains.write().insert(
            domain.clone(),
            DomainEntry {
                status: DomainStatus::Active,
                token_id,
                info: DomainTokenInfo {
                    registered_at: 1_700_000_000,
                    expires_at: 1_700_000_000 + 365 * 86_400,
                    registrant: owner,
                },
            },
        );
        self.owners.write().insert(token_id, owner);
    }

    /// Overwrite a domain's lifecycle status.
    pub fn set_status(&self, domain: &NormalizedName, status: DomainStatus) {
        if let Some(entry) = self.domains.write().get_mut(domain) {
            entry.status = status;
        }
    }

    /// Rebind a domain to a fresh token (reregistration by a new owner).
    pub fn rebind(&self, domain: &NormalizedName, token_id: TokenId, owner: Address) {
        if let Some(entry) = self.domains.write().get_mut(domain) {
            entry.token_id = token_id;
            entry.status = DomainStatus::Active;
            entry.info.registrant = owner;
        }
        self.owners.write().insert(token_id, owner);
    }

    /// Hand a token to a new owner.
    pub fn transfer_token(&self, token_id: TokenId, new_owner: Address) {
        self.owners.write().insert(token_id, new_owner);
    }

    /// Destroy a token; subsequent `owner_of` calls fail.
    pub fn burn_token(&self, token_id: TokenId) {
        self.owners.write().remove(&token_id);
    }

    /// Make every future call to `method` fail until restored.
    pub fn fail_method(&self, method: &'static str) {
        self.failures.fail(method);
    }

    /// Clear a method's failure flag.
    pub fn restore_method(&self, method: &'static str) {
        self.failures.restore(method);
    }
}

#[async_trait]
impl DomainRegistryClient for InMemoryDomainRegistry {
    async fn status_of(&self, domain: &NormalizedName) -> Result<DomainStatus, BackendError> {
        self.failures.check("status_of")?;
        let status = self
            .domains
            .read()
            .get(domain)
            .map_or(DomainStatus::Available, |entry| entry.status);
        debug!("[mock-domains] status_of {domain} = {status:?}");
        Ok(status)
    }

    async fn token_info(&self, domain: &NormalizedName) -> Result<DomainTokenInfo, BackendError> {
        self.failures.check("token_info")?;
        self.domains
            .read()
            .get(domain)
            .map(|entry| entry.info)
            .ok_or_else(|| BackendError::Rejected(format!("unknown domain {domain}")))
    }

    async fn is_registered(&self, domain: &NormalizedName) -> Result<bool, BackendError> {
        self.failures.check("is_registered")?;
        Ok(self
            .domains
            .read()
            .get(domain)
            .is_some_and(|entry| entry.status != DomainStatus::Available))
    }

    async fn owner_of(&self, token_id: TokenId) -> Result<Address, BackendError> {
        self.failures.check("owner_of")?;
        self.owners
            .read()
            .get(&token_id)
            .copied()
            .ok_or_else(|| BackendError::Rejected(format!("token {token_id} does not exist")))
    }

    async fn token_id_of(&self, domain: &NormalizedName) -> Result<TokenId, BackendError> {
        self.failures.check("token_id_of")?;
        Ok(self
            .domains
            .read()
            .get(domain)
            .map_or(0, |entry| entry.token_id))
    }
}
