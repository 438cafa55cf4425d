//! In-Memory Membership Ledger Adapters
//!
//! Scriptable implementations of the three membership back-ends. Each keeps
//! its own bookkeeping behind `parking_lot::RwLock` and exposes a per-method
//! failure switch, so tests can drive both the happy paths and the
//! degradation behavior of the registry and resolver.

use super::FailureSwitch;
use crate::domain::{BackendError, NormalizedName};
use crate::ports::{
    PassCardQuery, PermanentMembershipLedger, TemporaryMembershipLedger, TokenAccessLedger,
    TokenGateDetails,
};
use async_trait::async_trait;
use club_types::{full_hex, Address, Timestamp};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Derive a deterministic per-club contract address from the club name.
fn derive_address(domain: &NormalizedName, salt: u8) -> Address {
    let mut addr = [salt; 20];
    for (i, b) in domain.as_str().bytes().enumerate() {
        addr[i % 20] ^= b;
    }
    addr
}

// =============================================================================
// Permanent pass-card ledger
// =============================================================================

/// Scriptable permanent-membership factory and ledger.
pub struct InMemoryPermanentLedger {
    factory_address: Address,
    /// When set, `create_for_club` serves clubs from the shared ledger and
    /// returns the factory's own address instead of deploying.
    shared_mode: RwLock<bool>,
    created: RwLock<HashMap<NormalizedName, Address>>,
    holders: RwLock<HashMap<NormalizedName, Vec<Address>>>,
    failures: FailureSwitch,
}

impl InMemoryPermanentLedger {
    /// Create a factory at the given address.
    #[must_use]
    pub fn new(factory_address: Address) -> Self {
        Self {
            factory_address,
            shared_mode: RwLock::new(false),
            created: RwLock::new(HashMap::new()),
            holders: RwLock::new(HashMap::new()),
            failures: FailureSwitch::default(),
        }
    }

    /// Switch between per-club deployment and the factory-shared ledger.
    pub fn set_shared_mode(&self, shared: bool) {
        *self.shared_mode.write() = shared;
    }

    /// Grant a pass card directly (back-door for tests).
    pub fn grant(&self, domain: &NormalizedName, user: Address) {
        let mut holders = self.holders.write();
        let list = holders.entry(domain.clone()).or_default();
        if !list.contains(&user) {
            list.push(user);
        }
    }

    /// Pass-card contract created for a club, if any.
    #[must_use]
    pub fn created_for(&self, domain: &NormalizedName) -> Option<Address> {
        self.created.read().get(domain).copied()
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
impl PermanentMembershipLedger for InMemoryPermanentLedger {
    async fn create_for_club(
        &self,
        domain: &NormalizedName,
        admin: Address,
        name: &str,
        _symbol: &str,
        _base_uri: &str,
    ) -> Result<Address, BackendError> {
        self.failures.check("create_for_club")?;
        debug!("[mock-permanent] create_for_club {domain} ({name}) admin {}", full_hex(&admin));
        let address = if *self.shared_mode.read() {
            self.factory_address
        } else {
            derive_address(domain, 0x50)
        };
        self.created.write().insert(domain.clone(), address);
        Ok(address)
    }

    async fn query_membership(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<PassCardQuery, BackendError> {
        self.failures.check("query_membership")?;
        let holders = self.holders.read();
        let list = holders.get(domain);
        let position = list.and_then(|l| l.iter().position(|a| *a == user));
        Ok(PassCardQuery {
            is_member: position.is_some(),
            is_active: position.is_some(),
            token_id: position.map_or(0, |p| p as u64 + 1),
            member_count: list.map_or(0, |l| l.len() as u64),
        })
    }

    async fn has_membership(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError> {
        self.failures.check("has_membership")?;
        Ok(self
            .holders
            .read()
            .get(domain)
            .is_some_and(|list| list.contains(&user)))
    }

    async fn update_admin(
        &self,
        domain: &NormalizedName,
        new_admin: Address,
    ) -> Result<(), BackendError> {
        self.failures.check("update_admin")?;
        debug!("[mock-permanent] update_admin {domain} -> {}", full_hex(&new_admin));
        Ok(())
    }
}

// =============================================================================
// Temporary membership ledger
// =============================================================================

/// Scriptable time-boxed membership ledger with an adjustable clock.
pub struct InMemoryTemporaryLedger {
    now: RwLock<Timestamp>,
    initialized: RwLock<HashSet<NormalizedName>>,
    expiries: RwLock<HashMap<(NormalizedName, Address), Timestamp>>,
    prices: RwLock<HashMap<NormalizedName, (u128, u128, u128)>>,
    failures: FailureSwitch,
}

impl InMemoryTemporaryLedger {
    /// Create a ledger whose clock reads `now`.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: RwLock::new(now),
            initialized: RwLock::new(HashSet::new()),
            expiries: RwLock::new(HashMap::new()),
            prices: RwLock::new(HashMap::new()),
            failures: FailureSwitch::default(),
        }
    }

    /// Advance (or rewind) the ledger's clock.
    pub fn set_now(&self, now: Timestamp) {
        *self.now.write() = now;
    }

    /// Sell a membership expiring at `expiry` (back-door for tests).
    pub fn sell(&self, domain: &NormalizedName, user: Address, expiry: Timestamp) {
        self.expiries.write().insert((domain.clone(), user), expiry);
    }

    /// Configure the three price tiers for a club.
    pub fn set_prices(&self, domain: &NormalizedName, monthly: u128, quarterly: u128, yearly: u128) {
        self.prices
            .write()
            .insert(domain.clone(), (monthly, quarterly, yearly));
    }

    /// Whether the club is currently initialized.
    #[must_use]
    pub fn is_initialized(&self, domain: &NormalizedName) -> bool {
        self.initialized.read().contains(domain)
    }

    /// Make every future call to `method` fail until restored.
    pub fn fail_method(&self, method: &'static str) {
        self.failures.fail(method);
    }

    /// Clear a method's failure flag.
    pub fn restore_method(&self, method: &'static str) {
        self.failures.restore(method);
    }

    fn price_of(&self, domain: &NormalizedName) -> (u128, u128, u128) {
        self.prices.read().get(domain).copied().unwrap_or((0, 0, 0))
    }
}

#[async_trait]
impl TemporaryMembershipLedger for InMemoryTemporaryLedger {
    async fn initialize_club(
        &self,
        domain: &NormalizedName,
        admin: Address,
    ) -> Result<(), BackendError> {
        self.failures.check("initialize_club")?;
        debug!("[mock-temporary] initialize_club {domain} admin {}", full_hex(&admin));
        self.initialized.write().insert(domain.clone());
        Ok(())
    }

    async fn uninitialize_club(&self, domain: &NormalizedName) -> Result<(), BackendError> {
        self.failures.check("uninitialize_club")?;
        debug!("[mock-temporary] uninitialize_club {domain}");
        self.initialized.write().remove(domain);
        Ok(())
    }

    async fn update_club_admin(
        &self,
        domain: &NormalizedName,
        new_admin: Address,
    ) -> Result<(), BackendError> {
        self.failures.check("update_club_admin")?;
        debug!("[mock-temporary] update_club_admin {domain} -> {}", full_hex(&new_admin));
        Ok(())
    }

    async fn is_membership_active(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError> {
        self.failures.check("is_membership_active")?;
        let now = *self.now.read();
        Ok(self
            .expiries
            .read()
            .get(&(domain.clone(), user))
            .is_some_and(|expiry| *expiry > now))
    }

    async fn has_membership(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError> {
        self.failures.check("has_membership")?;
        Ok(self.expiries.read().contains_key(&(domain.clone(), user)))
    }

    async fn membership_expiry(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<Timestamp, BackendError> {
        self.failures.check("membership_expiry")?;
        Ok(self
            .expiries
            .read()
            .get(&(domain.clone(), user))
            .copied()
            .unwrap_or(0))
    }

    async fn monthly_price(&self, domain: &NormalizedName) -> Result<u128, BackendError> {
        self.failures.check("monthly_price")?;
        Ok(self.price_of(domain).0)
    }

    async fn quarterly_price(&self, domain: &NormalizedName) -> Result<u128, BackendError> {
        self.failures.check("quarterly_price")?;
        Ok(self.price_of(domain).1)
    }

    async fn yearly_price(&self, domain: &NormalizedName) -> Result<u128, BackendError> {
        self.failures.check("yearly_price")?;
        Ok(self.price_of(domain).2)
    }
}

// =============================================================================
// Token-access ledger
// =============================================================================

/// Scriptable token-gating ledger.
pub struct InMemoryTokenAccessLedger {
    initialized: RwLock<HashSet<NormalizedName>>,
    gates: RwLock<HashMap<NormalizedName, Vec<TokenGateDetails>>>,
    qualifying: RwLock<HashSet<(NormalizedName, Address)>>,
    /// Gate indexes whose detail fetch fails, per the partial-results path.
    failing_gates: RwLock<HashSet<u64>>,
    failures: FailureSwitch,
}

impl InMemoryTokenAccessLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initialized: RwLock::new(HashSet::new()),
            gates: RwLock::new(HashMap::new()),
            qualifying: RwLock::new(HashSet::new()),
            failing_gates: RwLock::new(HashSet::new()),
            failures: FailureSwitch::default(),
        }
    }

    /// Append a gate to a club's requirement list.
    pub fn add_gate(&self, domain: &NormalizedName, gate: TokenGateDetails) {
        self.gates.write().entry(domain.clone()).or_default().push(gate);
    }

    /// Script whether a user's holdings satisfy the club's gates.
    pub fn set_qualifies(&self, domain: &NormalizedName, user: Address, qualifies: bool) {
        let key = (domain.clone(), user);
        if qualifies {
            self.qualifying.write().insert(key);
        } else {
            self.qualifying.write().remove(&key);
        }
    }

    /// Make the detail fetch for one gate index fail.
    pub fn fail_gate(&self, index: u64) {
        self.failing_gates.write().insert(index);
    }

    /// Whether the club is currently initialized.
    #[must_use]
    pub fn is_initialized(&self, domain: &NormalizedName) -> bool {
        self.initialized.read().contains(domain)
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

impl Default for InMemoryTokenAccessLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenAccessLedger for InMemoryTokenAccessLedger {
    async fn initialize_club(
        &self,
        domain: &NormalizedName,
        admin: Address,
    ) -> Result<(), BackendError> {
        self.failures.check("initialize_club")?;
        debug!("[mock-token] initialize_club {domain} admin {}", full_hex(&admin));
        self.initialized.write().insert(domain.clone());
        Ok(())
    }

    async fn uninitialize_club(&self, domain: &NormalizedName) -> Result<(), BackendError> {
        self.failures.check("uninitialize_club")?;
        self.initialized.write().remove(domain);
        Ok(())
    }

    async fn update_club_admin(
        &self,
        domain: &NormalizedName,
        new_admin: Address,
    ) -> Result<(), BackendError> {
        self.failures.check("update_club_admin")?;
        debug!("[mock-token] update_club_admin {domain} -> {}", full_hex(&new_admin));
        Ok(())
    }

    async fn has_active_membership(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError> {
        self.failures.check("has_active_membership")?;
        Ok(self.qualifying.read().contains(&(domain.clone(), user)))
    }

    async fn check_and_update_access(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError> {
        self.failures.check("check_and_update_access")?;
        // The in-memory ledger has no balances to re-check; the scripted
        // qualification is already current.
        Ok(self.qualifying.read().contains(&(domain.clone(), user)))
    }

    async fn token_gate_count(&self, domain: &NormalizedName) -> Result<u64, BackendError> {
        self.failures.check("token_gate_count")?;
        Ok(self.gates.read().get(domain).map_or(0, |g| g.len() as u64))
    }

    async fn token_gate_details(
        &self,
        domain: &NormalizedName,
        index: u64,
    ) -> Result<TokenGateDetails, BackendError> {
        self.failures.check("token_gate_details")?;
        if self.failing_gates.read().contains(&index) {
            return Err(BackendError::MalformedResponse(format!(
                "gate {index} details unavailable"
            )));
        }
        self.gates
            .read()
            .get(domain)
            .and_then(|g| g.get(index as usize))
            .cloned()
            .ok_or_else(|| BackendError::Rejected(format!("no gate {index} for {domain}")))
    }
}
