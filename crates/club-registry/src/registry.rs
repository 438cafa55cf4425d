//! # Club Registry Orchestrator
//!
//! Owns every club record, the membership ledger, and the domain-transition
//! state machine. Collaborators are reached through the outbound ports; which
//! of their failures are absorbed and which abort the operation follows the
//! per-operation reliability boundary described in the crate docs.
//!
//! Mutating operations take `&mut self` (single-writer semantics). Every
//! collaborator call an operation needs is completed before the first state
//! mutation, so a failing nested call can never observe or leave a
//! half-updated record.

use crate::domain::{
    normalizer, Club, ClubError, DomainTransition, InheritancePolicy, InitStage, MembershipLedger,
    NormalizedName, TransitionStatus,
};
use crate::events::{ClubEvent, ClubEventKind};
use crate::ports::{
    ClubDirectory, ClubRegistryApi, DomainRegistryClient, PermanentMembershipLedger,
    TemporaryMembershipLedger, TokenAccessLedger,
};
use async_trait::async_trait;
use club_types::{is_zero, short_hex, Address, Timestamp, TokenId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Metadata applied to every pass-card contract the registry creates.
const PASS_CARD_SYMBOL: &str = "PASS";
/// Base URI prefix for pass-card metadata.
const PASS_CARD_URI_PREFIX: &str = "https://meta.web3.club/";

/// Addresses of the deployed collaborator contracts.
///
/// This is the explicit configuration record: the registry consults it for
/// caller authorization (`update_membership`) and surfaces changes through
/// [`ClubEventKind::ContractsUpdated`]. It is mutated only through the
/// owner-gated setters, never ambiently.
#[derive(Clone, Copy, Debug)]
pub struct ContractConfig {
    /// Domain-registry contract.
    pub registry_contract: Address,
    /// Identity-token (NFT) contract.
    pub nft_contract: Address,
    /// Permanent pass-card factory.
    pub permanent_factory: Address,
    /// Temporary-membership ledger.
    pub temporary: Address,
    /// Token-access ledger.
    pub token_access: Address,
}

/// Live handles to the collaborator implementations.
#[derive(Clone)]
pub struct Collaborators {
    /// Ownership and expiry source of truth.
    pub domains: Arc<dyn DomainRegistryClient>,
    /// Permanent pass-card ledger/factory.
    pub permanent: Arc<dyn PermanentMembershipLedger>,
    /// Time-boxed paid membership ledger.
    pub temporary: Arc<dyn TemporaryMembershipLedger>,
    /// Token-holding gate ledger.
    pub token_access: Arc<dyn TokenAccessLedger>,
}

/// The membership registry core.
pub struct ClubRegistry {
    owner: Address,
    contracts: ContractConfig,
    collaborators: Collaborators,
    clubs: HashMap<NormalizedName, Club>,
    ledger: MembershipLedger,
    transitions: HashMap<NormalizedName, DomainTransition>,
    token_index: HashMap<TokenId, NormalizedName>,
    default_policy: InheritancePolicy,
    user_policies: HashMap<Address, InheritancePolicy>,
    events: Vec<ClubEvent>,
}

impl ClubRegistry {
    /// Create a registry with the given owner, contract addresses, and
    /// collaborator handles.
    pub fn new(owner: Address, contracts: ContractConfig, collaborators: Collaborators) -> Self {
        Self {
            owner,
            contracts,
            collaborators,
            clubs: HashMap::new(),
            ledger: MembershipLedger::new(),
            transitions: HashMap::new(),
            token_index: HashMap::new(),
            default_policy: InheritancePolicy::default(),
            user_policies: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Registry owner address.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Current contract configuration.
    #[must_use]
    pub fn contracts(&self) -> &ContractConfig {
        &self.contracts
    }

    /// Collaborator handles (cloneable Arcs; the resolver shares them).
    #[must_use]
    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Events emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ClubEvent] {
        &self.events
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<ClubEvent> {
        std::mem::take(&mut self.events)
    }

    /// Transition record for a domain, if any cycle ever started.
    #[must_use]
    pub fn transition_of(&self, domain: &str) -> Option<&DomainTransition> {
        let name = normalizer::normalize(domain);
        self.transitions.get(&name)
    }

    /// Owner-gated: replace the three membership back-end addresses.
    pub fn update_membership_contracts(
        &mut self,
        permanent_factory: Address,
        temporary: Address,
        token_access: Address,
        caller: Address,
    ) -> Result<(), ClubError> {
        self.require_owner(caller)?;
        for addr in [&permanent_factory, &temporary, &token_access] {
            if is_zero(addr) {
                return Err(ClubError::ZeroAddress);
            }
        }
        self.contracts.permanent_factory = permanent_factory;
        self.contracts.temporary = temporary;
        self.contracts.token_access = token_access;
        for (field, address) in [
            ("permanent_factory", permanent_factory),
            ("temporary", temporary),
            ("token_access", token_access),
        ] {
            self.emit(ClubEventKind::ContractsUpdated {
                field: field.to_owned(),
                address,
            });
        }
        Ok(())
    }

    /// Owner-gated: replace the domain-registry contract address.
    pub fn set_registry_contract(
        &mut self,
        address: Address,
        caller: Address,
    ) -> Result<(), ClubError> {
        self.require_owner(caller)?;
        if is_zero(&address) {
            return Err(ClubError::ZeroAddress);
        }
        self.contracts.registry_contract = address;
        self.emit(ClubEventKind::ContractsUpdated {
            field: "registry_contract".to_owned(),
            address,
        });
        Ok(())
    }

    /// Owner-gated: replace the identity-token contract address.
    pub fn set_nft_contract(&mut self, address: Address, caller: Address) -> Result<(), ClubError> {
        self.require_owner(caller)?;
        if is_zero(&address) {
            return Err(ClubError::ZeroAddress);
        }
        self.contracts.nft_contract = address;
        self.emit(ClubEventKind::ContractsUpdated {
            field: "nft_contract".to_owned(),
            address,
        });
        Ok(())
    }

    /// Owner-gated: change the global default inheritance policy.
    pub fn set_default_inheritance_policy(
        &mut self,
        policy: InheritancePolicy,
        caller: Address,
    ) -> Result<(), ClubError> {
        self.require_owner(caller)?;
        self.default_policy = policy;
        Ok(())
    }

    fn require_owner(&self, caller: Address) -> Result<(), ClubError> {
        if caller != self.owner {
            return Err(ClubError::NotAuthorized);
        }
        Ok(())
    }

    fn emit(&mut self, kind: ClubEventKind) {
        info!("[club-registry] event: {kind:?}");
        self.events.push(ClubEvent::new(kind));
    }

    /// Whether the caller owns the given identity token. Lookup failures on
    /// this authorization read are absorbed: "cannot verify" means "not the
    /// owner", never an error surfaced to the caller.
    async fn is_token_owner(&self, token_id: TokenId, caller: Address) -> bool {
        match self.collaborators.domains.owner_of(token_id).await {
            Ok(owner) => owner == caller,
            Err(err) => {
                debug!("[club-registry] owner lookup for token {token_id} failed: {err}");
                false
            }
        }
    }

    /// Fan an admin change out to the three back-ends (best-effort, failures
    /// logged and swallowed), then apply the authoritative registry
    /// bookkeeping and emit.
    async fn apply_admin_transfer(
        &mut self,
        name: &NormalizedName,
        new_admin: Address,
        now: Timestamp,
    ) {
        if let Err(err) = self
            .collaborators
            .permanent
            .update_admin(name, new_admin)
            .await
        {
            warn!("[club-registry] {name}: permanent-ledger admin update failed: {err}");
        }
        if let Err(err) = self
            .collaborators
            .temporary
            .update_club_admin(name, new_admin)
            .await
        {
            warn!("[club-registry] {name}: temporary-ledger admin update failed: {err}");
        }
        if let Err(err) = self
            .collaborators
            .token_access
            .update_club_admin(name, new_admin)
            .await
        {
            warn!("[club-registry] {name}: token-ledger admin update failed: {err}");
        }

        if let Some(club) = self.clubs.get_mut(name) {
            let from = club.admin;
            club.record_admin_transfer(new_admin, now);
            self.emit(ClubEventKind::AdminTransferred {
                domain: name.clone(),
                from,
                to: new_admin,
                at: now,
            });
        }
    }

    /// Record a member in the ledger and the club counter, emitting when the
    /// user is new. No-op when already recorded.
    fn enroll(&mut self, name: &NormalizedName, user: Address) {
        if !self.ledger.record(name, user) {
            return;
        }
        let count = self.ledger.member_count(name);
        if let Some(club) = self.clubs.get_mut(name) {
            club.member_count = count;
        }
        self.emit(ClubEventKind::MemberAdded {
            domain: name.clone(),
            user,
            member_count: count,
        });
    }

    /// The ordered back-end initialization for `create_club`.
    ///
    /// Returns the created pass-card address on full success. On a
    /// later-stage failure the reversible prior stages are rolled back
    /// best-effort; the pass-card contract cannot be destroyed, so its
    /// orphaning is surfaced via `IrreversibleStepCommitted` for manual
    /// reconciliation.
    async fn initialize_backends(
        &mut self,
        name: &NormalizedName,
        admin: Address,
    ) -> Result<Address, ClubError> {
        let display = format!("{name} Pass");
        let base_uri = format!("{PASS_CARD_URI_PREFIX}{name}/");

        let pass_card = self
            .collaborators
            .permanent
            .create_for_club(name, admin, &display, PASS_CARD_SYMBOL, &base_uri)
            .await
            .map_err(|err| ClubError::InitializationFailed {
                stage: InitStage::PermanentPass,
                reason: err.to_string(),
            })?;

        if let Err(err) = self
            .collaborators
            .temporary
            .initialize_club(name, admin)
            .await
        {
            self.emit(ClubEventKind::IrreversibleStepCommitted {
                domain: name.clone(),
                stage: InitStage::PermanentPass,
                address: pass_card,
            });
            return Err(ClubError::InitializationFailed {
                stage: InitStage::Temporary,
                reason: err.to_string(),
            });
        }

        if let Err(err) = self
            .collaborators
            .token_access
            .initialize_club(name, admin)
            .await
        {
            if let Err(undo_err) = self.collaborators.temporary.uninitialize_club(name).await {
                warn!("[club-registry] {name}: temporary-ledger rollback failed: {undo_err}");
            }
            self.emit(ClubEventKind::IrreversibleStepCommitted {
                domain: name.clone(),
                stage: InitStage::PermanentPass,
                address: pass_card,
            });
            return Err(ClubError::InitializationFailed {
                stage: InitStage::TokenAccess,
                reason: err.to_string(),
            });
        }

        Ok(pass_card)
    }
}

#[async_trait]
impl ClubRegistryApi for ClubRegistry {
    async fn create_club(
        &mut self,
        domain: &str,
        caller: Address,
        now: Timestamp,
    ) -> Result<(), ClubError> {
        let name = normalizer::require_valid(domain)?;
        debug!(
            "[club-registry] create_club {name} by {}",
            short_hex(&caller)
        );

        if self.clubs.contains_key(&name) {
            return Err(ClubError::ClubAlreadyExists {
                domain: name.to_string(),
            });
        }

        // Domain-status resolution propagates hard: creating a club against
        // an unknown status would corrupt the binding invariants.
        let status = self.collaborators.domains.status_of(&name).await?;
        if status.is_expired() {
            return Err(ClubError::DomainExpired { status });
        }
        if status != crate::domain::DomainStatus::Active {
            return Err(ClubError::DomainNotActive { status });
        }

        let token_id = self.collaborators.domains.token_id_of(&name).await?;
        if token_id == 0 {
            return Err(ClubError::DomainNotActive { status });
        }
        if let Some(bound) = self.token_index.get(&token_id) {
            return Err(ClubError::DomainAlreadyHasClub {
                domain: bound.to_string(),
            });
        }

        let owner = self.collaborators.domains.owner_of(token_id).await?;
        if owner != caller {
            return Err(ClubError::NotDomainOwner);
        }

        let created = self.initialize_backends(&name, caller).await?;
        // The factory may serve the club from its shared ledger instead of
        // deploying a dedicated contract; it signals that by returning its
        // own address.
        let pass_card = if created == self.contracts.permanent_factory {
            None
        } else {
            Some(created)
        };

        // All collaborator calls done; mutate.
        let club = Club::new(name.clone(), token_id, caller, pass_card, now);
        self.clubs.insert(name.clone(), club);
        self.token_index.insert(token_id, name.clone());
        self.emit(ClubEventKind::ClubCreated {
            domain: name.clone(),
            token_id,
            admin: caller,
            pass_card,
            at: now,
        });
        self.enroll(&name, caller);
        Ok(())
    }

    async fn transfer_admin(
        &mut self,
        domain: &str,
        new_admin: Address,
        caller: Address,
        now: Timestamp,
    ) -> Result<(), ClubError> {
        let name = normalizer::require_valid(domain)?;
        if is_zero(&new_admin) {
            return Err(ClubError::ZeroAddress);
        }

        let (admin, token_id) = {
            let club = self
                .clubs
                .get(&name)
                .ok_or_else(|| ClubError::ClubNotInitialized {
                    domain: name.to_string(),
                })?;
            (club.admin, club.token_id)
        };

        if caller != admin && !self.is_token_owner(token_id, caller).await {
            return Err(ClubError::NotAdmin);
        }

        self.apply_admin_transfer(&name, new_admin, now).await;
        Ok(())
    }

    fn set_active(
        &mut self,
        domain: &str,
        active: bool,
        caller: Address,
    ) -> Result<(), ClubError> {
        let name = normalizer::require_valid(domain)?;
        let club = self
            .clubs
            .get_mut(&name)
            .ok_or_else(|| ClubError::ClubNotInitialized {
                domain: name.to_string(),
            })?;
        if caller != club.admin {
            return Err(ClubError::NotAdmin);
        }
        club.active = active;
        self.emit(ClubEventKind::ActiveToggled {
            domain: name,
            active,
        });
        Ok(())
    }

    fn update_membership(
        &mut self,
        user: Address,
        domain: &str,
        status: bool,
        caller: Address,
    ) -> Result<(), ClubError> {
        let name = normalizer::require_valid(domain)?;
        let pass_card = {
            let club = self
                .clubs
                .get(&name)
                .ok_or_else(|| ClubError::ClubNotInitialized {
                    domain: name.to_string(),
                })?;
            club.pass_card
        };

        let authorized = caller == self.owner
            || caller == self.contracts.permanent_factory
            || caller == self.contracts.temporary
            || caller == self.contracts.token_access
            || pass_card == Some(caller);
        if !authorized {
            return Err(ClubError::NotAuthorized);
        }

        // Membership is monotonically additive: a revocation request is
        // accepted and ignored.
        if !status {
            debug!("[club-registry] {name}: ignoring membership revocation for {}",
                short_hex(&user));
            return Ok(());
        }

        self.enroll(&name, user);
        Ok(())
    }

    async fn handle_domain_expiry(
        &mut self,
        domain: &str,
        now: Timestamp,
    ) -> Result<(), ClubError> {
        let name = normalizer::require_valid(domain)?;
        let (prev_admin, prior_token_id) = {
            let club = self
                .clubs
                .get(&name)
                .ok_or_else(|| ClubError::ClubNotInitialized {
                    domain: name.to_string(),
                })?;
            (club.admin, club.token_id)
        };

        // Status resolution propagates hard; deactivating a live club on an
        // unverified report is worse than failing the call.
        let status = self.collaborators.domains.status_of(&name).await?;
        if !status.is_expired() {
            return Err(ClubError::DomainNotExpired { status });
        }

        // A token that no longer resolves to an owner was burned with the
        // registration.
        let nft_destroyed = self
            .collaborators
            .domains
            .owner_of(prior_token_id)
            .await
            .is_err();

        // Re-invocation while Pending overwrites the snapshot; expiry
        // detection is externally triggered and may fire more than once.
        self.transitions.insert(
            name.clone(),
            DomainTransition::pending(prev_admin, prior_token_id, nft_destroyed, now),
        );
        if let Some(club) = self.clubs.get_mut(&name) {
            club.active = false;
        }
        self.emit(ClubEventKind::DomainExpiryRecorded {
            domain: name,
            previous_admin: prev_admin,
            prior_token_id,
            nft_destroyed,
            at: now,
        });
        Ok(())
    }

    async fn handle_domain_reregistration(
        &mut self,
        domain: &str,
        caller: Address,
        now: Timestamp,
    ) -> Result<(), ClubError> {
        let name = normalizer::require_valid(domain)?;

        let status = self.collaborators.domains.status_of(&name).await?;
        if status != crate::domain::DomainStatus::Active {
            return Err(ClubError::DomainNotActive { status });
        }

        let new_token = self.collaborators.domains.token_id_of(&name).await?;
        let owner = self.collaborators.domains.owner_of(new_token).await?;
        if owner != caller {
            return Err(ClubError::NotDomainOwner);
        }

        let Some(club) = self.clubs.get(&name) else {
            // Fresh domain, nothing to inherit.
            debug!("[club-registry] reregistration of {name}: no club bound, nothing to do");
            return Ok(());
        };
        let old_token = club.token_id;
        let prev_admin = club.admin;

        // Self-healing for a missed expiry event: synthesize the Pending
        // snapshot the expiry handler would have taken.
        if !self
            .transitions
            .get(&name)
            .is_some_and(|t| t.status.is_pending())
        {
            self.transitions.insert(
                name.clone(),
                DomainTransition::pending(prev_admin, old_token, old_token != new_token, now),
            );
        }

        let token_changed = old_token != new_token;
        if token_changed {
            self.token_index.remove(&old_token);
            self.token_index.insert(new_token, name.clone());
            if let Some(club) = self.clubs.get_mut(&name) {
                club.token_id = new_token;
            }
        }

        // Inheritance preserves the entire member set; only admin and
        // activity change.
        self.apply_admin_transfer(&name, owner, now).await;
        if let Some(club) = self.clubs.get_mut(&name) {
            club.active = true;
        }
        if let Some(transition) = self.transitions.get_mut(&name) {
            transition.status = TransitionStatus::Accepted;
            transition.at = now;
        }

        self.emit(ClubEventKind::InheritanceDecided {
            domain: name.clone(),
            owner,
            accepted: true,
            at: now,
        });
        self.emit(ClubEventKind::DomainReregistered {
            domain: name,
            new_owner: owner,
            token_id: new_token,
            token_changed,
            at: now,
        });
        Ok(())
    }

    async fn decide_club_inheritance(
        &mut self,
        domain: &str,
        accept: bool,
        caller: Address,
        now: Timestamp,
    ) -> Result<(), ClubError> {
        let name = normalizer::require_valid(domain)?;
        let token_id = {
            let club = self
                .clubs
                .get(&name)
                .ok_or_else(|| ClubError::ClubNotInitialized {
                    domain: name.to_string(),
                })?;
            club.token_id
        };
        if !self
            .transitions
            .get(&name)
            .is_some_and(|t| t.status.is_pending())
        {
            return Err(ClubError::NoPendingTransition {
                domain: name.to_string(),
            });
        }

        let owner = self.collaborators.domains.owner_of(token_id).await?;
        if owner != caller {
            return Err(ClubError::NotDomainOwner);
        }

        // The stated choice is recorded in the event only: the club is
        // preserved and reactivated either way (additive membership).
        if let Some(club) = self.clubs.get_mut(&name) {
            club.active = true;
        }
        if let Some(transition) = self.transitions.get_mut(&name) {
            transition.status = TransitionStatus::Accepted;
            transition.at = now;
        }
        self.emit(ClubEventKind::InheritanceDecided {
            domain: name,
            owner,
            accepted: accept,
            at: now,
        });
        Ok(())
    }

    fn is_member(&self, domain: &str, user: &Address) -> bool {
        let name = normalizer::normalize(domain);
        if name.is_empty() {
            return false;
        }
        self.ledger.is_member(&name, user)
    }

    fn get_club(&self, domain: &str) -> Result<&Club, ClubError> {
        let name = normalizer::require_valid(domain)?;
        self.clubs
            .get(&name)
            .ok_or_else(|| ClubError::ClubNotInitialized {
                domain: name.to_string(),
            })
    }

    fn get_club_admin(&self, domain: &str) -> Result<Address, ClubError> {
        self.get_club(domain).map(|club| club.admin)
    }

    fn get_user_clubs(&self, user: &Address) -> Vec<String> {
        self.ledger
            .clubs_of(user)
            .iter()
            .map(NormalizedName::to_string)
            .collect()
    }

    fn is_club_active(&self, domain: &str) -> bool {
        let name = normalizer::normalize(domain);
        self.clubs.get(&name).is_some_and(|club| club.active)
    }

    fn inheritance_policy(&self, user: &Address) -> InheritancePolicy {
        self.user_policies
            .get(user)
            .copied()
            .unwrap_or(self.default_policy)
    }

    fn set_inheritance_policy(
        &mut self,
        user: Address,
        policy: InheritancePolicy,
        caller: Address,
    ) -> Result<(), ClubError> {
        if caller != user && caller != self.owner {
            return Err(ClubError::NotAuthorized);
        }
        self.user_policies.insert(user, policy);
        Ok(())
    }
}

impl ClubDirectory for ClubRegistry {
    fn club_exists(&self, domain: &NormalizedName) -> bool {
        self.clubs.contains_key(domain)
    }

    fn club_is_active(&self, domain: &NormalizedName) -> bool {
        self.clubs.get(domain).is_some_and(|club| club.active)
    }

    fn admin_of(&self, domain: &NormalizedName) -> Option<Address> {
        self.clubs.get(domain).map(|club| club.admin)
    }

    fn pass_card_of(&self, domain: &NormalizedName) -> Option<Address> {
        self.clubs.get(domain).and_then(|club| club.pass_card)
    }

    fn clubs_of(&self, user: &Address) -> Vec<NormalizedName> {
        self.ledger.clubs_of(user).to_vec()
    }
}
