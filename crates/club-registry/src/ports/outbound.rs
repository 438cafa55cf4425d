//! # Outbound Ports
//!
//! Capability traits for the external collaborators the registry calls: the
//! domain registry (ownership and expiry source of truth) and the three
//! membership back-ends. Every method is fallible; which failures are
//! absorbed and which propagate is decided per call site in the registry and
//! resolver, not here.

use crate::domain::{BackendError, DomainStatus, NormalizedName};
use async_trait::async_trait;
use club_types::{Address, Timestamp, TokenId};
use serde::{Deserialize, Serialize};

/// Registration details for a domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTokenInfo {
    /// When the current registration began.
    pub registered_at: Timestamp,
    /// When it lapses.
    pub expires_at: Timestamp,
    /// Who registered it.
    pub registrant: Address,
}

/// Answer to a pass-card membership query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassCardQuery {
    /// User holds (or ever held) a pass card for the club.
    pub is_member: bool,
    /// The pass card is currently honored.
    pub is_active: bool,
    /// Pass-card token id, 0 when none.
    pub token_id: TokenId,
    /// Total pass cards issued for the club.
    pub member_count: u64,
}

/// One token gate as reported by the token-access ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGateDetails {
    /// Gated asset address on its home chain.
    pub token_address: Address,
    /// Minimum balance (fungible) or minimum holdings (NFT).
    pub threshold: u128,
    /// Specific token id for NFT gates, 0 otherwise.
    pub token_id: TokenId,
    /// Raw type tag; 1 marks an NFT gate.
    pub token_type: u8,
    /// Chain the asset lives on.
    pub chain_id: club_types::ChainRef,
    /// Asset symbol for display.
    pub symbol: String,
    /// Foreign-chain address encoding when the asset is not local.
    pub cross_chain_address: String,
}

/// Temporary-membership pricing tiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTiers {
    /// Price of a one-month membership.
    pub monthly: u128,
    /// Price of a three-month membership.
    pub quarterly: u128,
    /// Price of a one-year membership.
    pub yearly: u128,
}

/// Domain registry and identity-token contract - outbound port.
#[async_trait]
pub trait DomainRegistryClient: Send + Sync {
    /// Lifecycle status of a domain.
    async fn status_of(&self, domain: &NormalizedName) -> Result<DomainStatus, BackendError>;

    /// Registration details of a domain.
    async fn token_info(&self, domain: &NormalizedName) -> Result<DomainTokenInfo, BackendError>;

    /// Whether the domain has a live registration.
    async fn is_registered(&self, domain: &NormalizedName) -> Result<bool, BackendError>;

    /// Owner of an identity token. Fails when the token was destroyed.
    async fn owner_of(&self, token_id: TokenId) -> Result<Address, BackendError>;

    /// Identity token currently bound to a domain, 0 when unregistered.
    async fn token_id_of(&self, domain: &NormalizedName) -> Result<TokenId, BackendError>;
}

/// Permanent pass-card ledger (factory-shared or per-club) - outbound port.
#[async_trait]
pub trait PermanentMembershipLedger: Send + Sync {
    /// Create a club-specific pass-card contract. Irreversible.
    async fn create_for_club(
        &self,
        domain: &NormalizedName,
        admin: Address,
        name: &str,
        symbol: &str,
        base_uri: &str,
    ) -> Result<Address, BackendError>;

    /// Full membership record for a user.
    async fn query_membership(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<PassCardQuery, BackendError>;

    /// Whether the user holds a pass card for the club.
    async fn has_membership(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError>;

    /// Point the ledger at a new club admin.
    async fn update_admin(
        &self,
        domain: &NormalizedName,
        new_admin: Address,
    ) -> Result<(), BackendError>;
}

/// Time-boxed paid membership ledger - outbound port.
#[async_trait]
pub trait TemporaryMembershipLedger: Send + Sync {
    /// Register a club with the ledger.
    async fn initialize_club(
        &self,
        domain: &NormalizedName,
        admin: Address,
    ) -> Result<(), BackendError>;

    /// Undo `initialize_club`. The reversible half of club creation.
    async fn uninitialize_club(&self, domain: &NormalizedName) -> Result<(), BackendError>;

    /// Point the ledger at a new club admin.
    async fn update_club_admin(
        &self,
        domain: &NormalizedName,
        new_admin: Address,
    ) -> Result<(), BackendError>;

    /// Whether the user's membership window covers now.
    async fn is_membership_active(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError>;

    /// Whether the user ever purchased membership, active or not.
    async fn has_membership(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError>;

    /// Expiry of the user's latest membership window, 0 when none.
    async fn membership_expiry(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<Timestamp, BackendError>;

    /// Monthly tier price.
    async fn monthly_price(&self, domain: &NormalizedName) -> Result<u128, BackendError>;

    /// Quarterly tier price.
    async fn quarterly_price(&self, domain: &NormalizedName) -> Result<u128, BackendError>;

    /// Yearly tier price.
    async fn yearly_price(&self, domain: &NormalizedName) -> Result<u128, BackendError>;
}

/// Token-holding gate ledger - outbound port.
#[async_trait]
pub trait TokenAccessLedger: Send + Sync {
    /// Register a club with the ledger.
    async fn initialize_club(
        &self,
        domain: &NormalizedName,
        admin: Address,
    ) -> Result<(), BackendError>;

    /// Undo `initialize_club`.
    async fn uninitialize_club(&self, domain: &NormalizedName) -> Result<(), BackendError>;

    /// Point the ledger at a new club admin.
    async fn update_club_admin(
        &self,
        domain: &NormalizedName,
        new_admin: Address,
    ) -> Result<(), BackendError>;

    /// Whether the user currently satisfies any gate. Read-only.
    async fn has_active_membership(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError>;

    /// Re-check balances and refresh the ledger's own bookkeeping.
    async fn check_and_update_access(
        &self,
        domain: &NormalizedName,
        user: Address,
    ) -> Result<bool, BackendError>;

    /// Number of gates configured for the club.
    async fn token_gate_count(&self, domain: &NormalizedName) -> Result<u64, BackendError>;

    /// Details of one gate by index.
    async fn token_gate_details(
        &self,
        domain: &NormalizedName,
        index: u64,
    ) -> Result<TokenGateDetails, BackendError>;
}
