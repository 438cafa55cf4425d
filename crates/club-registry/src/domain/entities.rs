//! # Domain Entities
//!
//! Core entities for the club registry: the club record, its admin-transfer
//! log, and the domain-transition snapshot.

use super::value_objects::{NormalizedName, TransitionStatus};
use club_types::{is_zero, Address, Timestamp, TokenId};
use serde::{Deserialize, Serialize};

/// One entry in a club's append-only admin-transfer history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminTransfer {
    /// Admin before the transfer.
    pub from: Address,
    /// Admin after the transfer.
    pub to: Address,
    /// When the transfer was recorded.
    pub at: Timestamp,
}

/// A domain-bound club record.
///
/// Identity is the normalized domain name; the record is created exactly once
/// and never deleted. Deactivation (domain expiry, admin gating) flips
/// `active` only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Club {
    /// Canonical key.
    pub name: NormalizedName,
    /// Identity token currently bound to the domain.
    pub token_id: TokenId,
    /// Current admin. A club exists iff this is not the zero address.
    pub admin: Address,
    /// Whether membership checks treat the club as live.
    pub active: bool,
    /// Number of recorded members (mirror of the ledger's list length).
    pub member_count: u64,
    /// Club-specific pass-card contract, or `None` when the factory-shared
    /// permanent ledger serves this club.
    pub pass_card: Option<Address>,
    /// Append-only admin-transfer log.
    pub admin_history: Vec<AdminTransfer>,
    /// When the club record was created.
    pub created_at: Timestamp,
}

impl Club {
    /// Create a new, active club record.
    pub fn new(
        name: NormalizedName,
        token_id: TokenId,
        admin: Address,
        pass_card: Option<Address>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            name,
            token_id,
            admin,
            active: true,
            member_count: 0,
            pass_card,
            admin_history: Vec::new(),
            created_at,
        }
    }

    /// Existence invariant: admin is non-zero for every real record.
    #[must_use]
    pub fn exists(&self) -> bool {
        !is_zero(&self.admin)
    }

    /// Record an admin change in the append-only log and apply it.
    pub fn record_admin_transfer(&mut self, new_admin: Address, at: Timestamp) {
        self.admin_history.push(AdminTransfer {
            from: self.admin,
            to: new_admin,
            at,
        });
        self.admin = new_admin;
    }
}

/// Snapshot taken when a club's domain lapses, consumed when a new or
/// returning owner reregisters. Never deleted; repeated cycles overwrite it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTransition {
    /// Admin at the moment the domain lapsed.
    pub previous_admin: Address,
    /// Where in the cycle this domain is.
    pub status: TransitionStatus,
    /// When the snapshot was last written.
    pub at: Timestamp,
    /// Identity token bound to the club when the domain lapsed.
    pub prior_token_id: TokenId,
    /// Whether the prior token no longer resolves to an owner.
    pub nft_destroyed: bool,
}

impl DomainTransition {
    /// Take a Pending snapshot for a lapsed domain.
    pub fn pending(
        previous_admin: Address,
        prior_token_id: TokenId,
        nft_destroyed: bool,
        at: Timestamp,
    ) -> Self {
        Self {
            previous_admin,
            status: TransitionStatus::Pending,
            at,
            prior_token_id,
            nft_destroyed,
        }
    }
}
