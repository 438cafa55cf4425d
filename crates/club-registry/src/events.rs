//! # Event Schema
//!
//! Payloads emitted by the registry for every externally visible state
//! change. The registry keeps an in-process append-only log and mirrors each
//! emit at `info!`; operators consume the log to reconcile the one documented
//! irreversible step (`IrreversibleStepCommitted`).

use crate::domain::{InitStage, NormalizedName};
use club_types::{Address, Timestamp, TokenId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An emitted registry event with its correlation id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClubEvent {
    /// Correlation id for this emission.
    pub event_id: Uuid,
    /// What happened.
    pub kind: ClubEventKind,
}

impl ClubEvent {
    /// Wrap a payload with a fresh correlation id.
    #[must_use]
    pub fn new(kind: ClubEventKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind,
        }
    }
}

/// Every event the registry can emit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClubEventKind {
    /// A club was created with all back-ends initialized.
    ClubCreated {
        /// Club key.
        domain: NormalizedName,
        /// Bound identity token.
        token_id: TokenId,
        /// Founding admin.
        admin: Address,
        /// Club-specific pass-card contract, if any.
        pass_card: Option<Address>,
        /// Creation time.
        at: Timestamp,
    },
    /// A user was recorded as a member.
    MemberAdded {
        /// Club key.
        domain: NormalizedName,
        /// New member.
        user: Address,
        /// Member count after the addition.
        member_count: u64,
    },
    /// The club admin changed.
    AdminTransferred {
        /// Club key.
        domain: NormalizedName,
        /// Outgoing admin.
        from: Address,
        /// Incoming admin.
        to: Address,
        /// Transfer time.
        at: Timestamp,
    },
    /// The admin toggled the club's active flag.
    ActiveToggled {
        /// Club key.
        domain: NormalizedName,
        /// New value of the flag.
        active: bool,
    },
    /// A lapsed domain was snapshotted and its club deactivated.
    DomainExpiryRecorded {
        /// Club key.
        domain: NormalizedName,
        /// Admin at the time of lapse.
        previous_admin: Address,
        /// Token bound at the time of lapse.
        prior_token_id: TokenId,
        /// Whether that token no longer resolves to an owner.
        nft_destroyed: bool,
        /// Snapshot time.
        at: Timestamp,
    },
    /// The domain-token owner stated an inheritance preference.
    ///
    /// `accepted` records the stated choice only; the club is preserved and
    /// reactivated either way.
    InheritanceDecided {
        /// Club key.
        domain: NormalizedName,
        /// Owner who decided.
        owner: Address,
        /// The stated choice.
        accepted: bool,
        /// Decision time.
        at: Timestamp,
    },
    /// A domain was reregistered and its club inherited by the new owner.
    DomainReregistered {
        /// Club key.
        domain: NormalizedName,
        /// New owner and admin.
        new_owner: Address,
        /// Token bound after reregistration.
        token_id: TokenId,
        /// Whether the token id changed across the cycle.
        token_changed: bool,
        /// Reregistration time.
        at: Timestamp,
    },
    /// An irreversible initialization step succeeded before a later step
    /// failed. The named contract exists with no club record behind it.
    IrreversibleStepCommitted {
        /// Club key the creation was for.
        domain: NormalizedName,
        /// Stage that had already committed.
        stage: InitStage,
        /// Address of the orphaned contract.
        address: Address,
    },
    /// Collaborator contract addresses were reconfigured.
    ContractsUpdated {
        /// Which address field changed.
        field: String,
        /// New address.
        address: Address,
    },
}
