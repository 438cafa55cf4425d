//! # Domain Value Objects
//!
//! Immutable value types for the club registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical club key: the suffix-stripped, validated domain name.
///
/// An empty `NormalizedName` is the invalid sentinel produced by
/// [`crate::domain::normalizer::normalize`] for malformed input. Callers on
/// read paths check emptiness; mutating entry points go through
/// `require_valid` instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Wrap an already-validated name. Only the normalizer constructs
    /// non-empty values.
    pub(crate) fn new_unchecked(name: String) -> Self {
        Self(name)
    }

    /// The empty/invalid sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Whether this is the invalid sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain lifecycle status reported by the domain-registry collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainStatus {
    /// Never registered, or released back to the open pool.
    Available,
    /// Registered and within its paid period.
    Active,
    /// Past expiry, inside the grace window; renewable by the old owner.
    Frozen,
    /// Past the grace window; the registry has reclaimed it.
    Reclaimed,
}

impl DomainStatus {
    /// Whether the domain has lapsed (expiry handling applies).
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, DomainStatus::Frozen | DomainStatus::Reclaimed)
    }
}

/// Domain-transition state machine.
///
/// A transition record tracks a club across an expiry/reregistration cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionStatus {
    /// No transition in progress.
    #[default]
    None,
    /// Domain lapsed; club deactivated, awaiting a new or returning owner.
    Pending,
    /// New owner inherited the club; club reactivated.
    Accepted,
    /// Reachable in the model but produced by no operation today.
    Rejected,
}

impl TransitionStatus {
    /// Check if a transition is valid.
    #[must_use]
    pub fn can_transition_to(&self, next: TransitionStatus) -> bool {
        match (self, next) {
            (Self::None, Self::Pending) => true,
            (Self::Pending, Self::Pending) => true, // snapshot overwrite on repeated expiry
            (Self::Pending, Self::Accepted) => true,
            (Self::Pending, Self::Rejected) => true,
            // A completed cycle can start over on the next expiry.
            (Self::Accepted | Self::Rejected, Self::Pending) => true,
            _ => false,
        }
    }

    /// Whether a decision is still outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        *self == Self::Pending
    }
}

/// Per-user preference for how a UI should handle a pending transition.
///
/// Stored and exposed only; the transition operations themselves always
/// preserve and reactivate once invoked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InheritancePolicy {
    /// Ask the owner each time.
    #[default]
    Prompt,
    /// Inherit without asking.
    Always,
    /// Never prompt to inherit.
    Never,
}

/// Classification of a gated token derived from its type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Balance-threshold gate on a fungible asset.
    Fungible,
    /// Ownership gate on a non-fungible asset.
    NonFungible,
}

impl TokenKind {
    /// Decode the wire tag used by the token-access ledger (1 = NFT).
    #[must_use]
    pub fn from_tag(tag: u8) -> Self {
        if tag == 1 {
            TokenKind::NonFungible
        } else {
            TokenKind::Fungible
        }
    }
}

/// Stage names for the `create_club` initialization sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitStage {
    /// Pass-card contract creation via the permanent-membership factory.
    PermanentPass,
    /// Temporary-membership ledger initialization.
    Temporary,
    /// Token-access ledger initialization.
    TokenAccess,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitStage::PermanentPass => "permanent-pass",
            InitStage::Temporary => "temporary",
            InitStage::TokenAccess => "token-access",
        };
        f.write_str(name)
    }
}
