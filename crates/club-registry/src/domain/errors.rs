//! # Domain Errors
//!
//! Error types for the club registry.

use super::value_objects::{DomainStatus, InitStage};
use thiserror::Error;

/// Failure of a call into an external collaborator (domain registry or one of
/// the membership back-ends).
///
/// Read paths reduce these to conservative defaults; the `create_club`
/// initialization sequence and transition-machine status checks propagate
/// them.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The collaborator could not be reached at all.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The collaborator answered with an explicit rejection.
    #[error("backend rejected call: {0}")]
    Rejected(String),

    /// The collaborator answered with something we could not interpret.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

/// Club registry error types.
#[derive(Debug, Error)]
pub enum ClubError {
    /// Input did not normalize to a non-empty name.
    #[error("invalid domain name: {input:?}")]
    InvalidDomain {
        /// The raw input as received.
        input: String,
    },

    /// No club record exists for the domain.
    #[error("club not initialized: {domain}")]
    ClubNotInitialized {
        /// Normalized domain name.
        domain: String,
    },

    /// A club record already exists for the domain.
    #[error("club already exists: {domain}")]
    ClubAlreadyExists {
        /// Normalized domain name.
        domain: String,
    },

    /// Caller is neither the club admin nor the domain-token owner.
    #[error("caller is not the club admin")]
    NotAdmin,

    /// Caller is not on the membership-update allow list.
    #[error("caller is not authorized")]
    NotAuthorized,

    /// Caller does not own the domain's bound identity token.
    #[error("caller is not the domain owner")]
    NotDomainOwner,

    /// The null address was supplied where a real one is required.
    #[error("zero address")]
    ZeroAddress,

    /// Domain is not in the Active state required for this operation.
    #[error("domain not active: status {status:?}")]
    DomainNotActive {
        /// Status the domain registry reported.
        status: DomainStatus,
    },

    /// Domain has lapsed (Frozen or Reclaimed) where Active was required.
    #[error("domain expired: status {status:?}")]
    DomainExpired {
        /// Status the domain registry reported.
        status: DomainStatus,
    },

    /// Domain is still live where expiry handling was requested.
    #[error("domain not expired: status {status:?}")]
    DomainNotExpired {
        /// Status the domain registry reported.
        status: DomainStatus,
    },

    /// The domain's identity token is already bound to a club.
    #[error("domain already bound to a club: {domain}")]
    DomainAlreadyHasClub {
        /// Normalized domain name of the existing binding.
        domain: String,
    },

    /// No Pending transition record exists for the domain.
    #[error("no pending transition for {domain}")]
    NoPendingTransition {
        /// Normalized domain name.
        domain: String,
    },

    /// A stage of the `create_club` back-end initialization failed; all
    /// reversible prior stages were rolled back.
    #[error("initialization failed at {stage} stage: {reason}")]
    InitializationFailed {
        /// Stage that failed.
        stage: InitStage,
        /// Collaborator-reported reason.
        reason: String,
    },

    /// Hard collaborator failure on a propagate path (domain-status checks
    /// inside the transition state machine, ownership resolution during
    /// reregistration).
    #[error("collaborator failure: {0}")]
    Registry(#[from] BackendError),
}
