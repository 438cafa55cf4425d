//! # Inbound Ports
//!
//! API traits defining what the club registry can do. [`ClubRegistryApi`] is
//! the full mutating and reading surface; [`ClubDirectory`] is the narrow
//! synchronous read view the membership resolver consumes.

use crate::domain::{Club, ClubError, InheritancePolicy, NormalizedName};
use async_trait::async_trait;
use club_types::{Address, Timestamp};

/// Club registry API - inbound port.
///
/// Operations are discrete and serialized: mutators take `&mut self` and each
/// call either fully applies or leaves the registry untouched (modulo the
/// documented irreversible pass-card creation).
#[async_trait]
pub trait ClubRegistryApi: Send + Sync {
    /// Create a club for a domain the caller owns, initializing all three
    /// membership back-ends or rolling back.
    async fn create_club(
        &mut self,
        domain: &str,
        caller: Address,
        now: Timestamp,
    ) -> Result<(), ClubError>;

    /// Hand the club to a new admin and propagate best-effort to back-ends.
    async fn transfer_admin(
        &mut self,
        domain: &str,
        new_admin: Address,
        caller: Address,
        now: Timestamp,
    ) -> Result<(), ClubError>;

    /// Admin-only activity toggle.
    fn set_active(&mut self, domain: &str, active: bool, caller: Address)
        -> Result<(), ClubError>;

    /// Record a membership grant. `status == false` is accepted and ignored.
    fn update_membership(
        &mut self,
        user: Address,
        domain: &str,
        status: bool,
        caller: Address,
    ) -> Result<(), ClubError>;

    /// React to a lapsed domain: snapshot and deactivate.
    async fn handle_domain_expiry(&mut self, domain: &str, now: Timestamp)
        -> Result<(), ClubError>;

    /// React to a domain coming back: inherit the club to the new owner.
    async fn handle_domain_reregistration(
        &mut self,
        domain: &str,
        caller: Address,
        now: Timestamp,
    ) -> Result<(), ClubError>;

    /// Record the owner's inheritance choice for a Pending transition.
    async fn decide_club_inheritance(
        &mut self,
        domain: &str,
        accept: bool,
        caller: Address,
        now: Timestamp,
    ) -> Result<(), ClubError>;

    /// Whether the user was ever recorded as a member. Safe default `false`.
    fn is_member(&self, domain: &str, user: &Address) -> bool;

    /// The club record. Fails `ClubNotInitialized`.
    fn get_club(&self, domain: &str) -> Result<&Club, ClubError>;

    /// The club admin. Fails `ClubNotInitialized`.
    fn get_club_admin(&self, domain: &str) -> Result<Address, ClubError>;

    /// Every club the user was ever recorded in. Safe default empty.
    fn get_user_clubs(&self, user: &Address) -> Vec<String>;

    /// Whether the club exists and is active. Safe default `false`.
    fn is_club_active(&self, domain: &str) -> bool;

    /// Stored inheritance preference for a user (global default when unset).
    fn inheritance_policy(&self, user: &Address) -> InheritancePolicy;

    /// Record a user's inheritance preference. Self or registry owner only.
    fn set_inheritance_policy(
        &mut self,
        user: Address,
        policy: InheritancePolicy,
        caller: Address,
    ) -> Result<(), ClubError>;
}

/// Read-only club lookup - the seam between registry state and the resolver.
pub trait ClubDirectory: Send + Sync {
    /// Whether a club record exists for the name.
    fn club_exists(&self, domain: &NormalizedName) -> bool;

    /// Whether the club exists and is active.
    fn club_is_active(&self, domain: &NormalizedName) -> bool;

    /// Admin of the club, if it exists.
    fn admin_of(&self, domain: &NormalizedName) -> Option<Address>;

    /// Club-specific pass-card contract, if one was created.
    fn pass_card_of(&self, domain: &NormalizedName) -> Option<Address>;

    /// The user's club index, in insertion order.
    fn clubs_of(&self, user: &Address) -> Vec<NormalizedName>;
}
