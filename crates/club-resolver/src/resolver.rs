//! # Membership Resolver
//!
//! Aggregates the permanent, temporary, and token back-ends into a single
//! status view. Registry state is read through the [`ClubDirectory`] port
//! under a short lock; the lock is released before any back-end is awaited.

use crate::types::{ClubMembershipConditions, MembershipKind, MembershipStatus, TokenRequirement};
use club_registry::domain::{normalize, NormalizedName};
use club_registry::ports::{
    ClubDirectory, PermanentMembershipLedger, PricingTiers, TemporaryMembershipLedger,
    TokenAccessLedger,
};
use club_types::Address;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Stateless query facade over the registry and the membership back-ends.
pub struct MembershipResolver<D: ClubDirectory> {
    directory: Arc<RwLock<D>>,
    permanent: Arc<dyn PermanentMembershipLedger>,
    temporary: Arc<dyn TemporaryMembershipLedger>,
    token_access: Arc<dyn TokenAccessLedger>,
}

impl<D: ClubDirectory> MembershipResolver<D> {
    /// Build a resolver over a shared directory and the three back-ends.
    pub fn new(
        directory: Arc<RwLock<D>>,
        permanent: Arc<dyn PermanentMembershipLedger>,
        temporary: Arc<dyn TemporaryMembershipLedger>,
        token_access: Arc<dyn TokenAccessLedger>,
    ) -> Self {
        Self {
            directory,
            permanent,
            temporary,
            token_access,
        }
    }

    /// Resolve a known club name, releasing the directory lock before
    /// returning. `None` when the input is invalid or no club exists.
    fn known_club(&self, domain: &str) -> Option<NormalizedName> {
        let name = normalize(domain);
        if name.is_empty() {
            return None;
        }
        if !self.directory.read().club_exists(&name) {
            return None;
        }
        Some(name)
    }

    /// Whether the user currently qualifies via any path.
    ///
    /// Fails closed: invalid domain, unknown club, and every back-end failure
    /// all resolve to `false` for the affected path.
    pub async fn has_active_membership(&self, domain: &str, user: Address) -> bool {
        let Some(name) = self.known_club(domain) else {
            return false;
        };

        if self.permanent_member(&name, user).await {
            return true;
        }
        if self.temporary_active(&name, user).await {
            return true;
        }
        self.token_qualifies(&name, user).await
    }

    /// Resolve and classify the user's membership for one club.
    ///
    /// Precedence: permanent (short-circuits everything, no expiry concept),
    /// then active temporary, then token gating. A lapsed temporary
    /// membership is reported last, with `is_member == false` and the old
    /// expiry kept for display.
    pub async fn check_user_membership(&self, user: Address, domain: &str) -> MembershipStatus {
        let Some(name) = self.known_club(domain) else {
            return MembershipStatus::none();
        };

        if self.permanent_member(&name, user).await {
            return MembershipStatus::active(MembershipKind::Permanent, 0);
        }

        if self.temporary_active(&name, user).await {
            let expiration = self.temporary_expiry(&name, user).await;
            return MembershipStatus::active(MembershipKind::Temporary, expiration);
        }

        if self.token_qualifies(&name, user).await {
            return MembershipStatus::active(MembershipKind::TokenBased, 0);
        }

        if self.temporary_ever_joined(&name, user).await {
            let expiration = self.temporary_expiry(&name, user).await;
            if expiration > 0 {
                return MembershipStatus::lapsed(expiration);
            }
        }

        MembershipStatus::none()
    }

    /// Assemble a club's join requirements.
    ///
    /// Informational read: pricing falls back to zero, a failing gate count
    /// yields an empty list, and each unfetchable gate is skipped. `None`
    /// only when the domain is invalid or no club exists.
    pub async fn club_membership_conditions(
        &self,
        domain: &str,
    ) -> Option<ClubMembershipConditions> {
        let name = self.known_club(domain)?;
        let (admin, pass_card) = {
            let directory = self.directory.read();
            (directory.admin_of(&name)?, directory.pass_card_of(&name))
        };

        let pricing = PricingTiers {
            monthly: self.price(&name, "monthly").await,
            quarterly: self.price(&name, "quarterly").await,
            yearly: self.price(&name, "yearly").await,
        };

        let count = match self.token_access.token_gate_count(&name).await {
            Ok(count) => count,
            Err(err) => {
                debug!("[club-resolver] {name}: gate count unavailable: {err}");
                0
            }
        };
        let mut token_requirements = Vec::with_capacity(count as usize);
        for index in 0..count {
            match self.token_access.token_gate_details(&name, index).await {
                Ok(gate) => token_requirements.push(TokenRequirement::from(gate)),
                Err(err) => {
                    debug!("[club-resolver] {name}: skipping gate {index}: {err}");
                }
            }
        }

        Some(ClubMembershipConditions {
            admin,
            pass_card,
            pricing,
            token_requirements,
        })
    }

    /// Classify every club the registry knows for the user.
    ///
    /// The two sequences are index-aligned and equal in length.
    pub async fn user_memberships(&self, user: Address) -> (Vec<String>, Vec<MembershipStatus>) {
        let clubs = self.directory.read().clubs_of(&user);
        let mut domains = Vec::with_capacity(clubs.len());
        let mut statuses = Vec::with_capacity(clubs.len());
        for name in clubs {
            let status = self.check_user_membership(user, name.as_str()).await;
            domains.push(name.to_string());
            statuses.push(status);
        }
        (domains, statuses)
    }

    async fn permanent_member(&self, name: &NormalizedName, user: Address) -> bool {
        match self.permanent.has_membership(name, user).await {
            Ok(is_member) => is_member,
            Err(err) => {
                debug!("[club-resolver] {name}: permanent check failed: {err}");
                false
            }
        }
    }

    async fn temporary_active(&self, name: &NormalizedName, user: Address) -> bool {
        match self.temporary.is_membership_active(name, user).await {
            Ok(active) => active,
            Err(err) => {
                debug!("[club-resolver] {name}: temporary check failed: {err}");
                false
            }
        }
    }

    async fn temporary_ever_joined(&self, name: &NormalizedName, user: Address) -> bool {
        match self.temporary.has_membership(name, user).await {
            Ok(joined) => joined,
            Err(err) => {
                debug!("[club-resolver] {name}: temporary history check failed: {err}");
                false
            }
        }
    }

    async fn temporary_expiry(&self, name: &NormalizedName, user: Address) -> u64 {
        match self.temporary.membership_expiry(name, user).await {
            Ok(expiry) => expiry,
            Err(err) => {
                debug!("[club-resolver] {name}: expiry read failed: {err}");
                0
            }
        }
    }

    async fn token_qualifies(&self, name: &NormalizedName, user: Address) -> bool {
        match self.token_access.has_active_membership(name, user).await {
            Ok(qualifies) => qualifies,
            Err(err) => {
                debug!("[club-resolver] {name}: token check failed: {err}");
                false
            }
        }
    }

    async fn price(&self, name: &NormalizedName, tier: &'static str) -> u128 {
        let read = match tier {
            "monthly" => self.temporary.monthly_price(name).await,
            "quarterly" => self.temporary.quarterly_price(name).await,
            _ => self.temporary.yearly_price(name).await,
        };
        match read {
            Ok(price) => price,
            Err(err) => {
                debug!("[club-resolver] {name}: {tier} price unavailable: {err}");
                0
            }
        }
    }
}
