//! # Membership Ledger
//!
//! Per-club member lists and the per-user club index.
//!
//! Mutation is additive only: there is no removal API at all, so membership
//! monotonicity holds structurally. Lists are insertion-ordered and
//! deduplicated by linear scan, acceptable at expected club sizes.

use super::value_objects::NormalizedName;
use club_types::Address;
use std::collections::HashMap;

/// Additive-only membership bookkeeping.
#[derive(Debug, Default)]
pub struct MembershipLedger {
    members: HashMap<NormalizedName, Vec<Address>>,
    user_clubs: HashMap<Address, Vec<NormalizedName>>,
}

impl MembershipLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a member. Returns `false` if the user was already recorded.
    pub fn record(&mut self, club: &NormalizedName, user: Address) -> bool {
        let list = self.members.entry(club.clone()).or_default();
        if list.contains(&user) {
            return false;
        }
        list.push(user);

        let index = self.user_clubs.entry(user).or_default();
        if !index.contains(club) {
            index.push(club.clone());
        }
        true
    }

    /// Whether the user was ever recorded for the club.
    #[must_use]
    pub fn is_member(&self, club: &NormalizedName, user: &Address) -> bool {
        self.members
            .get(club)
            .is_some_and(|list| list.contains(user))
    }

    /// Members of a club in insertion order; empty for unknown clubs.
    #[must_use]
    pub fn members_of(&self, club: &NormalizedName) -> &[Address] {
        self.members.get(club).map_or(&[], Vec::as_slice)
    }

    /// Clubs a user was ever recorded in; empty for unknown users.
    #[must_use]
    pub fn clubs_of(&self, user: &Address) -> &[NormalizedName] {
        self.user_clubs.get(user).map_or(&[], Vec::as_slice)
    }

    /// Member count for a club; zero for unknown clubs.
    #[must_use]
    pub fn member_count(&self, club: &NormalizedName) -> u64 {
        self.members.get(club).map_or(0, |list| list.len() as u64)
    }
}
