//! # Resolver Value Objects
//!
//! Result shapes produced by the membership resolver.

use club_registry::domain::TokenKind;
use club_registry::ports::{PricingTiers, TokenGateDetails};
use club_types::{Address, ChainRef, Timestamp, TokenId};
use serde::{Deserialize, Serialize};

/// Which path qualified (or previously qualified) the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MembershipKind {
    /// No path applies.
    #[default]
    None,
    /// Non-expiring pass-card membership.
    Permanent,
    /// Paid membership inside its active window.
    Temporary,
    /// Paid membership whose window has closed.
    TemporaryExpired,
    /// Qualifying balance of a gated token.
    TokenBased,
}

impl MembershipKind {
    /// Wire/display label. Empty for `None`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipKind::None => "",
            MembershipKind::Permanent => "permanent",
            MembershipKind::Temporary => "temporary",
            MembershipKind::TemporaryExpired => "temporary-expired",
            MembershipKind::TokenBased => "token-based",
        }
    }
}

/// Resolution result for one (user, club) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipStatus {
    /// Whether any path currently qualifies the user.
    pub is_member: bool,
    /// Expiry of the qualifying (or lapsed) temporary window; 0 for
    /// permanent and token paths, which do not expire.
    pub expiration: Timestamp,
    /// The path that produced this answer.
    pub kind: MembershipKind,
}

impl MembershipStatus {
    /// The "no membership" answer.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A currently-qualifying answer via the given path.
    #[must_use]
    pub fn active(kind: MembershipKind, expiration: Timestamp) -> Self {
        Self {
            is_member: true,
            expiration,
            kind,
        }
    }

    /// The lapsed-temporary answer: not a member, expiry kept for display.
    #[must_use]
    pub fn lapsed(expiration: Timestamp) -> Self {
        Self {
            is_member: false,
            expiration,
            kind: MembershipKind::TemporaryExpired,
        }
    }
}

/// One token gate, classified for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequirement {
    /// Gated asset address on its home chain.
    pub token_address: Address,
    /// Minimum balance or holdings.
    pub threshold: u128,
    /// Specific token id for NFT gates, 0 otherwise.
    pub token_id: TokenId,
    /// NFT-vs-fungible classification derived from the type tag.
    pub kind: TokenKind,
    /// Chain the asset lives on.
    pub chain_id: ChainRef,
    /// Asset symbol.
    pub symbol: String,
    /// Foreign-chain address encoding when the asset is not local.
    pub cross_chain_address: String,
}

impl From<TokenGateDetails> for TokenRequirement {
    fn from(gate: TokenGateDetails) -> Self {
        Self {
            token_address: gate.token_address,
            threshold: gate.threshold,
            token_id: gate.token_id,
            kind: TokenKind::from_tag(gate.token_type),
            chain_id: gate.chain_id,
            symbol: gate.symbol,
            cross_chain_address: gate.cross_chain_address,
        }
    }
}

/// Read-only snapshot of a club's join requirements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubMembershipConditions {
    /// Club admin.
    pub admin: Address,
    /// Club-specific pass-card contract, if one exists.
    pub pass_card: Option<Address>,
    /// Temporary-membership pricing tiers (zeros where unavailable).
    pub pricing: PricingTiers,
    /// Every fetchable token gate; gates whose detail fetch failed are
    /// skipped.
    pub token_requirements: Vec<TokenRequirement>,
}
