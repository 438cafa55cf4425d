//! # Primitive Identifiers
//!
//! Address, token, and time aliases used across the workspace.

/// A 20-byte Ethereum-style address.
///
/// All address fields in the workspace use `[u8; 20]`.
pub type Address = [u8; 20];

/// The null address. A club record exists iff its admin differs from this.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Identifier of the non-fungible token bound to a domain.
///
/// `0` is the "no token" sentinel returned for unregistered domains.
pub type TokenId = u64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// External chain identifier carried on token gates.
pub type ChainRef = u64;

/// Whether an address is the null address.
#[must_use]
pub fn is_zero(address: &Address) -> bool {
    *address == ZERO_ADDRESS
}

/// Render an address as `0x` plus the first and last four hex characters.
///
/// Used in log lines and event summaries where the full 40 characters would
/// drown the message.
#[must_use]
pub fn short_hex(address: &Address) -> String {
    let full = hex::encode(address);
    format!("0x{}..{}", &full[..4], &full[36..])
}

/// Render an address as a full `0x`-prefixed hex string.
#[must_use]
pub fn full_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}
