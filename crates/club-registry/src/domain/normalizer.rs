//! # Domain Name Normalizer
//!
//! Pure canonicalization of raw domain names into the registry's key space.
//!
//! Normalization strips the well-known suffix (exact, case-sensitive end
//! match, at most once) and accepts only `[a-z0-9_]` in what remains. It is
//! total: malformed input maps to the empty sentinel, never an error. Every
//! other component relies on this function being deterministic and free of
//! I/O.

use super::errors::ClubError;
use super::value_objects::NormalizedName;

/// The well-known domain suffix stripped during normalization.
pub const DOMAIN_SUFFIX: &str = ".web3.club";

/// Canonicalize a raw domain name.
///
/// Returns the empty sentinel for any input containing a character outside
/// `[a-z0-9_]` after suffix stripping, and for inputs that are empty once
/// stripped. Callers on read paths must check [`NormalizedName::is_empty`].
#[must_use]
pub fn normalize(input: &str) -> NormalizedName {
    let stripped = input.strip_suffix(DOMAIN_SUFFIX).unwrap_or(input);

    if stripped.is_empty() {
        return NormalizedName::empty();
    }
    if !stripped
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
    {
        return NormalizedName::empty();
    }

    NormalizedName::new_unchecked(stripped.to_owned())
}

/// Whether `normalize(input)` yields a non-empty name.
#[must_use]
pub fn is_valid(input: &str) -> bool {
    !normalize(input).is_empty()
}

/// Normalize, failing with [`ClubError::InvalidDomain`] on the empty sentinel.
///
/// State-mutating entry points use this so garbage input aborts instead of
/// silently keying an empty record.
pub fn require_valid(input: &str) -> Result<NormalizedName, ClubError> {
    let name = normalize(input);
    if name.is_empty() {
        return Err(ClubError::InvalidDomain {
            input: input.to_owned(),
        });
    }
    Ok(name)
}
