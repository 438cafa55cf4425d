//! # club-resolver
//!
//! Membership resolution facade for domain-bound clubs.
//!
//! ## Role in System
//!
//! - **Read-through aggregator**: holds no state of its own; every answer is
//!   assembled from the registry's club directory and the three membership
//!   back-ends.
//! - **Fixed precedence**: permanent pass-card, then temporary membership,
//!   then token gating, short-circuiting on the first hit.
//! - **Graceful degradation**: a failing back-end is "not a member via this
//!   path", never an error surfaced to the caller. Queries return
//!   conservative defaults, not `Result`s.

pub mod resolver;
pub mod types;

pub use resolver::MembershipResolver;
pub use types::*;
