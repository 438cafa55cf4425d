//! # club-registry
//!
//! Membership registry for domain-bound clubs.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: authoritative record of every club, its
//!   admin, its member set, and its domain-transition state.
//! - **Orchestrator**: drives back-end ledger initialization with rollback,
//!   admin propagation, and the domain expiry/reregistration state machine.
//! - **Canonical key space**: every club is keyed by the normalized domain
//!   name produced by [`domain::normalizer`]; all collaborators are addressed
//!   through outbound ports.
//!
//! ## Reliability boundary
//!
//! Read paths absorb collaborator failures and fall back to conservative
//! defaults. The `create_club` initialization sequence and the domain-status
//! checks inside the transition state machine propagate failures hard and
//! roll back reversible steps: partial initialization or an unresolved domain
//! status would corrupt the registry's invariants.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod registry;

pub use domain::*;
pub use events::*;
pub use ports::*;
pub use registry::*;
