//! # Domain Module
//!
//! Core domain types for the club registry.

pub mod entities;
pub mod errors;
pub mod ledger;
pub mod normalizer;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use ledger::MembershipLedger;
pub use normalizer::{is_valid, normalize, require_valid, DOMAIN_SUFFIX};
pub use value_objects::*;
