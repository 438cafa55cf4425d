//! # Web3Club Test Suite
//!
//! Unified test crate containing cross-crate integration scenarios:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── club_lifecycle.rs        # creation, rollback, admin, membership
//!     ├── domain_transitions.rs    # expiry / reregistration / inheritance
//!     └── membership_resolution.rs # resolver over live registry state
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All integration scenarios
//! cargo test -p club-tests
//!
//! # By area
//! cargo test -p club-tests integration::domain_transitions::
//! ```

pub mod fixtures;

#[cfg(test)]
mod integration;
