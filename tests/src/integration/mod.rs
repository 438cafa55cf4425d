//! Cross-crate integration scenarios.

mod club_lifecycle;
mod domain_transitions;
