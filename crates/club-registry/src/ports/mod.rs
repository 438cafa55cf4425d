//! # Ports Module
//!
//! Inbound API traits and outbound collaborator capability traits.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
