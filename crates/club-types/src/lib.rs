//! # Club Types Crate
//!
//! Primitive types shared by the club registry and the membership resolver.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: address and identifier aliases live here and
//!   nowhere else.
//! - **Plain data**: no behavior beyond construction and display helpers, so
//!   every other crate can depend on this one without cycles.

pub mod primitives;

pub use primitives::*;
