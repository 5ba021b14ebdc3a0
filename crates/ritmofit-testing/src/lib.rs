//! Test utilities for RitmoFit crates.
//!
//! Provides bearer-token helpers and wall-clock fixtures.
//! Import from `[dev-dependencies]` only, never in production code.

pub mod auth;
pub mod clock;
