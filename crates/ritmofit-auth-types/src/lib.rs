//! Auth types shared across RitmoFit crates.
//!
//! Provides JWT issuing/validation and `Authorization: Bearer` parsing.

pub mod bearer;
pub mod token;
