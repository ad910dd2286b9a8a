//! Shared test utilities for session token crates.
//!
//! This crate provides:
//! - Proptest strategies for subjects, secrets and codec settings
//! - Reference tokens produced by the legacy session manager

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use generators::*;
