//! Session token demo.
//!
//! Command line wrapper around [`session_token::SessionCodec`] with
//! environment configuration and structured logging.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod observability;

pub use commands::Command;
pub use config::Config;
