//! # wayfinder-cli
//!
//! Command-line tools for Wayfinder operators:
//! - Resolve which providers a login would be routed to
//! - Test email domains against wildcard patterns
//! - Decode and check persisted authentication records

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod tenant;

pub use error::{Error, Result};
