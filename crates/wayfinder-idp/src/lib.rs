//! Identity provider selection for Wayfinder.
//!
//! Given the providers active for a tenant, the client a user is logging in
//! to, and the user's email address, decide which providers may
//! authenticate that user. A single login form can then dispatch to the right
//! backing provider without asking the user which one to use.
//!
//! # Modules
//!
//! - [`domain`]: Wildcard domain patterns and the compiled-pattern cache
//! - [`provider`]: Identity provider entries and their type
//! - [`definition`]: Type-specific provider configuration and the declared email domains
//! - [`client`]: Client allow-lists
//! - [`resolver`]: The filter pipeline producing eligible providers
//! - [`directory`]: A tenant's providers, clients, and resolver settings
//! - [`config`]: Resolver configuration

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod definition;
pub mod directory;
pub mod domain;
pub mod error;
pub mod provider;
pub mod resolver;

pub use client::{ALLOWED_PROVIDERS, ClientDescriptor, allowed_origins};
pub use config::ResolverConfig;
pub use definition::{ProviderDefinition, email_domains};
pub use directory::TenantDirectory;
pub use domain::{DomainMatcher, DomainPatterns};
pub use error::{IdpError, Result};
pub use provider::{IdentityProvider, ProviderType};
pub use resolver::ProviderResolver;
