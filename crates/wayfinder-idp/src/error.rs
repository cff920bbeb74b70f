//! Error types for wayfinder-idp

use thiserror::Error;

use crate::provider::ProviderType;

/// Result type alias for wayfinder-idp operations
pub type Result<T> = std::result::Result<T, IdpError>;

/// Errors that can occur in wayfinder-idp.
///
/// None of these escape [`ProviderResolver::resolve`](crate::ProviderResolver::resolve);
/// the resolver logs them and carries on with the remaining providers.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IdpError {
    /// A provider's type-specific configuration could not be decoded.
    #[error("unable to parse {provider_type} configuration for provider '{origin_key}': {source}")]
    ConfigDecode {
        /// Origin key of the offending provider
        origin_key: String,
        /// Type the configuration was decoded as
        provider_type: ProviderType,
        /// Underlying decode failure
        #[source]
        source: serde_json::Error,
    },

    /// A domain pattern set could not be compiled.
    #[error("invalid domain patterns [{patterns}]: {source}")]
    Pattern {
        /// The patterns, comma separated
        patterns: String,
        /// Underlying regex failure
        #[source]
        source: regex::Error,
    },

    /// A provider type name was not recognised.
    #[error("unknown provider type: {0}")]
    UnknownProviderType(String),
}
