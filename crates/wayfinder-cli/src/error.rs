//! Error types for wayfinder-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for wayfinder-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wayfinder-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A file could not be read.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A tenant file is not valid TOML for a tenant directory.
    #[error("Invalid tenant file {}: {source}", path.display())]
    Tenant {
        /// The tenant file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: toml::de::Error,
    },

    /// Error from wayfinder-auth
    #[error("Auth error: {0}")]
    Auth(#[from] wayfinder_auth::AuthError),

    /// Error from wayfinder-idp
    #[error("Provider error: {0}")]
    Idp(#[from] wayfinder_idp::IdpError),

    /// Output could not be rendered as JSON.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// No provider is eligible for the login.
    #[error("Cannot determine an identity provider for '{email}'")]
    NoProvider {
        /// The email that was resolved
        email: String,
    },
}

impl Error {
    /// Creates an I/O error tagged with its path.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
