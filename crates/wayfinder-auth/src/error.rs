//! Auth-specific error types.

/// Result type alias for wayfinder-auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while building or decoding an authentication record.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// A record was requested without a principal.
    #[error("principal must not be absent")]
    MissingPrincipal,

    /// A record was requested without an authority list.
    #[error("authorities must not be absent")]
    MissingAuthorities,

    /// A persisted timestamp is outside the representable range.
    #[error("invalid timestamp: {0} ms since epoch")]
    InvalidTimestamp(i64),

    /// The persisted representation could not be decoded.
    #[error("failed to decode authentication record: {0}")]
    Decode(#[from] serde_json::Error),

    /// A record could not be serialized.
    #[error("failed to encode authentication record: {0}")]
    Encode(#[source] serde_json::Error),
}

impl AuthError {
    /// Whether this error was caused by the caller's input (vs. an internal fault).
    ///
    /// Encoding failures are internal: a record built through this crate
    /// always serializes.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingPrincipal
                | AuthError::MissingAuthorities
                | AuthError::InvalidTimestamp(_)
                | AuthError::Decode(_)
        )
    }
}
