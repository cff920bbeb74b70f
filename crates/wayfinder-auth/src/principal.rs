//! Authenticated identity, granted authorities, and request details.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identity being authenticated.
///
/// Supplied by whichever backing authenticator (local, LDAP, SAML) verified
/// the credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Origin key of the provider that authenticated this principal.
    origin: String,
}

impl Principal {
    /// Create a principal from its id, user name, and authenticating origin.
    pub fn new(id: impl Into<String>, name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            origin: origin.into(),
        }
    }

    /// Attach an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Unique user id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// User name; users are looked up by this, not by id.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address, if the provider supplied one.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Origin key of the authenticating provider.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// A single granted permission, e.g. `openid` or `scim.read`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    /// Create an authority from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The authority name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Authority {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Authority {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Context of the request that produced an authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationDetails {
    /// Remote address of the login request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Session the login happened in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// OAuth client the user was logging in to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}
