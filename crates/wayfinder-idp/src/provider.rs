//! Identity provider entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdpError;

/// Kind of backing identity provider.
///
/// Deserialized through [`FromStr`], so names are case-insensitive and
/// `uaa` is accepted for [`ProviderType::Local`]. Names this build does not
/// know become [`ProviderType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ProviderType {
    /// The broker's own user directory
    Local,
    /// LDAP / Active Directory
    Ldap,
    /// SAML 2.0 identity provider
    Saml,
    /// OpenStack Keystone
    Keystone,
    /// Any type this build does not know about
    Unknown,
}

impl ProviderType {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Ldap => "ldap",
            Self::Saml => "saml",
            Self::Keystone => "keystone",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = IdpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" | "uaa" => Ok(Self::Local),
            "ldap" => Ok(Self::Ldap),
            "saml" => Ok(Self::Saml),
            "keystone" => Ok(Self::Keystone),
            _ => Err(IdpError::UnknownProviderType(s.to_string())),
        }
    }
}

impl From<String> for ProviderType {
    fn from(name: String) -> Self {
        name.parse().unwrap_or_else(|e| {
            log::warn!("{e}; treating provider as unknown");
            Self::Unknown
        })
    }
}

fn default_active() -> bool {
    true
}

/// One configured identity provider within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProvider {
    /// Unique key of this provider within its tenant.
    pub origin_key: String,
    /// Provider kind; selects how `config` is decoded.
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the provider currently accepts logins.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Type-specific configuration as a JSON document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

impl IdentityProvider {
    /// Create an active provider with no configuration.
    pub fn new(origin_key: impl Into<String>, provider_type: ProviderType) -> Self {
        Self {
            origin_key: origin_key.into(),
            provider_type,
            name: None,
            active: true,
            config: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the raw JSON configuration.
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Set whether the provider is active.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
