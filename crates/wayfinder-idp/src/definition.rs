//! Type-specific provider configuration.
//!
//! A provider's `config` is a JSON document whose shape depends on the
//! provider type. Each supported type decodes into its own definition;
//! all of them may declare an `emailDomain` list used for routing.
//!
//! [`email_domains`] never fails: a configuration that does not decode is
//! logged and treated as declaring no domains, so one broken provider entry
//! cannot block logins routed to the others.

use serde::{Deserialize, Serialize};

use crate::error::{IdpError, Result};
use crate::provider::{IdentityProvider, ProviderType};

/// Decoded configuration for a provider that supports email-domain routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderDefinition {
    /// The broker's own user directory
    Local(LocalDefinition),
    /// LDAP directory
    Ldap(LdapDefinition),
    /// SAML identity provider
    Saml(SamlDefinition),
}

impl ProviderDefinition {
    /// Declared email-domain patterns, if any.
    pub fn email_domains(&self) -> Option<&[String]> {
        match self {
            Self::Local(d) => d.email_domain.as_deref(),
            Self::Ldap(d) => d.email_domain.as_deref(),
            Self::Saml(d) => d.email_domain.as_deref(),
        }
    }
}

/// Configuration of the local user directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDefinition {
    /// Email-domain patterns routed to this provider
    #[serde(default)]
    pub email_domain: Option<Vec<String>>,
    /// Whether users are managed outside the broker
    #[serde(default)]
    pub disable_internal_user_management: bool,
}

/// Configuration of an LDAP provider.
///
/// Connection fields are optional here; only `email_domain` takes part in
/// routing, so a config that omits them still routes on its domains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapDefinition {
    /// LDAP server URL, e.g. `ldaps://ldap.acme.com:636`
    #[serde(default)]
    pub base_url: Option<String>,
    /// Pattern used to build a user DN from the login name
    #[serde(default)]
    pub user_dn_pattern: Option<String>,
    /// DN used to bind for searches
    #[serde(default)]
    pub bind_user_dn: Option<String>,
    /// Attribute holding the user's email address
    #[serde(default)]
    pub mail_attribute_name: Option<String>,
    /// Email-domain patterns routed to this provider
    #[serde(default)]
    pub email_domain: Option<Vec<String>>,
}

/// Configuration of a SAML provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlDefinition {
    /// Metadata URL or inline metadata XML
    #[serde(default)]
    pub meta_data_location: Option<String>,
    /// Alias of the IdP entity
    #[serde(default)]
    pub idp_entity_alias: Option<String>,
    /// Requested NameID format
    #[serde(default)]
    pub name_id: Option<String>,
    /// Email-domain patterns routed to this provider
    #[serde(default)]
    pub email_domain: Option<Vec<String>>,
}

impl IdentityProvider {
    /// Decode this provider's configuration according to its type.
    ///
    /// Returns `Ok(None)` when there is no configuration or the type has no
    /// definition that participates in domain routing.
    ///
    /// # Errors
    ///
    /// Returns [`IdpError::ConfigDecode`] when the configuration is not valid
    /// for the provider's type.
    pub fn definition(&self) -> Result<Option<ProviderDefinition>> {
        let Some(raw) = self.config.as_deref() else {
            return Ok(None);
        };

        let decoded = match self.provider_type {
            ProviderType::Local => serde_json::from_str(raw).map(ProviderDefinition::Local),
            ProviderType::Ldap => serde_json::from_str(raw).map(ProviderDefinition::Ldap),
            ProviderType::Saml => serde_json::from_str(raw).map(ProviderDefinition::Saml),
            ProviderType::Keystone | ProviderType::Unknown => return Ok(None),
        };

        decoded.map(Some).map_err(|source| IdpError::ConfigDecode {
            origin_key: self.origin_key.clone(),
            provider_type: self.provider_type,
            source,
        })
    }
}

/// Declared email-domain patterns of `provider`.
///
/// `None` when the provider declares none, its type has no such concept, or
/// its configuration is malformed (the latter is logged).
pub fn email_domains(provider: &IdentityProvider) -> Option<Vec<String>> {
    match provider.definition() {
        Ok(definition) => definition.and_then(|d| d.email_domains().map(<[String]>::to_vec)),
        Err(e) => {
            log::error!("{e}");
            None
        }
    }
}
