//! A tenant's identity providers, registered clients, and resolver settings.
//!
//! This is the in-memory snapshot the resolver reads from. Loading it from
//! storage is up to the caller; it deserializes from any serde format.

use serde::{Deserialize, Serialize};

use crate::client::ClientDescriptor;
use crate::config::ResolverConfig;
use crate::provider::IdentityProvider;
use crate::resolver::ProviderResolver;

/// Snapshot of one tenant's routing inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDirectory {
    /// Resolver settings for this tenant.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Every configured provider, active or not.
    #[serde(default)]
    pub providers: Vec<IdentityProvider>,
    /// Registered clients.
    #[serde(default)]
    pub clients: Vec<ClientDescriptor>,
}

impl TenantDirectory {
    /// Providers currently accepting logins, in configuration order.
    pub fn active_providers(&self) -> impl Iterator<Item = &IdentityProvider> {
        self.providers.iter().filter(|p| p.active)
    }

    /// Provider with the given origin key.
    pub fn provider(&self, origin_key: &str) -> Option<&IdentityProvider> {
        self.providers.iter().find(|p| p.origin_key == origin_key)
    }

    /// Client with the given id.
    pub fn client(&self, client_id: &str) -> Option<&ClientDescriptor> {
        self.clients.iter().find(|c| c.client_id == client_id)
    }

    /// A resolver configured from this tenant's settings.
    pub fn resolver(&self) -> ProviderResolver {
        ProviderResolver::new(self.resolver.clone())
    }

    /// Eligible active providers for `email` logging in to `client_id`.
    ///
    /// An unknown client id is treated as no client, i.e. unrestricted.
    pub fn resolve(
        &self,
        resolver: &ProviderResolver,
        client_id: Option<&str>,
        email: Option<&str>,
    ) -> Vec<&IdentityProvider> {
        let client = client_id.and_then(|id| {
            let client = self.client(id);
            if client.is_none() {
                log::warn!("Unknown client '{id}', resolving without client restrictions");
            }
            client
        });
        resolver.resolve(self.active_providers(), client, email)
    }
}
