//! Selection of the providers eligible to authenticate a login attempt.
//!
//! [`ProviderResolver::resolve`] filters in stages:
//!
//! 1. A blank email, or no active providers, yields nothing.
//! 2. The client's allow-list, when present, keeps only listed origin keys.
//! 3. Without an `@` in the email, the client-scoped set is the answer.
//! 4. Explicit pass: providers whose declared domains match the email domain.
//!    If any match, they are the answer.
//! 5. Implicit pass: declared domains again, plus the catch-all patterns for
//!    local providers that declare none.
//!
//! Several providers may match; ties are returned as-is for the caller to
//! arbitrate. An empty result is the normal "cannot determine provider"
//! outcome, not an error.

use crate::client::{ClientDescriptor, allowed_origins};
use crate::config::ResolverConfig;
use crate::definition::email_domains;
use crate::domain::DomainMatcher;
use crate::provider::{IdentityProvider, ProviderType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Explicit,
    Implicit,
}

/// Routes a login attempt to its eligible identity providers.
///
/// Safe to share between threads; `resolve` takes `&self` and the only
/// shared state is the compiled-pattern cache.
#[derive(Debug)]
pub struct ProviderResolver {
    config: ResolverConfig,
    matcher: DomainMatcher,
}

impl ProviderResolver {
    /// Create a resolver from `config`.
    pub fn new(config: ResolverConfig) -> Self {
        let matcher = if config.cache_compiled_patterns {
            DomainMatcher::new()
        } else {
            DomainMatcher::uncached()
        };
        Self { config, matcher }
    }

    /// The resolver's configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The domain matcher, including its cache.
    pub fn matcher(&self) -> &DomainMatcher {
        &self.matcher
    }

    /// Providers among `active` eligible to authenticate `email` for `client`.
    ///
    /// Order of `active` is preserved in the result.
    pub fn resolve<'a, I>(
        &self,
        active: I,
        client: Option<&ClientDescriptor>,
        email: Option<&str>,
    ) -> Vec<&'a IdentityProvider>
    where
        I: IntoIterator<Item = &'a IdentityProvider>,
    {
        let Some(email) = email.filter(|e| !e.trim().is_empty()) else {
            return Vec::new();
        };

        let mut candidates: Vec<&IdentityProvider> = active.into_iter().collect();
        if candidates.is_empty() {
            return candidates;
        }

        if let Some(allowed) = allowed_origins(client) {
            candidates.retain(|p| allowed.contains(&p.origin_key));
            log::debug!(
                "{} provider(s) left after allow-list of client '{}'",
                candidates.len(),
                client.map_or("", |c| c.client_id.as_str())
            );
        }

        let Some((_, domain)) = email.split_once('@') else {
            return candidates;
        };

        let declared: Vec<(&IdentityProvider, Option<Vec<String>>)> = candidates
            .into_iter()
            .map(|p| (p, email_domains(p)))
            .collect();

        let explicit = self.filter_pass(&declared, domain, Pass::Explicit);
        if !explicit.is_empty() {
            log::debug!(
                "{} provider(s) explicitly match domain '{domain}'",
                explicit.len()
            );
            return explicit;
        }

        let implicit = self.filter_pass(&declared, domain, Pass::Implicit);
        log::debug!(
            "{} provider(s) implicitly match domain '{domain}'",
            implicit.len()
        );
        implicit
    }

    fn filter_pass<'a>(
        &self,
        declared: &[(&'a IdentityProvider, Option<Vec<String>>)],
        domain: &str,
        pass: Pass,
    ) -> Vec<&'a IdentityProvider> {
        declared
            .iter()
            .filter(|(provider, domains)| {
                self.effective_patterns(provider.provider_type, domains.as_deref(), pass)
                    .is_some_and(|patterns| self.matcher.matches(patterns, domain))
            })
            .map(|(provider, _)| *provider)
            .collect()
    }

    fn effective_patterns<'s>(
        &'s self,
        provider_type: ProviderType,
        declared: Option<&'s [String]>,
        pass: Pass,
    ) -> Option<&'s [String]> {
        match (pass, declared) {
            (_, Some(patterns)) => Some(patterns),
            (Pass::Implicit, None) if provider_type == ProviderType::Local => {
                Some(self.config.catch_all_patterns.as_slice())
            }
            _ => None,
        }
    }
}

impl Default for ProviderResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}
