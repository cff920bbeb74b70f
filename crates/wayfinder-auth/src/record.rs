//! The outcome of a completed authentication.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::Authentication;
use crate::clock::Clock;
use crate::principal::{AuthenticationDetails, Authority, Principal};

/// A proven identity with its granted authorities and an optional expiry.
///
/// Equality and hashing consider only the principal and the authorities, so
/// two records issued for the same identity and permissions are
/// interchangeable as map or cache keys regardless of timestamps or
/// credentials.
///
/// Validity is recomputed against the supplied time on every query; a record
/// stops being authenticated once `now` reaches `expires_at` without any
/// explicit invalidation step.
///
/// The only mutators are [`set_authenticated`](Self::set_authenticated) and
/// [`set_external_groups`](Self::set_external_groups). Both take `&mut self`,
/// so a record shared behind an `Arc` is read-only.
#[derive(Debug, Clone)]
pub struct AuthenticationRecord {
    principal: Principal,
    authorities: Vec<Authority>,
    credentials: Option<SecretString>,
    details: Option<AuthenticationDetails>,
    authenticated: bool,
    authenticated_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    external_groups: Option<BTreeSet<String>>,
}

impl AuthenticationRecord {
    /// Create an authenticated record with no expiry.
    pub fn new(principal: Principal, authorities: Vec<Authority>) -> Self {
        Self {
            principal,
            authorities,
            credentials: None,
            details: None,
            authenticated: true,
            authenticated_at: None,
            expires_at: None,
            external_groups: None,
        }
    }

    /// Create an authenticated record stamped with the clock's current time.
    pub fn issue(principal: Principal, authorities: Vec<Authority>, clock: &dyn Clock) -> Self {
        Self::new(principal, authorities).with_authenticated_at(Some(clock.now()))
    }

    /// Attach the credentials that were presented.
    pub fn with_credentials(mut self, credentials: SecretString) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Attach request details.
    pub fn with_details(mut self, details: AuthenticationDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Set the initial authenticated flag.
    pub fn with_authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    /// Record when authentication happened. Instants at or before the epoch mean unset.
    pub fn with_authenticated_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.authenticated_at = at.filter(is_set);
        self
    }

    /// Set the expiry. Instants at or before the epoch mean the record never expires.
    pub fn with_expires_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = at.filter(is_set);
        self
    }

    /// Attach provider-supplied external group names.
    pub fn with_external_groups(mut self, groups: BTreeSet<String>) -> Self {
        self.external_groups = Some(groups);
        self
    }

    /// The authenticated principal.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Granted authorities, in grant order.
    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }

    /// The principal's name.
    pub fn name(&self) -> &str {
        self.principal.name()
    }

    /// Presented credentials, usually dropped once authentication completes.
    pub fn credentials(&self) -> Option<&SecretString> {
        self.credentials.as_ref()
    }

    /// Request details.
    pub fn details(&self) -> Option<&AuthenticationDetails> {
        self.details.as_ref()
    }

    /// When authentication happened, if recorded.
    pub fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.authenticated_at
    }

    /// When the record expires; `None` means never.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// External group names supplied by the provider.
    pub fn external_groups(&self) -> Option<&BTreeSet<String>> {
        self.external_groups.as_ref()
    }

    /// The raw authenticated flag, ignoring expiry.
    pub fn authenticated_flag(&self) -> bool {
        self.authenticated
    }

    /// Whether the record is valid at `now`.
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.authenticated && self.expires_at.is_none_or(|expires| now < expires)
    }

    /// Whether the record is valid according to `clock`.
    pub fn is_authenticated(&self, clock: &dyn Clock) -> bool {
        self.is_authenticated_at(clock.now())
    }

    /// Force the authenticated flag. Clearing it invalidates the record
    /// before its expiry; setting it never extends validity past `expires_at`.
    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }

    /// Replace the external group names.
    pub fn set_external_groups(&mut self, groups: Option<BTreeSet<String>>) {
        self.external_groups = groups;
    }
}

fn is_set(at: &DateTime<Utc>) -> bool {
    at.timestamp_millis() > 0
}

impl PartialEq for AuthenticationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.authorities == other.authorities && self.principal == other.principal
    }
}

impl Eq for AuthenticationRecord {}

impl Hash for AuthenticationRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.authorities.hash(state);
        self.principal.hash(state);
    }
}

impl Authentication for AuthenticationRecord {
    fn principal(&self) -> &Principal {
        &self.principal
    }

    fn authorities(&self) -> &[Authority] {
        &self.authorities
    }

    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.is_authenticated_at(now)
    }
}
