//! Command implementations.
//!
//! Each command returns its report as a value; printing is left to `main`
//! so the commands stay testable.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wayfinder_auth::{AuthenticationRecord, Clock, SystemClock, decode_record};
use wayfinder_idp::{DomainPatterns, TenantDirectory};

use crate::error::{Error, Result};
use crate::tenant::load_tenant;

/// Providers eligible for one login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The email that was resolved
    pub email: String,
    /// The client, if one was given
    pub client: Option<String>,
    /// Origin keys of eligible providers, in configuration order
    pub providers: Vec<String>,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for origin_key in &self.providers {
            writeln!(f, "{origin_key}")?;
        }
        Ok(())
    }
}

/// Resolve `email` against a tenant file.
///
/// An empty resolution is reported as [`Error::NoProvider`].
pub fn cmd_resolve(tenant_path: &Path, client: Option<&str>, email: &str) -> Result<Resolution> {
    let tenant = load_tenant(tenant_path)?;
    resolve_in(&tenant, client, email)
}

/// Resolve `email` against an already loaded tenant.
pub fn resolve_in(
    tenant: &TenantDirectory,
    client: Option<&str>,
    email: &str,
) -> Result<Resolution> {
    let resolver = tenant.resolver();
    let providers: Vec<String> = tenant
        .resolve(&resolver, client, Some(email))
        .into_iter()
        .map(|p| p.origin_key.clone())
        .collect();

    if providers.is_empty() {
        return Err(Error::NoProvider {
            email: email.to_string(),
        });
    }

    Ok(Resolution {
        email: email.to_string(),
        client: client.map(str::to_string),
        providers,
    })
}

/// Whether `domain` matches any of `patterns`.
pub fn cmd_check_domain(patterns: &[String], domain: &str) -> Result<bool> {
    let set = DomainPatterns::compile(patterns)?;
    Ok(set.matches(domain))
}

/// Summary of a decoded authentication record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    /// Principal name
    pub name: String,
    /// Origin key of the authenticating provider
    pub origin: String,
    /// Granted authorities
    pub authorities: Vec<String>,
    /// When authentication happened
    pub authenticated_at: Option<DateTime<Utc>>,
    /// When the record expires
    pub expires_at: Option<DateTime<Utc>>,
    /// The instant validity was evaluated at
    pub evaluated_at: DateTime<Utc>,
    /// Whether the record is valid at `evaluated_at`
    pub valid: bool,
}

impl RecordReport {
    fn new(record: &AuthenticationRecord, now: DateTime<Utc>) -> Self {
        Self {
            name: record.name().to_string(),
            origin: record.principal().origin().to_string(),
            authorities: record
                .authorities()
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
            authenticated_at: record.authenticated_at(),
            expires_at: record.expires_at(),
            evaluated_at: now,
            valid: record.is_authenticated_at(now),
        }
    }
}

impl fmt::Display for RecordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn instant(at: Option<DateTime<Utc>>, unset: &str) -> String {
            at.map_or_else(|| unset.to_string(), |t| t.to_rfc3339())
        }

        writeln!(f, "name:             {}", self.name)?;
        writeln!(f, "origin:           {}", self.origin)?;
        writeln!(f, "authorities:      {}", self.authorities.join(", "))?;
        writeln!(f, "authenticated at: {}", instant(self.authenticated_at, "unset"))?;
        writeln!(f, "expires at:       {}", instant(self.expires_at, "never"))?;
        writeln!(
            f,
            "valid:            {} (at {})",
            self.valid,
            self.evaluated_at.to_rfc3339()
        )
    }
}

/// Decode the record in `path` and evaluate it at `at`, or now.
pub fn cmd_inspect_record(path: &Path, at: Option<DateTime<Utc>>) -> Result<RecordReport> {
    let json = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let record = decode_record(&json)?;
    let now = at.unwrap_or_else(|| SystemClock.now());
    Ok(RecordReport::new(&record, now))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tenant::parse_tenant;

    const TENANT: &str = r#"
[[providers]]
origin_key = "uaa"
type = "local"

[[providers]]
origin_key = "corp-ldap"
type = "ldap"
config = '{"baseUrl": "ldaps://ldap.acme.com", "emailDomain": ["acme.com"]}'

[[clients]]
client_id = "none"
allowed_providers = []
"#;

    #[test]
    fn test_resolve_in_explicit_match() {
        let tenant = parse_tenant(TENANT).unwrap();
        let resolution = resolve_in(&tenant, None, "marissa@acme.com").unwrap();
        assert_eq!(resolution.providers, vec!["corp-ldap"]);
        assert_eq!(resolution.to_string(), "corp-ldap\n");
    }

    #[test]
    fn test_resolve_in_empty_is_no_provider() {
        let tenant = parse_tenant(TENANT).unwrap();
        let err = resolve_in(&tenant, Some("none"), "marissa@acme.com").unwrap_err();
        assert!(matches!(err, Error::NoProvider { .. }));
    }

    #[test]
    fn test_check_domain() {
        let patterns = vec!["*.acme.com".to_string()];
        assert!(cmd_check_domain(&patterns, "eu.acme.com").unwrap());
        assert!(!cmd_check_domain(&patterns, "acme.com").unwrap());
    }

    #[test]
    fn test_record_report_display() {
        let record = AuthenticationRecord::new(
            wayfinder_auth::Principal::new("u-1", "marissa", "uaa"),
            vec!["openid".into()],
        );
        let now = DateTime::from_timestamp(0, 0).unwrap();
        let text = RecordReport::new(&record, now).to_string();
        assert!(text.contains("marissa"));
        assert!(text.contains("expires at:       never"));
        assert!(text.contains("valid:            true"));
    }
}
