//! Loading tenant files.
//!
//! A tenant file is TOML:
//!
//! ```toml
//! [resolver]
//! catch_all_patterns = ["*.*", "*.*.*", "*.*.*.*"]
//!
//! [[providers]]
//! origin_key = "uaa"
//! type = "local"
//!
//! [[providers]]
//! origin_key = "corp-ldap"
//! type = "ldap"
//! config = '{"baseUrl": "ldaps://ldap.acme.com", "emailDomain": ["acme.com"]}'
//!
//! [[clients]]
//! client_id = "portal"
//! allowed_providers = ["uaa"]
//! ```

use std::path::Path;

use wayfinder_idp::TenantDirectory;

use crate::error::{Error, Result};

/// Read and parse a tenant file.
pub fn load_tenant(path: &Path) -> Result<TenantDirectory> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let tenant = parse_tenant(&content).map_err(|source| Error::Tenant {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Loaded {} provider(s) and {} client(s) from {}",
        tenant.providers.len(),
        tenant.clients.len(),
        path.display()
    );
    Ok(tenant)
}

/// Parse tenant TOML.
pub fn parse_tenant(content: &str) -> std::result::Result<TenantDirectory, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_tenant() {
        let tenant = parse_tenant("").unwrap();
        assert!(tenant.providers.is_empty());
        assert_eq!(tenant.resolver.catch_all_patterns.len(), 3);
    }

    #[test]
    fn test_parse_rejects_missing_origin_key() {
        assert!(parse_tenant("[[providers]]\ntype = \"ldap\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_tenant(Path::new("/nonexistent/tenant.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
