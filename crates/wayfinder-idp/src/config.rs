//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Patterns applied to local providers that declare no email domains.
///
/// Covers any domain with two, three, or four labels.
pub const DEFAULT_CATCH_ALL_PATTERNS: [&str; 3] = ["*.*", "*.*.*", "*.*.*.*"];

/// Settings for [`ProviderResolver`](crate::ProviderResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Patterns the implicit pass applies to local providers without declared domains.
    pub catch_all_patterns: Vec<String>,
    /// Whether compiled pattern sets are cached between calls.
    pub cache_compiled_patterns: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            catch_all_patterns: DEFAULT_CATCH_ALL_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            cache_compiled_patterns: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catch_all() {
        let config = ResolverConfig::default();
        assert_eq!(config.catch_all_patterns, vec!["*.*", "*.*.*", "*.*.*.*"]);
        assert!(config.cache_compiled_patterns);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ResolverConfig = toml::from_str("cache_compiled_patterns = false").unwrap();
        assert!(!config.cache_compiled_patterns);
        assert_eq!(config.catch_all_patterns.len(), 3);
    }
}
