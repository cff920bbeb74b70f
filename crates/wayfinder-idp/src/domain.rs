//! Wildcard domain patterns.
//!
//! A pattern is a domain name in which `*` stands for any run of characters,
//! dots included, and every other character is literal. Matching is anchored
//! to the whole candidate and ignores case.
//!
//! | Pattern      | Matches                           | Does not match |
//! |--------------|-----------------------------------|----------------|
//! | `acme.com`   | `acme.com`, `ACME.com`            | `mail.acme.com`|
//! | `*.acme.com` | `mail.acme.com`, `a.b.acme.com`   | `acme.com`     |
//! | `*.*`        | `foo.bar`, `a.b.c.d`              | `localhost`    |
//!
//! [`DomainMatcher`] caches compiled sets keyed by their pattern list. Cached
//! sets are shared as immutable `Arc`s; clearing the cache swaps the map and
//! never touches a set a reader already holds.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use regex::{RegexSet, RegexSetBuilder};

use crate::error::{IdpError, Result};

/// A compiled set of domain patterns.
#[derive(Debug, Clone)]
pub struct DomainPatterns {
    set: RegexSet,
}

impl DomainPatterns {
    /// Compile `patterns` into a matchable set.
    ///
    /// # Errors
    ///
    /// Returns [`IdpError::Pattern`] if the compiled set exceeds the regex
    /// size limits.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let set = RegexSetBuilder::new(patterns.iter().map(|p| wildcard_to_regex(p.as_ref())))
            .case_insensitive(true)
            .build()
            .map_err(|source| IdpError::Pattern {
                patterns: patterns
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(", "),
                source,
            })?;
        Ok(Self { set })
    }

    /// Whether any pattern matches the whole of `domain`.
    pub fn matches(&self, domain: &str) -> bool {
        self.set.is_match(domain)
    }

    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Whether the set has no patterns (and so matches nothing).
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("^(?:{body})$")
}

/// Tests domains against pattern lists, optionally caching compiled sets.
///
/// The cache is keyed by the pattern list itself and is never evicted on its
/// own: every distinct list seen stays until [`DomainMatcher::forget`] or
/// [`DomainMatcher::clear`]. Callers that edit provider domains at runtime
/// should forget the old list when they replace it.
#[derive(Debug)]
pub struct DomainMatcher {
    cache: Option<RwLock<HashMap<Vec<String>, Arc<DomainPatterns>>>>,
}

impl DomainMatcher {
    /// A matcher that caches compiled sets.
    pub fn new() -> Self {
        Self {
            cache: Some(RwLock::new(HashMap::new())),
        }
    }

    /// A matcher that compiles on every call.
    pub fn uncached() -> Self {
        Self { cache: None }
    }

    /// Compiled set for `patterns`, from the cache when available.
    ///
    /// # Errors
    ///
    /// Returns [`IdpError::Pattern`] if the patterns do not compile.
    pub fn compiled(&self, patterns: &[String]) -> Result<Arc<DomainPatterns>> {
        let Some(cache) = &self.cache else {
            return DomainPatterns::compile(patterns).map(Arc::new);
        };

        if let Some(hit) = cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(patterns)
        {
            return Ok(Arc::clone(hit));
        }

        let compiled = Arc::new(DomainPatterns::compile(patterns)?);
        let mut guard = cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(guard.entry(patterns.to_vec()).or_insert(compiled)))
    }

    /// Whether `domain` matches any of `patterns`.
    ///
    /// Patterns that fail to compile are logged and match nothing.
    pub fn matches(&self, patterns: &[String], domain: &str) -> bool {
        match self.compiled(patterns) {
            Ok(set) => set.matches(domain),
            Err(e) => {
                log::warn!("Ignoring domain patterns: {e}");
                false
            }
        }
    }

    /// Number of cached pattern sets.
    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| {
            cache.read().unwrap_or_else(PoisonError::into_inner).len()
        })
    }

    /// Drop the cached set for `patterns`, returning whether one was cached.
    pub fn forget(&self, patterns: &[String]) -> bool {
        self.cache.as_ref().is_some_and(|cache| {
            cache
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(patterns)
                .is_some()
        })
    }

    /// Drop every cached set. Sets already handed out stay valid.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            let fresh = HashMap::new();
            *cache.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        }
    }
}

impl Default for DomainMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn compile(patterns: &[&str]) -> DomainPatterns {
        DomainPatterns::compile(patterns).unwrap()
    }

    #[test]
    fn test_literal_pattern_matches_whole_domain() {
        let set = compile(&["acme.com"]);
        assert!(set.matches("acme.com"));
        assert!(!set.matches("mail.acme.com"));
        assert!(!set.matches("acme.com.evil.org"));
        assert!(!set.matches("acme.co"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let set = compile(&["Acme.COM"]);
        assert!(set.matches("acme.com"));
        assert!(set.matches("ACME.com"));
    }

    #[test]
    fn test_dot_is_literal() {
        let set = compile(&["acme.com"]);
        assert!(!set.matches("acmexcom"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let set = compile(&["a+b(c)?.com"]);
        assert!(set.matches("a+b(c)?.com"));
        assert!(!set.matches("aab.com"));
        assert!(!set.matches("abc.com"));
    }

    #[test]
    fn test_star_spans_labels() {
        let set = compile(&["*.acme.com"]);
        assert!(set.matches("mail.acme.com"));
        assert!(set.matches("eu.mail.acme.com"));
        assert!(!set.matches("acme.com"));
    }

    #[test]
    fn test_star_matches_empty_run() {
        let set = compile(&["acme*.com"]);
        assert!(set.matches("acme.com"));
        assert!(set.matches("acme-corp.com"));
    }

    #[test]
    fn test_catch_all_vectors() {
        let set = compile(&["*.*", "*.*.*", "*.*.*.*"]);
        assert!(set.matches("foo.bar"));
        assert!(set.matches("mail.foo.bar"));
        assert!(set.matches("a.mail.foo.bar"));
        assert!(set.matches("a.b.c.d.e"));
        assert!(!set.matches("localhost"));
        assert!(!set.matches(""));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = DomainPatterns::compile::<&str>(&[]).unwrap();
        assert!(set.is_empty());
        assert!(!set.matches("acme.com"));
    }

    #[test]
    fn test_any_pattern_in_set_matches() {
        let set = compile(&["acme.com", "acme.org"]);
        assert_eq!(set.len(), 2);
        assert!(set.matches("acme.org"));
    }

    #[test]
    fn test_matcher_caches_compiled_sets() {
        let matcher = DomainMatcher::new();
        let patterns = vec!["acme.com".to_string()];
        let first = matcher.compiled(&patterns).unwrap();
        let second = matcher.compiled(&patterns).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(matcher.cached_len(), 1);
    }

    #[test]
    fn test_clear_keeps_handed_out_sets_valid() {
        let matcher = DomainMatcher::new();
        let patterns = vec!["acme.com".to_string()];
        let held = matcher.compiled(&patterns).unwrap();
        matcher.clear();
        assert_eq!(matcher.cached_len(), 0);
        assert!(held.matches("acme.com"));
        let rebuilt = matcher.compiled(&patterns).unwrap();
        assert!(!Arc::ptr_eq(&held, &rebuilt));
    }

    #[test]
    fn test_edited_domains_leave_old_entry_until_forgotten() {
        let matcher = DomainMatcher::new();
        let before = vec!["acme.com".to_string()];
        let after = vec!["acme.com".to_string(), "acme.org".to_string()];
        assert!(matcher.matches(&before, "acme.com"));
        assert!(matcher.matches(&after, "acme.org"));
        assert_eq!(matcher.cached_len(), 2);

        assert!(matcher.forget(&before));
        assert!(!matcher.forget(&before));
        assert_eq!(matcher.cached_len(), 1);
        assert!(!DomainMatcher::uncached().forget(&after));
    }

    #[test]
    fn test_uncached_matcher() {
        let matcher = DomainMatcher::uncached();
        assert!(matcher.matches(&["*.acme.com".to_string()], "mail.acme.com"));
        assert_eq!(matcher.cached_len(), 0);
    }

    #[test]
    fn test_wildcard_to_regex_escapes_segments() {
        assert_eq!(wildcard_to_regex("*.acme.com"), r"^(?:.*\.acme\.com)$");
        assert_eq!(wildcard_to_regex("a+b"), r"^(?:a\+b)$");
    }
}
