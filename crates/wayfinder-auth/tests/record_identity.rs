//! Equality, hashing, and passive expiry of authentication records.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use secrecy::SecretString;
use wayfinder_auth::{
    Authentication, AuthenticationRecord, Authority, ManualClock, Principal, decode_record,
    encode_record,
};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn record(name: &str, authorities: &[&str]) -> AuthenticationRecord {
    AuthenticationRecord::new(
        Principal::new(format!("id-{name}"), name, "uaa"),
        authorities.iter().map(|a| Authority::from(*a)).collect(),
    )
}

#[test]
fn test_reissued_record_is_same_cache_key() {
    let first = record("marissa", &["openid"]).with_authenticated_at(Some(at(100)));
    let reissued = record("marissa", &["openid"])
        .with_authenticated_at(Some(at(9_000)))
        .with_expires_at(Some(at(10_000)))
        .with_credentials(SecretString::from("koala".to_string()));

    let mut cache = HashSet::new();
    cache.insert(first);
    assert!(cache.contains(&reissued));
    assert!(!cache.insert(reissued));
}

#[test]
fn test_different_principal_or_authorities_not_equal() {
    assert_ne!(record("marissa", &["openid"]), record("bob", &["openid"]));
    assert_ne!(
        record("marissa", &["openid"]),
        record("marissa", &["openid", "scim.read"])
    );
}

#[test]
fn test_expires_without_state_change() {
    let clock = ManualClock::new(at(1_000));
    let record = record("marissa", &["openid"]).with_expires_at(Some(at(1_300)));

    assert!(record.is_authenticated(&clock));
    clock.advance(Duration::minutes(5));
    assert!(!record.is_authenticated(&clock));
    assert!(record.authenticated_flag());
    assert_eq!(record.expires_at(), Some(at(1_300)));
}

#[test]
fn test_capability_trait_is_object_safe() {
    let record: Box<dyn Authentication> = Box::new(record("marissa", &["openid"]));
    assert_eq!(record.name(), "marissa");
    assert_eq!(record.authorities().len(), 1);
    assert!(record.is_valid_at(at(5)));
}

#[test]
fn test_shared_record_reads_across_threads() {
    let record = Arc::new(record("marissa", &["openid"]).with_expires_at(Some(at(2_000))));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let record = Arc::clone(&record);
            thread::spawn(move || record.is_authenticated_at(at(1_000 + i * 500)))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, true, false, false]);
}

#[test]
fn test_encode_decode_preserves_identity() {
    let original = record("marissa", &["openid", "uaa.user"])
        .with_authenticated_at(Some(at(1_700_000_000)))
        .with_expires_at(Some(at(1_700_000_600)));
    let decoded = decode_record(&encode_record(&original).unwrap()).unwrap();
    assert_eq!(decoded, original);
    assert_eq!(decoded.expires_at(), original.expires_at());
}

proptest! {
    #[test]
    fn test_validity_tracks_expiry(expiry in 1i64..4_000_000_000, now in 1i64..4_000_000_000) {
        let record = record("marissa", &["openid"]).with_expires_at(Some(at(expiry)));
        prop_assert_eq!(record.is_authenticated_at(at(now)), now < expiry);
    }
}
