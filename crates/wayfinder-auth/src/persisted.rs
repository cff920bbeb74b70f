//! Persisted/transmitted representation of an authentication record.
//!
//! [`PersistedRecord`] mirrors the wire shape: every field is optional and
//! timestamps are epoch milliseconds with `-1` (or any value `<= 0`) meaning
//! unset. Converting it into an [`AuthenticationRecord`] is where absent
//! principals or authorities are rejected, so decoding concerns stay out of
//! the record type itself. Credentials are never persisted.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};
use crate::principal::{AuthenticationDetails, Authority, Principal};
use crate::record::AuthenticationRecord;

const UNSET: i64 = -1;

fn unset() -> i64 {
    UNSET
}

/// Wire shape of an [`AuthenticationRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    /// The authenticated principal.
    #[serde(default)]
    pub principal: Option<Principal>,
    /// Granted authorities.
    #[serde(default)]
    pub authorities: Option<Vec<Authority>>,
    /// Request details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<AuthenticationDetails>,
    /// The authenticated flag.
    #[serde(default)]
    pub authenticated: bool,
    /// Authentication time in epoch millis, `<= 0` when unset.
    #[serde(default = "unset")]
    pub authenticated_time: i64,
    /// Expiry in epoch millis, `<= 0` when the record never expires.
    #[serde(default = "unset")]
    pub expires_at: i64,
    /// External group names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_groups: Option<BTreeSet<String>>,
}

impl TryFrom<PersistedRecord> for AuthenticationRecord {
    type Error = AuthError;

    fn try_from(persisted: PersistedRecord) -> Result<Self> {
        let principal = persisted.principal.ok_or(AuthError::MissingPrincipal)?;
        let authorities = persisted
            .authorities
            .ok_or(AuthError::MissingAuthorities)?;

        let mut record = AuthenticationRecord::new(principal, authorities)
            .with_authenticated(persisted.authenticated)
            .with_authenticated_at(from_millis(persisted.authenticated_time)?)
            .with_expires_at(from_millis(persisted.expires_at)?);
        if let Some(details) = persisted.details {
            record = record.with_details(details);
        }
        if let Some(groups) = persisted.external_groups {
            record = record.with_external_groups(groups);
        }
        Ok(record)
    }
}

impl From<&AuthenticationRecord> for PersistedRecord {
    fn from(record: &AuthenticationRecord) -> Self {
        Self {
            principal: Some(record.principal().clone()),
            authorities: Some(record.authorities().to_vec()),
            details: record.details().cloned(),
            authenticated: record.authenticated_flag(),
            authenticated_time: to_millis(record.authenticated_at()),
            expires_at: to_millis(record.expires_at()),
            external_groups: record.external_groups().cloned(),
        }
    }
}

/// Decode a record from its JSON representation.
///
/// # Errors
///
/// Returns [`AuthError::Decode`] for malformed JSON,
/// [`AuthError::MissingPrincipal`] / [`AuthError::MissingAuthorities`] when
/// either required field is absent or null, and
/// [`AuthError::InvalidTimestamp`] for out-of-range timestamps.
pub fn decode_record(json: &str) -> Result<AuthenticationRecord> {
    let persisted: PersistedRecord = serde_json::from_str(json)?;
    let record = AuthenticationRecord::try_from(persisted)?;
    log::debug!("Decoded authentication record for '{}'", record.name());
    Ok(record)
}

/// Encode a record as JSON. Credentials are omitted.
///
/// # Errors
///
/// Returns [`AuthError::Encode`] if serialization fails.
pub fn encode_record(record: &AuthenticationRecord) -> Result<String> {
    serde_json::to_string(&PersistedRecord::from(record)).map_err(AuthError::Encode)
}

fn from_millis(millis: i64) -> Result<Option<DateTime<Utc>>> {
    if millis <= 0 {
        return Ok(None);
    }
    DateTime::from_timestamp_millis(millis)
        .map(Some)
        .ok_or(AuthError::InvalidTimestamp(millis))
}

fn to_millis(at: Option<DateTime<Utc>>) -> i64 {
    at.map_or(UNSET, |at| at.timestamp_millis())
}
