//! Authentication records for Wayfinder.
//!
//! Provides:
//! - [`AuthenticationRecord`]: The outcome of a completed authentication
//! - [`Authentication`]: Narrow capability trait over a record
//! - [`Principal`] / [`Authority`]: Who was authenticated and what they may do
//! - [`Clock`]: Injected notion of "now" used for passive expiry
//! - [`PersistedRecord`]: Transmitted/persisted shape, decoded into a record
//! - [`AuthError`]: Auth-specific error types

#![forbid(unsafe_code)]

mod clock;
mod error;
mod persisted;
mod principal;
mod record;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AuthError, Result};
pub use persisted::{PersistedRecord, decode_record, encode_record};
pub use principal::{AuthenticationDetails, Authority, Principal};
pub use record::AuthenticationRecord;

use chrono::{DateTime, Utc};

/// Capability shared by anything that represents a proven identity.
///
/// Downstream consumers (session issuance, authorization checks) depend on
/// this trait rather than on the concrete record type.
pub trait Authentication {
    /// The authenticated principal.
    fn principal(&self) -> &Principal;

    /// Permissions granted to the principal, in grant order.
    fn authorities(&self) -> &[Authority];

    /// Stable, human-meaningful identifier of the authentication.
    fn name(&self) -> &str {
        self.principal().name()
    }

    /// Whether the authentication is still valid at `now`.
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool;
}
