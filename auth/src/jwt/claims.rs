use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// A fixed claim set: who the token is for, who issued it, and when it
/// stops being valid. Issuance and verification share this exact shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Lifetime of a session token.
    pub const TTL_HOURS: i64 = 24;

    /// Create claims for a subject, valid for [`Claims::TTL_HOURS`] from now.
    pub fn new(subject: impl ToString, issuer: impl ToString) -> Self {
        Self::issued_at(subject, issuer, Utc::now(), Duration::hours(Self::TTL_HOURS))
    }

    /// Create claims issued at `now` and expiring after `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Unique subject identifier
    /// * `issuer` - Issuer tag
    /// * `now` - Issuance instant
    /// * `ttl` - Validity period
    pub fn issued_at(
        subject: impl ToString,
        issuer: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Check if the token is expired at the given instant.
    ///
    /// A token is only valid while `exp` is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
