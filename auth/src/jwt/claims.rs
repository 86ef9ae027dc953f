use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried inside a bearer token.
///
/// Both fields are required: a token whose payload lacks `sub` or `exp`
/// fails to deserialize and is rejected as malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimSet {
    /// Subject (username the token was issued to)
    #[serde(rename = "sub")]
    pub subject: String,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl ClaimSet {
    /// Create claims for `subject` expiring `ttl` after `now`.
    ///
    /// # Arguments
    /// * `subject` - Username the token is issued to
    /// * `ttl` - Lifetime of the token (may be negative)
    /// * `now` - Issuance time
    ///
    /// # Returns
    /// `None` when the expiration falls outside the representable time range
    pub fn new(subject: impl ToString, ttl: Duration, now: DateTime<Utc>) -> Option<Self> {
        let expiration = now.checked_add_signed(ttl)?;

        Some(Self {
            subject: subject.to_string(),
            expires_at: expiration.timestamp(),
        })
    }

    /// Check if token is expired.
    ///
    /// A token is only valid strictly before its expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.expires_at <= current_timestamp
    }

    /// Expiration as a UTC datetime.
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}
