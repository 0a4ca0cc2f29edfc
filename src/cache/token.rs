use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Shortest validity window the cache accepts, whatever the configuration says.
pub const MIN_VALID_HOURS: u64 = 1;
/// Longest validity window; the upstream expiry metadata is not trusted beyond it.
pub const MAX_VALID_HOURS: u64 = 10;

/// Bearer token issued by the upstream `/getToken` endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub acquired_at: DateTime<Utc>,
    pub valid_for: Duration,
}

impl Token {
    pub fn new(value: String, acquired_at: DateTime<Utc>, valid_for: Duration) -> Self {
        Self { value, acquired_at, valid_for }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.acquired_at + self.valid_for
    }

    /// A token is expired strictly after `acquired_at + valid_for`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }
}

// never print the token value
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("acquired_at", &self.acquired_at)
            .field("valid_for", &self.valid_for)
            .finish()
    }
}

/// Clamps the configured token lifetime (hours) to the accepted window.
pub fn clamp_valid_duration(hours: u64) -> Duration {
    let hours = hours.clamp(MIN_VALID_HOURS, MAX_VALID_HOURS);
    Duration::hours(hours as i64)
}
