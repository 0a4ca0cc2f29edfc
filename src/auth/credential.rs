use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Application key/token pair identifying the caller to the upstream.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Credential {
    app_key: String,
    app_token: String,
}

impl Credential {
    pub fn new(app_key: impl Into<String>, app_token: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_token: app_token.into(),
        }
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// Cache key for this credential: hex SHA-256 over both halves.
    ///
    /// The separator keeps ("ab", "c") and ("a", "bc") apart.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.app_key.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.app_token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("app_key", &self.app_key)
            .field("app_token", &"<redacted>")
            .finish()
    }
}
