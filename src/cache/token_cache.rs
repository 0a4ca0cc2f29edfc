use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::cache::token::Token;
use crate::cache::token_store::TokenStore;
use crate::helpers::time::now;

/// Durable token cache keyed by credential fingerprint.
///
/// Freshness is judged from the store's write time and the clamped validity
/// window only. Storage failures degrade to a miss on read and to a log line
/// on write: a missing token can always be re-acquired.
#[derive(Clone)]
pub struct TokenCache {
    store: Arc<dyn TokenStore>,
    valid_for: Duration,
}

impl TokenCache {
    pub fn new(store: Arc<dyn TokenStore>, valid_for: Duration) -> Self {
        Self { store, valid_for }
    }

    pub fn valid_for(&self) -> Duration {
        self.valid_for
    }

    /// Get token if it exists and is not expired
    pub async fn read(&self, fingerprint: &str) -> Option<Token> {
        self.read_at(fingerprint, now()).await
    }

    pub async fn read_at(&self, fingerprint: &str, now: DateTime<Utc>) -> Option<Token> {
        let stored = match self.store.load(fingerprint).await {
            Ok(Some(stored)) => stored,
            Ok(None) => return None,
            Err(err) => {
                warn!("token cache read failed, treating as miss: {err:#}");
                return None;
            }
        };
        if stored.value.is_empty() {
            debug!("cached token is empty");
            return None;
        }

        let token = Token::new(stored.value, stored.stored_at, self.valid_for);
        if token.is_expired_at(now) {
            debug!("cached token expired at {}", token.expires_at());
            return None;
        }
        Some(token)
    }

    /// Drops the entry for `fingerprint` if it still holds `rejected`, so that
    /// neither this process nor the next one adopts it again. Best-effort.
    pub async fn discard(&self, fingerprint: &str, rejected: &str) -> bool {
        match self.store.load(fingerprint).await {
            Ok(Some(stored)) if stored.value == rejected => {}
            Ok(_) => return false,
            Err(err) => {
                warn!("token cache read failed, rejected token not discarded: {err:#}");
                return false;
            }
        }
        match self.store.remove(fingerprint).await {
            Ok(()) => true,
            Err(err) => {
                warn!("token cache remove failed: {err:#}");
                false
            }
        }
    }

    /// Best-effort write; returns whether the token was persisted.
    pub async fn write(&self, fingerprint: &str, token: &Token) -> bool {
        match self.store.save(fingerprint, &token.value).await {
            Ok(()) => true,
            Err(err) => {
                warn!("token cache write failed, token kept in memory only: {err:#}");
                false
            }
        }
    }
}
