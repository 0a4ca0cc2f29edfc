//! Attaches a usable token to every outbound call.
//!
//! Lookup order: in-memory token, durable cache, then a fresh exchange. Only
//! one task at a time may get past the in-memory check; the others wait on the
//! refresh lock and pick up whatever the winner stored.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::auth::authenticator::Authenticate;
use crate::auth::credential::Credential;
use crate::cache::token::Token;
use crate::cache::token_cache::TokenCache;
use crate::error::AuthError;
use crate::helpers::time::now;
use crate::observability::metrics::Metrics;
use crate::resilience::attempt::Attempt;

pub struct TokenManager {
    credential: Credential,
    fingerprint: String,
    authenticator: Arc<dyn Authenticate>,
    cache: TokenCache,
    current: RwLock<Option<Token>>,
    refresh_lock: Mutex<()>,
    metrics: Metrics,
}

impl TokenManager {
    pub fn new(
        credential: Credential,
        authenticator: Arc<dyn Authenticate>,
        cache: TokenCache,
        metrics: Metrics,
    ) -> Self {
        let fingerprint = credential.fingerprint();
        Self {
            credential,
            fingerprint,
            authenticator,
            cache,
            current: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            metrics,
        }
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Token for the given attempt of a call.
    pub async fn resolve(&self, attempt: &Attempt) -> Result<Token, AuthError> {
        if !attempt.force_refresh() {
            if let Some(token) = self.usable_in_memory().await {
                return Ok(token);
            }
        }

        let _guard = self.refresh_lock.lock().await;

        if attempt.force_refresh() {
            // a token other than the rejected one means a concurrent caller already refreshed
            let current = self.current.read().await.clone();
            if let Some(token) = current {
                if Some(token.value.as_str()) != attempt.rejected_token() && !token.is_expired_at(now()) {
                    debug!("token already refreshed by a concurrent call");
                    return Ok(token);
                }
            }
            if let Some(rejected) = attempt.rejected_token() {
                self.discard(rejected).await;
            }
        } else {
            if let Some(token) = self.usable_in_memory().await {
                return Ok(token);
            }
            if let Some(token) = self.cache.read(&self.fingerprint).await {
                debug!("token adopted from cache, expires at {}", token.expires_at());
                self.metrics.token_cache_hits.inc();
                *self.current.write().await = Some(token.clone());
                return Ok(token);
            }
            self.metrics.token_cache_misses.inc();
        }

        self.refresh().await
    }

    /// Caller must hold the refresh lock.
    async fn refresh(&self) -> Result<Token, AuthError> {
        self.metrics.auth_requests.inc();
        let token = match self.authenticator.authenticate(&self.credential).await {
            Ok(token) => token,
            Err(err) => {
                self.metrics.auth_failures.inc();
                warn!("authentication failed: {err}");
                return Err(err);
            }
        };

        *self.current.write().await = Some(token.clone());
        if self.cache.write(&self.fingerprint, &token).await {
            debug!("token persisted to cache");
        }
        info!("token refreshed, valid until {}", token.expires_at());
        Ok(token)
    }

    /// Forgets a token the upstream refused, in memory and in the durable cache.
    /// Caller must hold the refresh lock.
    async fn discard(&self, rejected: &str) {
        {
            let mut current = self.current.write().await;
            if current.as_ref().is_some_and(|t| t.value == rejected) {
                *current = None;
            }
        }
        if self.cache.discard(&self.fingerprint, rejected).await {
            debug!("rejected token removed from cache");
        }
    }

    async fn usable_in_memory(&self) -> Option<Token> {
        let current = self.current.read().await;
        current.as_ref().filter(|t| !t.is_expired_at(now())).cloned()
    }

    /// Token currently held in memory, expired or not.
    pub async fn current(&self) -> Option<Token> {
        self.current.read().await.clone()
    }

    /// Drops the in-memory token; the durable cache is left alone.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
    }
}
