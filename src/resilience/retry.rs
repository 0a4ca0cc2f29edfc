use std::fmt::Display;

use tokio::time::{sleep, Duration};
use tracing::{error, warn};

use crate::helpers::time::next_delay;

/// Transport-level retry policy: bounded attempts with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    pub attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetrySettings {
    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempts are used up.
    ///
    /// `should_retry` is only consulted when another attempt remains.
    pub async fn run_with_retry<F, Fut, T, E, P>(&self, mut operation: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: Display,
        P: Fn(&E) -> bool,
    {
        let attempts = self.attempts.max(1);
        let max_delay = Duration::from_millis(self.max_delay_ms);
        let mut delay = Duration::from_millis(self.base_delay_ms).min(max_delay);

        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts && should_retry(&e) => {
                    warn!("attempt {attempt}/{attempts} failed, retrying in {delay:?}: {e}");
                    sleep(delay).await;
                    delay = next_delay(delay, max_delay);
                    attempt += 1;
                }
                Err(e) => {
                    if attempt > 1 {
                        error!("all {attempt} attempts failed: {e}");
                    }
                    return Err(e);
                }
            }
        }
    }
}

/// Failures worth another send: the request may not have reached the upstream.
pub fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}
