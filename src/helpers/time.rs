use chrono::{DateTime, Utc};
use tokio::time::Duration;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Exponential backoff step: doubles `delay`, capped at `max`.
pub fn next_delay(delay: Duration, max: Duration) -> Duration {
    delay.saturating_mul(2).min(max)
}
