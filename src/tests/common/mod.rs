pub use axum::Router;
pub use serde_json::{json, Value};
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::auth::authenticator::Authenticate;
use crate::auth::credential::Credential;
use crate::cache::token::Token;
use crate::config::settings::{Config, RetryConfig};
use crate::error::AuthError;
use crate::helpers::time::now;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Address nobody listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Config for credential K1/T1 against `base_url`, with millisecond backoff.
pub fn test_config(base_url: &str, cache_dir: &Path) -> Config {
    let mut config = Config::new("K1", "T1");
    config.base_url = Some(base_url.to_owned());
    config.cache_dir = Some(cache_dir.to_path_buf());
    config.timeout = 5;
    config.retry = Some(RetryConfig {
        attempts: Some(3),
        base_delay_ms: Some(10),
        max_delay_ms: Some(20),
    });
    config
}

pub fn ok(result: Value) -> Value {
    json!({"code": 200, "msg": "success", "result": result})
}

pub fn token_ok(token: &str) -> Value {
    ok(json!({
        "access_token": token,
        "user_info": {"u_id": 7, "u_account": "demo", "u_customer_code": "C007"}
    }))
}

pub fn user_info_body() -> Value {
    ok(json!({
        "code": "C007",
        "balance": 125.5,
        "sm_code": ["UPS-GROUND", "USPS-PRIORITY"],
        "address": [{
            "shipper_code": "S1",
            "shipper_name": "Warehouse",
            "shipper_address1": "1 Main St",
            "shipper_country": "US",
            "shipper_state_province": "CA",
            "shipper_city": "Ontario",
            "shipper_postal_code": 91761,
            "shipper_tel_phone": "9095550100"
        }]
    }))
}

/// Authenticator fake issuing `tok-1`, `tok-2`, ... and counting calls.
pub struct CountingAuthenticator {
    calls: AtomicUsize,
    delay: Duration,
    fail: bool,
    succeed_times: Option<usize>,
}

impl CountingAuthenticator {
    pub fn new() -> Self {
        Self { calls: AtomicUsize::new(0), delay: Duration::ZERO, fail: false, succeed_times: None }
    }

    /// Issues `n` tokens, then rejects every exchange.
    pub fn failing_after(n: usize) -> Self {
        Self { succeed_times: Some(n), ..Self::new() }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay, ..Self::new() }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::new() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticate for CountingAuthenticator {
    async fn authenticate(&self, _credential: &Credential) -> Result<Token, AuthError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail || self.succeed_times.is_some_and(|limit| n > limit) {
            return Err(AuthError::Rejected { code: 503, message: "service unavailable".to_owned() });
        }
        Ok(Token::new(format!("tok-{n}"), now(), chrono::Duration::hours(2)))
    }
}
