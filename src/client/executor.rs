//! One logical domain call: token, send, evaluate, maybe once more.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::auth::token_manager::TokenManager;
use crate::client::envelope::Envelope;
use crate::error::{Error, Result};
use crate::observability::metrics::Metrics;
use crate::resilience::attempt::{evaluate, Attempt, Verdict};
use crate::resilience::retry::{is_transient, RetrySettings};

pub struct Executor {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth_header: String,
    pub(crate) auth_scheme: String,
    pub(crate) invalid_token_codes: Vec<i64>,
    pub(crate) retry: RetrySettings,
    pub(crate) tokens: Arc<TokenManager>,
    pub(crate) metrics: Metrics,
    pub(crate) debug: bool,
}

impl Executor {
    /// Posts `body` to `path` and decodes the envelope's `result`.
    ///
    /// The same body is resubmitted at most once, after the upstream rejected
    /// the token of the first attempt.
    pub async fn call<B, T>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let payload = match body {
            Some(body) => serde_json::to_value(body)?,
            None => Value::Object(Default::default()),
        };
        self.metrics.domain_requests.with_label_values(&[path]).inc();

        let mut attempt = Attempt::first();
        loop {
            let token = self.tokens.resolve(&attempt).await.map_err(|err| {
                self.failed(path, "auth");
                Error::Auth(err)
            })?;

            debug!("POST {path} (attempt {})", attempt.number());
            if self.debug {
                trace!("{path} request: {payload}");
            }
            let (status, text) = self.send(&url, &token.value, &payload).await.map_err(|err| {
                self.failed(path, "transport");
                Error::Transport(err)
            })?;
            if self.debug {
                trace!("{path} response ({status}): {text}");
            }

            let envelope: Envelope = match serde_json::from_str(&text) {
                Ok(envelope) => envelope,
                Err(_) if !status.is_success() => {
                    self.failed(path, "business");
                    return Err(Error::business(
                        i64::from(status.as_u16()),
                        status.canonical_reason().unwrap_or_default(),
                    ));
                }
                Err(err) => {
                    self.failed(path, "decode");
                    return Err(Error::Decode(err));
                }
            };

            match evaluate(&attempt, &token.value, envelope.code, envelope.message(), &self.invalid_token_codes) {
                Verdict::Done => {
                    return serde_json::from_value(envelope.result.unwrap_or(Value::Null)).map_err(|err| {
                        self.failed(path, "decode");
                        Error::Decode(err)
                    });
                }
                Verdict::RetryPending(next) => {
                    warn!("{path} rejected the token (code {}), re-authenticating", envelope.code);
                    self.metrics.invalid_token_retries.inc();
                    attempt = next;
                }
                Verdict::Failed(err) => {
                    let reason = match err {
                        Error::InvalidToken { .. } => "invalid_token",
                        _ => "business",
                    };
                    self.failed(path, reason);
                    return Err(err);
                }
            }
        }
    }

    async fn send(&self, url: &str, token: &str, payload: &Value) -> std::result::Result<(StatusCode, String), reqwest::Error> {
        let header_value = self.header_value(token);
        let header_value = &header_value;
        let sends = &AtomicU32::new(0);

        self.retry
            .run_with_retry(
                || async move {
                    if sends.fetch_add(1, Ordering::Relaxed) > 0 {
                        self.metrics.transport_retries.inc();
                    }
                    let response = self
                        .http
                        .post(url)
                        .header(self.auth_header.as_str(), header_value.as_str())
                        .json(payload)
                        .send()
                        .await?;
                    let status = response.status();
                    let text = response.text().await?;
                    Ok::<_, reqwest::Error>((status, text))
                },
                is_transient,
            )
            .await
    }

    fn header_value(&self, token: &str) -> String {
        if self.auth_scheme.is_empty() {
            token.to_owned()
        } else {
            format!("{} {}", self.auth_scheme, token)
        }
    }

    fn failed(&self, path: &str, reason: &str) {
        self.metrics.domain_failures.with_label_values(&[path, reason]).inc();
    }
}
