use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use http::StatusCode;
use tracing::{debug, info};

use crate::auth::credential::Credential;
use crate::cache::token::Token;
use crate::client::envelope::Envelope;
use crate::entity::token::AccessToken;
use crate::error::{business_message, AuthError};
use crate::helpers::time::now;

/// Exchanges a credential for a fresh token.
#[async_trait]
pub trait Authenticate: Send + Sync {
    async fn authenticate(&self, credential: &Credential) -> Result<Token, AuthError>;
}

/// `POST /getToken` against the upstream. One request, no retry, no caching.
pub struct HttpAuthenticator {
    http: reqwest::Client,
    url: String,
    valid_for: Duration,
}

impl HttpAuthenticator {
    pub fn new(http: reqwest::Client, url: String, valid_for: Duration) -> Self {
        Self { http, url, valid_for }
    }

    pub fn into_shared(self) -> Arc<dyn Authenticate> {
        Arc::new(self)
    }

    async fn exchange(&self, credential: &Credential) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self.http.post(&self.url).json(credential).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl Authenticate for HttpAuthenticator {
    async fn authenticate(&self, credential: &Credential) -> Result<Token, AuthError> {
        debug!("requesting token for app_key {}", credential.app_key());

        let (status, body) = self.exchange(credential).await?;

        let envelope: Envelope<AccessToken> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(AuthError::Rejected {
                    code: i64::from(status.as_u16()),
                    message: business_message(i64::from(status.as_u16()), status.canonical_reason().unwrap_or_default()),
                });
            }
            Err(err) => return Err(AuthError::Decode(err)),
        };

        if !envelope.is_success() {
            return Err(AuthError::Rejected {
                code: envelope.code,
                message: business_message(envelope.code, envelope.message()),
            });
        }

        let access = envelope.result.unwrap_or_default();
        let value = access.access_token.trim();
        if value.is_empty() {
            return Err(AuthError::MissingToken);
        }

        if let Some(user) = &access.user_info {
            info!("token acquired for account {} ({})", user.account, user.customer_code);
        } else {
            info!("token acquired");
        }
        Ok(Token::new(value.to_owned(), now(), self.valid_for))
    }
}
