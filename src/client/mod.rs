//! Entry point for every call against the upstream.
//!
//! A [`Client`] is cheap to clone; clones share the token manager, the HTTP
//! connection pool and the metrics registry.

pub mod envelope;
pub mod executor;

use std::future::Future;
use std::sync::Arc;

use http::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::auth::authenticator::{Authenticate, HttpAuthenticator};
use crate::auth::token_manager::TokenManager;
use crate::cache::file_store::FileTokenStore;
use crate::cache::token_cache::TokenCache;
use crate::cache::token_store::TokenStore;
use crate::client::executor::Executor;
use crate::config::settings::Config;
use crate::error::{Error, Result};
use crate::observability::metrics::Metrics;
use crate::services::order::Orders;
use crate::services::rate::Rates;
use crate::services::scan_form::ScanForms;
use crate::services::shipping_label::ShippingLabels;
use crate::services::user::Users;
use crate::utils::constants::{user_agent, PATH_GET_TOKEN};

struct Inner {
    config: Config,
    executor: Executor,
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
    cancel: Option<CancellationToken>,
}

impl Client {
    /// Client with a file-backed token cache under `config.cache_dir()`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let http = build_http(&config)?;
        let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.cache_dir()));
        let authenticator = HttpAuthenticator::new(
            http.clone(),
            format!("{}{}", config.base_url(), PATH_GET_TOKEN),
            config.token_valid_for(),
        )
        .into_shared();
        Self::assemble(config, http, store, authenticator)
    }

    /// Client with caller-supplied token storage and authenticator.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn TokenStore>,
        authenticator: Arc<dyn Authenticate>,
    ) -> Result<Self> {
        config.validate()?;
        let http = build_http(&config)?;
        Self::assemble(config, http, store, authenticator)
    }

    fn assemble(
        config: Config,
        http: reqwest::Client,
        store: Arc<dyn TokenStore>,
        authenticator: Arc<dyn Authenticate>,
    ) -> Result<Self> {
        let metrics = Metrics::new().map_err(|e| Error::Config(format!("metrics registry: {e}")))?;
        let cache = TokenCache::new(store, config.token_valid_for());
        let tokens = Arc::new(TokenManager::new(
            config.credential(),
            authenticator,
            cache,
            metrics.clone(),
        ));

        let executor = Executor {
            http,
            base_url: config.base_url(),
            auth_header: config.auth_header.clone(),
            auth_scheme: config.auth_scheme.trim().to_owned(),
            invalid_token_codes: config.invalid_token_codes.clone(),
            retry: config.retry_settings(),
            tokens,
            metrics,
            debug: config.debug,
        };
        debug!("client ready for {}", executor.base_url);

        Ok(Self {
            inner: Arc::new(Inner { config, executor }),
            cancel: None,
        })
    }

    /// Handle whose calls end with [`Error::Cancelled`] once `token` fires.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.inner.executor.metrics
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.inner.executor.tokens
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    pub fn rates(&self) -> Rates<'_> {
        Rates::new(self)
    }

    pub fn shipping_labels(&self) -> ShippingLabels<'_> {
        ShippingLabels::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn scan_forms(&self) -> ScanForms<'_> {
        ScanForms::new(self)
    }

    /// Raw call: posts `body` to `path` and decodes `result` as `T`.
    pub async fn call<B, T>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.cancellable(self.inner.executor.call(path, body)).await
    }

    async fn cancellable<F, T>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let Some(cancel) = &self.cancel else {
            return call.await;
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = call => result,
        }
    }
}

fn build_http(config: &Config) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let http = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout())
        .user_agent(user_agent())
        .build()?;
    Ok(http)
}
