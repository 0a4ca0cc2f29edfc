use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::helpers::time::now;

/// Raw cache entry: the token string and when it was written.
#[derive(Debug, Clone)]
pub struct StoredToken {
    pub value: String,
    pub stored_at: DateTime<Utc>,
}

/// Keyed persistence for token values.
///
/// Keys are credential fingerprints. Implementations judge nothing about
/// freshness; `TokenCache` applies the expiry policy on top.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self, key: &str) -> anyhow::Result<Option<StoredToken>>;

    async fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Deletes the entry; a missing entry is not an error.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// Process-local store. Entries live as long as the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    inner: Arc<RwLock<HashMap<String, StoredToken>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry with an explicit write time.
    pub async fn insert(&self, key: &str, value: &str, stored_at: DateTime<Utc>) {
        let mut map = self.inner.write().await;
        map.insert(
            key.to_owned(),
            StoredToken { value: value.to_owned(), stored_at },
        );
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self, key: &str) -> anyhow::Result<Option<StoredToken>> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.insert(key, value, now()).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.inner.write().await.remove(key);
        Ok(())
    }
}
