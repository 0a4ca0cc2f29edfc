use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::debug;

use crate::cache::token_store::{StoredToken, TokenStore};
use crate::utils::constants::{TOKEN_FILE_EXTENSION, TOKEN_FILE_MODE};

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// One file per credential fingerprint under `dir`.
///
/// The write time is the file's modification time. Writes go to a unique
/// temporary file that is renamed over the target, so readers see either the
/// previous token or the new one.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{TOKEN_FILE_EXTENSION}"))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!("{key}.{}.{seq}.tmp", std::process::id()))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self, key: &str) -> Result<Option<StoredToken>> {
        let path = self.path_for(key);
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no cached token file at {}", path.display());
                return Ok(None);
            }
            Err(err) => return Err(err).with_context(|| format!("stat {}", path.display())),
        };
        let modified = metadata
            .modified()
            .with_context(|| format!("modification time of {}", path.display()))?;
        let value = fs::read_to_string(&path)
            .await
            .with_context(|| format!("read {}", path.display()))?;

        Ok(Some(StoredToken {
            value: value.trim().to_owned(),
            stored_at: DateTime::<Utc>::from(modified),
        }))
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create cache dir {}", self.dir.display()))?;

        let tmp = self.tmp_path_for(key);
        fs::write(&tmp, value.as_bytes())
            .await
            .with_context(|| format!("write {}", tmp.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(err) = fs::set_permissions(&tmp, std::fs::Permissions::from_mode(TOKEN_FILE_MODE)).await {
                let _ = fs::remove_file(&tmp).await;
                return Err(err).with_context(|| format!("set permissions on {}", tmp.display()));
            }
        }

        let path = self.path_for(key);
        if let Err(err) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err).with_context(|| format!("rename into {}", path.display()));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
        }
    }
}
