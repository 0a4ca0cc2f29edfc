#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Duration;

    use crate::auth::credential::Credential;
    use crate::cache::file_store::FileTokenStore;
    use crate::cache::token::{clamp_valid_duration, Token};
    use crate::cache::token_cache::TokenCache;
    use crate::cache::token_store::{MemoryTokenStore, StoredToken, TokenStore};
    use crate::helpers::time::now;

    struct BrokenStore;

    #[async_trait]
    impl TokenStore for BrokenStore {
        async fn load(&self, _key: &str) -> anyhow::Result<Option<StoredToken>> {
            anyhow::bail!("disk on fire")
        }

        async fn save(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("read-only filesystem")
        }

        async fn remove(&self, _key: &str) -> anyhow::Result<()> {
            anyhow::bail!("read-only filesystem")
        }
    }

    #[test]
    fn validity_window_is_clamped() {
        assert_eq!(clamp_valid_duration(0), Duration::hours(1));
        assert_eq!(clamp_valid_duration(2), Duration::hours(2));
        assert_eq!(clamp_valid_duration(10), Duration::hours(10));
        assert_eq!(clamp_valid_duration(48), Duration::hours(10));
    }

    #[test]
    fn token_expires_strictly_after_window() {
        let acquired = now();
        let token = Token::new("abc".into(), acquired, Duration::hours(2));

        assert!(!token.is_expired_at(acquired));
        assert!(!token.is_expired_at(acquired + Duration::hours(2)));
        assert!(token.is_expired_at(acquired + Duration::hours(2) + Duration::seconds(1)));
    }

    #[test]
    fn token_debug_hides_value() {
        let token = Token::new("super-secret".into(), now(), Duration::hours(1));
        assert!(!format!("{token:?}").contains("super-secret"));
    }

    #[tokio::test]
    async fn read_honours_write_time_and_window() {
        let store = MemoryTokenStore::new();
        let cache = TokenCache::new(Arc::new(store.clone()), clamp_valid_duration(2));
        let written = now() - Duration::hours(1);
        store.insert("fp", "abc", written).await;

        let hit = cache.read("fp").await.expect("fresh token");
        assert_eq!(hit.value, "abc");
        assert_eq!(hit.acquired_at, written);

        assert!(cache.read_at("fp", written + Duration::hours(2)).await.is_some());
        assert!(cache
            .read_at("fp", written + Duration::hours(2) + Duration::seconds(1))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn stale_empty_and_missing_entries_are_misses() {
        let store = MemoryTokenStore::new();
        let cache = TokenCache::new(Arc::new(store.clone()), clamp_valid_duration(2));
        store.insert("stale", "old", now() - Duration::hours(3)).await;
        store.insert("empty", "", now()).await;

        assert!(cache.read("stale").await.is_none());
        assert!(cache.read("empty").await.is_none());
        assert!(cache.read("missing").await.is_none());
    }

    #[tokio::test]
    async fn storage_failures_degrade_silently() {
        let cache = TokenCache::new(Arc::new(BrokenStore), clamp_valid_duration(2));
        let token = Token::new("abc".into(), now(), cache.valid_for());

        assert!(cache.read("fp").await.is_none());
        assert!(!cache.write("fp", &token).await);
        assert!(!cache.discard("fp", "abc").await);
    }

    #[tokio::test]
    async fn file_store_round_trip_and_permissions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileTokenStore::new(dir.path().join("nested"));

        assert!(store.load("fp").await.expect("load").is_none());

        store.save("fp", "token-value-123").await.expect("save");
        let stored = store.load("fp").await.expect("load").expect("entry");
        assert_eq!(stored.value, "token-value-123");
        assert!(now() - stored.stored_at < Duration::minutes(1));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(store.path_for("fp"))
                .expect("meta")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "permissions mismatch (expected 0600)");
        }
    }

    #[tokio::test]
    async fn failed_save_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileTokenStore::new(dir.path());
        // a non-empty directory where the token file should go makes the final step fail
        let target = store.path_for("fp");
        std::fs::create_dir_all(target.join("occupied")).expect("mkdir");

        assert!(store.save("fp", "abc").await.is_err());

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["fp.token".to_owned()], "temporary file left behind");
    }

    #[tokio::test]
    async fn discard_only_removes_the_rejected_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileTokenStore::new(dir.path());
        let cache = TokenCache::new(Arc::new(store.clone()), clamp_valid_duration(2));
        store.save("fp", "newer").await.expect("save");

        assert!(!cache.discard("fp", "rejected").await);
        assert_eq!(cache.read("fp").await.expect("kept").value, "newer");

        assert!(cache.discard("fp", "newer").await);
        assert!(!store.path_for("fp").exists());
        assert!(cache.read("fp").await.is_none());

        // nothing left to remove
        store.remove("fp").await.expect("missing entry is fine");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writes_never_leave_partial_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Arc::new(FileTokenStore::new(dir.path()));

        let values: Vec<String> = (0..16).map(|i| format!("token-{i}-{}", "x".repeat(512))).collect();
        let mut handles = Vec::new();
        for value in values.clone() {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.save("shared", &value).await }));
        }
        for handle in handles {
            handle.await.expect("join").expect("save");
        }

        let stored = store.load("shared").await.expect("load").expect("entry");
        assert!(values.contains(&stored.value), "file holds a torn write");

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["shared.token".to_owned()], "temporary files left behind");
    }

    #[tokio::test]
    async fn credentials_are_cached_in_isolation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = TokenCache::new(Arc::new(FileTokenStore::new(dir.path())), clamp_valid_duration(2));

        let first = Credential::new("K1", "T1");
        let second = Credential::new("K2", "T2");
        let shifted = Credential::new("K1T", "1");
        let fingerprints: HashSet<String> =
            [&first, &second, &shifted].iter().map(|c| c.fingerprint()).collect();
        assert_eq!(fingerprints.len(), 3);

        assert!(cache.write(&first.fingerprint(), &Token::new("one".into(), now(), cache.valid_for())).await);
        assert!(cache.write(&second.fingerprint(), &Token::new("two".into(), now(), cache.valid_for())).await);

        assert_eq!(cache.read(&first.fingerprint()).await.expect("first").value, "one");
        assert_eq!(cache.read(&second.fingerprint()).await.expect("second").value, "two");
        assert!(cache.read(&shifted.fingerprint()).await.is_none());
    }
}
