use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::fs;

use crate::error::{CacheError, CacheResult};

/// Filesystem cache handle shared by every provider.
///
/// Cloning is cheap; clones share the per-key write locks.
#[derive(Clone, Debug)]
pub struct CacheStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    root: PathBuf,
    write_locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl CacheStore {
    /// Nothing is created on disk until the first `put`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                root: root.into(),
                write_locks: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Location of the file backing `(namespace, key)`
    pub fn path_for(&self, namespace: &str, key: &str) -> CacheResult<PathBuf> {
        validate("namespace", namespace)?;
        validate("key", key)?;
        Ok(self.inner.root.join(namespace).join(key))
    }

    /// Read the bytes stored for `(namespace, key)`, `None` when absent
    pub async fn get(&self, namespace: &str, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let path = self.path_for(namespace, key)?;

        match fs::read(&path).await {
            Ok(data) => {
                tracing::debug!("Cache hit {namespace}/{key} ({} bytes)", data.len());
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Cache miss {namespace}/{key}");
                Ok(None)
            }
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    /// Persist `data` for `(namespace, key)`, replacing any previous entry
    pub async fn put(&self, namespace: &str, key: &str, data: &[u8]) -> CacheResult<()> {
        let path = self.path_for(namespace, key)?;
        let lock = self.write_lock(&path);

        let result = {
            let _guard = lock.lock().await;
            self.write_entry(namespace, key, &path, data).await
        };

        self.release_write_lock(&path, lock);
        result
    }

    async fn write_entry(
        &self,
        namespace: &str,
        key: &str,
        path: &Path,
        data: &[u8],
    ) -> CacheResult<()> {
        let dir = self.inner.root.join(namespace);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| CacheError::io(&dir, e))?;

        match fs::try_exists(path).await {
            Ok(true) => tracing::warn!("Overwriting existing cache entry {namespace}/{key}"),
            Ok(false) => {}
            Err(e) => return Err(CacheError::io(path, e)),
        }

        // Readers must never observe a half-written entry
        let tmp = dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, data)
            .await
            .map_err(|e| CacheError::io(&tmp, e))?;
        fs::rename(&tmp, path)
            .await
            .map_err(|e| CacheError::io(path, e))?;

        tracing::debug!("Saved {} bytes to cache {namespace}/{key}", data.len());
        Ok(())
    }

    fn write_locks(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>> {
        self.inner
            .write_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_lock(&self, path: &Path) -> Arc<tokio::sync::Mutex<()>> {
        self.write_locks()
            .entry(path.to_path_buf())
            .or_default()
            .clone()
    }

    /// Forget the lock for `path` once no other writer holds or awaits it
    fn release_write_lock(&self, path: &Path, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.write_locks();
        drop(lock);
        if locks.get(path).is_some_and(|entry| Arc::strong_count(entry) == 1) {
            locks.remove(path);
        }
    }
}

/// Names become single path components under the root
fn validate(kind: &'static str, value: &str) -> CacheResult<()> {
    let valid = !value.is_empty()
        && !value.starts_with('.')
        && !value.contains(['/', '\\', '\0']);

    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidName {
            kind,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join("cache"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_get_missing_entry() {
        let (store, _temp) = create_test_store();

        let data = store.get("pytest", "somefile.bin").await.unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (store, _temp) = create_test_store();

        store
            .put("pytest", "somefile.bin", b"some_test_data")
            .await
            .unwrap();

        let data = store.get("pytest", "somefile.bin").await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"some_test_data"[..]));
    }

    #[tokio::test]
    async fn test_put_creates_directories() {
        let (store, _temp) = create_test_store();
        assert!(!store.root().exists());

        store.put("wp", "example.mp3", &[0u8, 1, 2, 255]).await.unwrap();

        let path = store.path_for("wp", "example.mp3").unwrap();
        assert!(path.is_file());
        assert_eq!(std::fs::read(path).unwrap(), vec![0u8, 1, 2, 255]);
    }

    #[tokio::test]
    async fn test_overwrite_keeps_last_write() {
        let (store, _temp) = create_test_store();

        store
            .put("pytest", "somefile.bin", b"some_other_data-some_test_data")
            .await
            .unwrap();
        store
            .put("pytest", "somefile.bin", b"some_test_data")
            .await
            .unwrap();

        let data = store.get("pytest", "somefile.bin").await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"some_test_data"[..]));
    }

    #[tokio::test]
    async fn test_namespaces_are_partitioned() {
        let (store, _temp) = create_test_store();

        store.put("oxford", "word_test.json", b"{}").await.unwrap();

        assert!(store.get("freedict", "word_test.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_names_rejected() {
        let (store, _temp) = create_test_store();

        for key in ["", "../escape", "a/b", ".hidden", "a\\b"] {
            let result = store.put("ns", key, b"x").await;
            assert!(
                matches!(result, Err(CacheError::InvalidName { kind: "key", .. })),
                "key {key:?} should be rejected"
            );
        }
        assert!(matches!(
            store.get("..", "key").await,
            Err(CacheError::InvalidName { kind: "namespace", .. })
        ));
    }

    #[tokio::test]
    async fn test_unavailable_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("not-a-dir");
        std::fs::write(&root, b"file").unwrap();
        let store = CacheStore::new(&root);

        let result = store.put("ns", "key", b"data").await;
        assert!(matches!(result, Err(CacheError::Io { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_writes_same_key() {
        let (store, _temp) = create_test_store();
        let payloads: Vec<Vec<u8>> = (0..16u8).map(|i| vec![i; 4096]).collect();

        let mut tasks = tokio::task::JoinSet::new();
        for payload in payloads.clone() {
            let store = store.clone();
            tasks.spawn(async move { store.put("ns", "shared", &payload).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let data = store.get("ns", "shared").await.unwrap().unwrap();
        assert!(payloads.contains(&data));
        assert!(store.write_locks().is_empty());
    }

    #[tokio::test]
    async fn test_write_locks_released_after_put() {
        let (store, _temp) = create_test_store();

        for i in 0..10 {
            store.put("ns", &format!("key_{i}"), b"data").await.unwrap();
        }
        assert!(store.write_locks().is_empty());

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("not-a-dir");
        std::fs::write(&root, b"file").unwrap();
        let broken = CacheStore::new(&root);
        assert!(broken.put("ns", "key", b"data").await.is_err());
        assert!(broken.write_locks().is_empty());
    }
}
