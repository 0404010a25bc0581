use std::{
    collections::HashMap,
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU32, Ordering},
};

use tokio::sync::Mutex;

use crate::error::BridgeError;

pub const ACCESS_TOKEN_KEY: &str = "access-token";
pub const REFRESH_TOKEN_KEY: &str = "refresh-token";

/// Durable string key-value storage for the token pair.
///
/// Only single-key atomicity is expected. Callers write the two tokens as
/// separate operations and tolerate readers seeing one updated before the other.
pub trait TokenStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, BridgeError>> + Send;

    fn put(&self, key: &str, value: &str) -> impl Future<Output = Result<(), BridgeError>> + Send;
}

/// Stores each key as a plain-text file named after the key.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl TokenStore for FileTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        match async_fs::read_to_string(self.key_path(key)).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        async_fs::create_dir_all(&self.dir).await?;

        // unique temp name so concurrent writers never share a partial file
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_path = self
            .dir
            .join(format!(".{key}.{}.{seq}.tmp", std::process::id()));
        if let Err(e) = async_fs::write(&tmp_path, value).await {
            let _ = async_fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        if let Err(e) = async_fs::rename(&tmp_path, self.key_path(key)).await {
            let _ = async_fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-process store, lost on exit.
#[derive(Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    /// Copy of everything currently stored.
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.values.lock().await.clone()
    }
}

impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
