use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::error::StoreError;

/// Fixed key under which the bearer credential is persisted.
pub const TOKEN_KEY: &str = "jwt_token";

// 1. CredentialStore Contract
/// CredentialStore
///
/// Abstract contract over the client-local persistent key/value storage that holds the
/// bearer credential. Guards and loaders only ever see this trait, so the concrete
/// backing (a file on disk, or the in-memory fake in tests) can be swapped freely.
///
/// Reads are modeled as suspension points even though most backings answer immediately.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent or empty.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the key. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// CredentialState
///
/// The concrete type used to share credential storage across the application state.
pub type CredentialState = Arc<dyn CredentialStore>;

// 2. The Real Implementation (JSON file on local disk)
/// FileCredentialStore
///
/// Persists all keys as one flat JSON object. A missing file reads as an empty store.
/// Writes go to a uniquely named sibling file first and are then renamed over the
/// original, so a crash mid-write never leaves a truncated store behind.
///
/// `set` and `delete` are read-modify-write cycles over the whole file and are serialized
/// through a lock shared by every clone of the handle, so concurrent writers never drop
/// each other's keys.
#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("credentials");
        let tmp = self
            .path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        let bytes = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&tmp, bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.read_all().await?;
        Ok(entries.get(key).filter(|v| !v.is_empty()).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&entries).await
    }
}

// 3. The Mock Implementation (For Unit Tests)
/// MemoryCredentialStore
///
/// In-memory fake of `CredentialStore`. Lets guard and loader tests run without touching
/// the filesystem, and can simulate a broken store via `new_failing`.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
    /// When true, all operations return a simulated failure.
    pub should_fail: bool,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Pre-seeds the credential key, as if a login had already happened.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(TOKEN_KEY.to_string(), token.to_string());
        }
        store
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        if self.should_fail {
            return Err(StoreError::Unavailable(
                "Mock Storage Error: Simulation requested".to_string(),
            ));
        }
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("credential map poisoned".to_string()))
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.get(key).filter(|v| !v.is_empty()).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}
