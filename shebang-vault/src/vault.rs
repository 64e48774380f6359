//! The key vault: validated CRUD over the persisted key list.

use crate::error::{ValidationError, VaultError, VaultResult};
use crate::record::{has_pem_markers, KeyRecord};
use crate::store::KeyStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Storage key the key list lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "keys";

/// Named private keys, persisted as one JSON document in a [`KeyStore`].
///
/// Every mutation reads the full list, changes it, and writes the full list
/// back. Mutations through one `KeyVault` are serialised; other writers on
/// the same store are not coordinated with, and the last write wins.
pub struct KeyVault {
    store: Arc<dyn KeyStore>,
    storage_key: String,
    write_lock: Mutex<()>,
}

impl KeyVault {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self::with_storage_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_storage_key(store: Arc<dyn KeyStore>, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Validates and stores a new key.
    ///
    /// Name and content are trimmed first. On any error the stored list is
    /// left exactly as it was.
    pub async fn add(&self, name: &str, content: &str) -> VaultResult<KeyRecord> {
        let name = name.trim();
        let content = content.trim();
        validate(name, content)?;

        let _guard = self.write_lock.lock().await;
        let mut keys = self.load().await?;

        if keys.iter().any(|k| k.name == name) {
            return Err(ValidationError::DuplicateName(name.to_string()).into());
        }

        let record = KeyRecord::new(name, content);
        keys.push(record.clone());
        self.persist(&keys).await?;

        info!("[VAULT] Added key '{}' ({})", record.name, record.fingerprint);
        Ok(record)
    }

    /// All keys in insertion order.
    pub async fn list(&self) -> VaultResult<Vec<KeyRecord>> {
        self.load().await
    }

    /// Removes the key at `index`, returning it.
    pub async fn remove(&self, index: usize) -> VaultResult<KeyRecord> {
        let _guard = self.write_lock.lock().await;
        let mut keys = self.load().await?;

        if index >= keys.len() {
            return Err(VaultError::NotFound {
                index,
                len: keys.len(),
            });
        }

        let removed = keys.remove(index);
        self.persist(&keys).await?;

        info!("[VAULT] Removed key '{}' ({})", removed.name, removed.fingerprint);
        Ok(removed)
    }

    /// The key at `index`.
    pub async fn get(&self, index: usize) -> VaultResult<KeyRecord> {
        let mut keys = self.load().await?;
        let len = keys.len();
        if index >= len {
            return Err(VaultError::NotFound { index, len });
        }
        Ok(keys.swap_remove(index))
    }

    /// The key with exactly this name, if any.
    pub async fn find(&self, name: &str) -> VaultResult<Option<KeyRecord>> {
        Ok(self.load().await?.into_iter().find(|k| k.name == name))
    }

    pub async fn len(&self) -> VaultResult<usize> {
        Ok(self.load().await?.len())
    }

    pub async fn is_empty(&self) -> VaultResult<bool> {
        Ok(self.len().await? == 0)
    }

    async fn load(&self) -> VaultResult<Vec<KeyRecord>> {
        match self.store.get(&self.storage_key).await? {
            Some(doc) => Ok(serde_json::from_str(&doc)?),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, keys: &[KeyRecord]) -> VaultResult<()> {
        let doc = serde_json::to_string(keys)?;
        self.store.set(&self.storage_key, doc).await?;
        debug!("[VAULT] Persisted {} keys under '{}'", keys.len(), self.storage_key);
        Ok(())
    }
}

fn validate(name: &str, content: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if content.is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    if !has_pem_markers(content) {
        return Err(ValidationError::InvalidPem);
    }
    Ok(())
}
