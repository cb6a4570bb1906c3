//! Storage
//!
//! Holds attachment contents by key.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// What storage reports about a written file
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub size: u64,
    /// Hex encoded SHA-256
    pub digest: String,
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StoredFile>;

    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

pub fn digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// In-memory storage
#[derive(Default)]
pub struct MemoryStorage {
    files: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<StoredFile> {
        let stored = StoredFile {
            size: data.len() as u64,
            digest: digest(&data),
        };
        self.files.write().await.insert(key.to_string(), data);
        Ok(stored)
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.files
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.files.write().await.remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Unique storage key keeping the extension of `filename`
pub fn generate_disk_filename(filename: &str) -> String {
    let uuid = Uuid::new_v4();
    match Path::new(filename).extension().and_then(|s| s.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", uuid, ext),
        _ => uuid.to_string(),
    }
}
