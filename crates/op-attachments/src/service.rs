//! Attachment Service

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use op_core::config::AttachmentConfig;
use op_core::error::OpError;
use op_core::traits::Id;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::model::{Attachment, ContainerType, UploadedFile};
use crate::storage::{generate_disk_filename, MemoryStorage, Storage, StorageError};

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid file: {0}")]
    InvalidFile(String),
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },
}

impl From<AttachmentError> for OpError {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::Storage(e) => OpError::Internal(e.to_string()),
            other => {
                let mut errors = op_core::error::ValidationErrors::new();
                errors.add("attachments", other.to_string());
                OpError::Validation(errors)
            }
        }
    }
}

pub type AttachmentResult<T> = Result<T, AttachmentError>;

/// Attachment metadata persistence
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store a record, assigning its id
    async fn create(&self, attachment: Attachment) -> AttachmentResult<Attachment>;

    async fn for_container(&self, container_type: ContainerType, container_id: Id) -> AttachmentResult<Vec<Attachment>>;

    /// Remove and return the records of a container
    async fn delete_for_container(
        &self,
        container_type: ContainerType,
        container_id: Id,
    ) -> AttachmentResult<Vec<Attachment>>;
}

/// In-memory attachment store
pub struct MemoryAttachmentStore {
    attachments: RwLock<Vec<Attachment>>,
    next_id: AtomicI64,
}

impl Default for MemoryAttachmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAttachmentStore {
    pub fn new() -> Self {
        Self {
            attachments: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl AttachmentStore for MemoryAttachmentStore {
    async fn create(&self, mut attachment: Attachment) -> AttachmentResult<Attachment> {
        attachment.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.attachments.write().await.push(attachment.clone());
        Ok(attachment)
    }

    async fn for_container(&self, container_type: ContainerType, container_id: Id) -> AttachmentResult<Vec<Attachment>> {
        let attachments = self.attachments.read().await;
        Ok(attachments
            .iter()
            .filter(|a| a.container_type == container_type && a.container_id == container_id)
            .cloned()
            .collect())
    }

    async fn delete_for_container(
        &self,
        container_type: ContainerType,
        container_id: Id,
    ) -> AttachmentResult<Vec<Attachment>> {
        let mut attachments = self.attachments.write().await;
        let (removed, kept): (Vec<_>, Vec<_>) = attachments
            .drain(..)
            .partition(|a| a.container_type == container_type && a.container_id == container_id);
        *attachments = kept;
        Ok(removed)
    }
}

/// Attachment service
#[derive(Clone)]
pub struct AttachmentService {
    store: Arc<dyn AttachmentStore>,
    storage: Arc<dyn Storage>,
    max_size: u64,
}

impl AttachmentService {
    pub fn new(store: Arc<dyn AttachmentStore>, storage: Arc<dyn Storage>, config: &AttachmentConfig) -> Self {
        Self {
            store,
            storage,
            max_size: config.max_size,
        }
    }

    pub fn in_memory(config: &AttachmentConfig) -> Self {
        Self::new(Arc::new(MemoryAttachmentStore::new()), Arc::new(MemoryStorage::new()), config)
    }

    /// Attach uploaded files to a container.
    ///
    /// Every file is checked before anything is stored, so either all files
    /// are attached or none is.
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn attach_files(
        &self,
        container_type: ContainerType,
        container_id: Id,
        files: Vec<UploadedFile>,
        author_id: Id,
    ) -> AttachmentResult<Vec<Attachment>> {
        self.check_files(&files)?;

        let mut attached = Vec::with_capacity(files.len());
        for file in files {
            let content_type = file.content_type.clone().unwrap_or_else(|| {
                mime_guess::from_path(&file.filename)
                    .first_or_octet_stream()
                    .to_string()
            });
            let disk_filename = generate_disk_filename(&file.filename);
            let stored = self.storage.put(&disk_filename, file.data).await?;
            debug!(backend = self.storage.name(), key = %disk_filename, "file stored");

            let attachment = self
                .store
                .create(Attachment {
                    id: None,
                    container_type,
                    container_id,
                    filename: file.filename,
                    disk_filename,
                    filesize: stored.size,
                    content_type,
                    digest: stored.digest,
                    author_id,
                    description: file.description,
                    created_at: Utc::now(),
                })
                .await?;
            info!(id = ?attachment.id, filename = %attachment.filename, "attachment created");
            attached.push(attachment);
        }
        Ok(attached)
    }

    pub async fn for_container(&self, container_type: ContainerType, container_id: Id) -> AttachmentResult<Vec<Attachment>> {
        self.store.for_container(container_type, container_id).await
    }

    /// Remove the records and the stored contents of a container's files
    pub async fn delete_for_container(&self, container_type: ContainerType, container_id: Id) -> AttachmentResult<usize> {
        let removed = self.store.delete_for_container(container_type, container_id).await?;
        for attachment in &removed {
            self.storage.delete(&attachment.disk_filename).await?;
        }
        Ok(removed.len())
    }

    /// Reject the batch on its first blank name or oversized file
    pub fn check_files(&self, files: &[UploadedFile]) -> AttachmentResult<()> {
        files.iter().try_for_each(|file| self.check(file))
    }

    fn check(&self, file: &UploadedFile) -> AttachmentResult<()> {
        if file.filename.trim().is_empty() {
            return Err(AttachmentError::InvalidFile("filename can't be blank".to_string()));
        }
        if file.size() > self.max_size {
            return Err(AttachmentError::FileTooLarge {
                size: file.size(),
                max: self.max_size,
            });
        }
        Ok(())
    }
}
