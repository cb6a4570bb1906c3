//! Journal Service
//!
//! Writes and reads the journals of work packages.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use op_core::error::OpError;
use op_core::traits::Id;
use op_models::WorkPackage;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::journal::{Journal, JournalType};
use crate::snapshot::JournalData;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Work package has not been saved")]
    Unsaved,
    #[error("Invalid data: {0}")]
    InvalidData(#[from] serde_json::Error),
}

impl From<JournalError> for OpError {
    fn from(err: JournalError) -> Self {
        OpError::Internal(err.to_string())
    }
}

pub type JournalResult<T> = Result<T, JournalError>;

/// Journal persistence
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Store a journal with the snapshot it was computed from; assigns the id
    async fn create(&self, journal: Journal, data: JournalData) -> JournalResult<Journal>;

    /// Journals of one record, oldest first
    async fn for_journable(&self, journable_type: JournalType, journable_id: Id) -> JournalResult<Vec<Journal>>;

    /// Newest journal of one record with its snapshot
    async fn latest(
        &self,
        journable_type: JournalType,
        journable_id: Id,
    ) -> JournalResult<Option<(Journal, JournalData)>>;

    async fn delete_for_journable(&self, journable_type: JournalType, journable_id: Id) -> JournalResult<usize>;
}

/// Journal service for work packages
#[derive(Clone)]
pub struct JournalService {
    store: Arc<dyn JournalStore>,
}

impl JournalService {
    pub fn new(store: Arc<dyn JournalStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryJournalStore::new()))
    }

    /// Write the first journal of a freshly created work package
    pub async fn record_creation(
        &self,
        work_package: &WorkPackage,
        user_id: Id,
        notes: Option<String>,
    ) -> JournalResult<Journal> {
        let id = work_package.id.ok_or(JournalError::Unsaved)?;
        let data = JournalData::from_work_package(work_package)?;
        let journal = Journal::new(JournalType::WorkPackage, id, 1, user_id).with_notes(notes);

        let journal = self.store.create(journal, data).await?;
        debug!(work_package_id = id, "initial journal recorded");
        Ok(journal)
    }

    /// Journal the changes since the previous journal.
    ///
    /// Nothing is written when no attribute changed and there are no notes.
    pub async fn record_update(
        &self,
        work_package: &WorkPackage,
        user_id: Id,
        notes: Option<String>,
    ) -> JournalResult<Option<Journal>> {
        let id = work_package.id.ok_or(JournalError::Unsaved)?;
        let Some((previous, previous_data)) = self.store.latest(JournalType::WorkPackage, id).await? else {
            return self.record_creation(work_package, user_id, notes).await.map(Some);
        };

        let data = JournalData::from_work_package(work_package)?;
        let journal = Journal::new(JournalType::WorkPackage, id, previous.version + 1, user_id)
            .with_notes(notes)
            .with_details(data.changes_since(&previous_data));

        if journal.details.is_empty() && !journal.has_notes() {
            return Ok(None);
        }

        let journal = self.store.create(journal, data).await?;
        debug!(
            work_package_id = id,
            version = journal.version,
            changes = journal.details.len(),
            "journal recorded"
        );
        Ok(Some(journal))
    }

    /// Journals of a work package, oldest first
    pub async fn history(&self, work_package_id: Id) -> JournalResult<Vec<Journal>> {
        self.store.for_journable(JournalType::WorkPackage, work_package_id).await
    }

    pub async fn delete_history(&self, work_package_id: Id) -> JournalResult<usize> {
        self.store
            .delete_for_journable(JournalType::WorkPackage, work_package_id)
            .await
    }
}

/// In-memory journal store
pub struct MemoryJournalStore {
    journals: RwLock<Vec<(Journal, JournalData)>>,
    next_id: AtomicI64,
}

impl Default for MemoryJournalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryJournalStore {
    pub fn new() -> Self {
        Self {
            journals: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl JournalStore for MemoryJournalStore {
    async fn create(&self, mut journal: Journal, data: JournalData) -> JournalResult<Journal> {
        journal.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.journals.write().await.push((journal.clone(), data));
        Ok(journal)
    }

    async fn for_journable(&self, journable_type: JournalType, journable_id: Id) -> JournalResult<Vec<Journal>> {
        let journals = self.journals.read().await;
        let mut found: Vec<Journal> = journals
            .iter()
            .filter(|(j, _)| j.journable_type == journable_type && j.journable_id == journable_id)
            .map(|(j, _)| j.clone())
            .collect();
        found.sort_by_key(|j| j.version);
        Ok(found)
    }

    async fn latest(
        &self,
        journable_type: JournalType,
        journable_id: Id,
    ) -> JournalResult<Option<(Journal, JournalData)>> {
        let journals = self.journals.read().await;
        Ok(journals
            .iter()
            .filter(|(j, _)| j.journable_type == journable_type && j.journable_id == journable_id)
            .max_by_key(|(j, _)| j.version)
            .cloned())
    }

    async fn delete_for_journable(&self, journable_type: JournalType, journable_id: Id) -> JournalResult<usize> {
        let mut journals = self.journals.write().await;
        let before = journals.len();
        journals.retain(|(j, _)| !(j.journable_type == journable_type && j.journable_id == journable_id));
        Ok(before - journals.len())
    }
}
