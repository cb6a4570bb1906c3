//! Repository traits and base implementations
//!
//! Provides generic CRUD operations over in-process tables.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use op_core::error::OpError;
use op_core::traits::{Entity, Id};
use tokio::sync::RwLock;
use tracing::debug;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Id },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for OpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => OpError::not_found(entity, id),
            RepositoryError::Validation(message) => OpError::Database(message),
            RepositoryError::Conflict(message) => OpError::Conflict { message },
        }
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Base repository trait for CRUD operations
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find an entity by ID
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<T>>;

    /// All entities, ordered by ID
    async fn find_all(&self) -> RepositoryResult<Vec<T>>;

    /// Count all entities
    async fn count(&self) -> RepositoryResult<i64>;

    /// Insert a new entity; an ID already set on it is kept
    async fn create(&self, entity: T) -> RepositoryResult<T>;

    /// Replace a stored entity
    async fn update(&self, entity: T) -> RepositoryResult<T>;

    /// Delete an entity by ID
    async fn delete(&self, id: Id) -> RepositoryResult<()>;

    /// Check if an entity exists
    async fn exists(&self, id: Id) -> RepositoryResult<bool>;

    /// Find an entity or fail with `NotFound`
    async fn get(&self, id: Id) -> RepositoryResult<T> {
        self.find_by_id(id).await?.ok_or(RepositoryError::NotFound {
            entity: T::TYPE_NAME,
            id,
        })
    }
}

/// One table of the in-memory database
pub struct MemoryTable<T: Entity> {
    rows: RwLock<BTreeMap<Id, T>>,
    next_id: AtomicI64,
}

impl<T: Entity> Default for MemoryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryTable<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Rows matching `predicate`, ordered by ID
    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let rows = self.rows.read().await;
        rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    pub async fn find_first<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let rows = self.rows.read().await;
        rows.values().find(|row| predicate(row)).cloned()
    }

    pub async fn find_by_ids(&self, ids: &[Id]) -> Vec<T> {
        let rows = self.rows.read().await;
        ids.iter().filter_map(|id| rows.get(id).cloned()).collect()
    }

    /// Apply `change` to every matching row; returns the number of rows touched
    pub async fn update_where<P, C>(&self, predicate: P, change: C) -> usize
    where
        P: Fn(&T) -> bool + Send,
        C: Fn(&mut T) + Send,
    {
        let now = Utc::now();
        let mut rows = self.rows.write().await;
        let mut count = 0;
        for row in rows.values_mut().filter(|row| predicate(row)) {
            change(row);
            row.touch(now);
            count += 1;
        }
        debug!(table = T::TABLE_NAME, count, "update_where");
        count
    }

    /// Replace a stored row after `check` accepted it against the stored one.
    ///
    /// The check and the write happen under one write lock. `check` may
    /// adjust the incoming row before it is stored.
    pub async fn replace_checked<C>(&self, mut entity: T, check: C) -> RepositoryResult<T>
    where
        C: FnOnce(&T, &mut T) -> RepositoryResult<()> + Send,
    {
        let id = entity
            .id()
            .ok_or_else(|| RepositoryError::Validation(format!("{} has no id", T::TYPE_NAME)))?;

        let mut rows = self.rows.write().await;
        let stored = rows.get(&id).ok_or(RepositoryError::NotFound {
            entity: T::TYPE_NAME,
            id,
        })?;
        check(stored, &mut entity)?;

        entity.touch(Utc::now());
        rows.insert(id, entity.clone());

        debug!(table = T::TABLE_NAME, id, "replaced");
        Ok(entity)
    }

    /// Remove every matching row; returns the number of rows removed
    pub async fn delete_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool + Send,
    {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, row| !predicate(row));
        let count = before - rows.len();
        debug!(table = T::TABLE_NAME, count, "delete_where");
        count
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryTable<T> {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<T>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<T>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn create(&self, mut entity: T) -> RepositoryResult<T> {
        let mut rows = self.rows.write().await;

        let id = match entity.id() {
            Some(id) if rows.contains_key(&id) => {
                return Err(RepositoryError::Conflict(format!(
                    "{} with id {} already exists",
                    T::TYPE_NAME,
                    id
                )));
            }
            Some(id) => {
                self.next_id.fetch_max(id + 1, Ordering::SeqCst);
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };

        entity.assign_id(id);
        entity.touch(Utc::now());
        rows.insert(id, entity.clone());

        debug!(table = T::TABLE_NAME, id, "created");
        Ok(entity)
    }

    async fn update(&self, mut entity: T) -> RepositoryResult<T> {
        let id = entity
            .id()
            .ok_or_else(|| RepositoryError::Validation(format!("{} has no id", T::TYPE_NAME)))?;

        let mut rows = self.rows.write().await;
        if !rows.contains_key(&id) {
            return Err(RepositoryError::NotFound {
                entity: T::TYPE_NAME,
                id,
            });
        }

        entity.touch(Utc::now());
        rows.insert(id, entity.clone());

        debug!(table = T::TABLE_NAME, id, "updated");
        Ok(entity)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        match self.rows.write().await.remove(&id) {
            Some(_) => {
                debug!(table = T::TABLE_NAME, id, "deleted");
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: T::TYPE_NAME,
                id,
            }),
        }
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        Ok(self.rows.read().await.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use op_models::Status;

    #[tokio::test]
    async fn test_create_assigns_ids_and_timestamps() {
        let table = MemoryTable::<Status>::new();
        let a = table.create(Status::new("New")).await.unwrap();
        let b = table.create(Status::new("Closed")).await.unwrap();

        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert!(a.created_at.is_some());
        assert_eq!(table.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_keeps_preset_id() {
        let table = MemoryTable::<Status>::new();
        let mut seeded = Status::new("Seeded");
        seeded.id = Some(10);
        table.create(seeded.clone()).await.unwrap();

        let next = table.create(Status::new("Next")).await.unwrap();
        assert_eq!(next.id, Some(11));

        let err = table.create(seeded).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let table = MemoryTable::<Status>::new();
        let mut status = table.create(Status::new("New")).await.unwrap();
        status.name = "Renamed".into();
        table.update(status.clone()).await.unwrap();

        let id = status.id.unwrap();
        assert_eq!(table.get(id).await.unwrap().name, "Renamed");

        table.delete(id).await.unwrap();
        assert!(!table.exists(id).await.unwrap());
        assert!(matches!(
            table.delete(id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_fails() {
        let table = MemoryTable::<Status>::new();
        let mut status = Status::new("Ghost");
        status.id = Some(3);
        assert!(table.update(status).await.is_err());
    }

    #[tokio::test]
    async fn test_bulk_helpers() {
        let table = MemoryTable::<Status>::new();
        for name in ["a", "b", "c"] {
            table.create(Status::new(name)).await.unwrap();
        }

        let touched = table
            .update_where(|s| s.name != "b", |s| s.is_closed = true)
            .await;
        assert_eq!(touched, 2);
        assert_eq!(table.filter(|s| s.is_closed).await.len(), 2);

        assert_eq!(table.delete_where(|s| s.is_closed).await, 2);
        assert_eq!(table.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_checked_keeps_row_on_rejection() {
        let table = MemoryTable::<Status>::new();
        let status = table.create(Status::new("New")).await.unwrap();

        let mut renamed = status.clone();
        renamed.name = "Renamed".into();
        let err = table
            .replace_checked(renamed.clone(), |stored, _| {
                Err(RepositoryError::Conflict(stored.name.clone()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(ref name) if name == "New"));
        assert_eq!(table.get(status.id.unwrap()).await.unwrap().name, "New");

        let saved = table
            .replace_checked(renamed, |_, incoming| {
                incoming.is_closed = true;
                Ok(())
            })
            .await
            .unwrap();
        assert!(saved.is_closed);
        assert_eq!(table.get(status.id.unwrap()).await.unwrap().name, "Renamed");
    }
}
