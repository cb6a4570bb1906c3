//! Work Package repository
//!
//! Scopes and locking for the work_packages table.

use std::cmp::Reverse;

use op_core::traits::Id;
use op_models::{Project, WorkPackage};
use tracing::debug;

use crate::repository::{MemoryTable, RepositoryError, RepositoryResult};

pub type WorkPackageRepository = MemoryTable<WorkPackage>;

impl MemoryTable<WorkPackage> {
    pub async fn find_by_project(&self, project_id: Id) -> Vec<WorkPackage> {
        self.filter(|wp| wp.project_id == project_id).await
    }

    pub async fn find_by_projects(&self, project_ids: &[Id]) -> Vec<WorkPackage> {
        self.filter(|wp| project_ids.contains(&wp.project_id)).await
    }

    pub async fn find_by_status(&self, status_id: Id) -> Vec<WorkPackage> {
        self.filter(|wp| wp.status_id == status_id).await
    }

    /// Most recently updated first, newer IDs winning ties
    pub async fn recently_updated(&self, limit: usize) -> Vec<WorkPackage> {
        let mut all = self.filter(|_| true).await;
        all.sort_by_key(|wp| Reverse((wp.updated_at, wp.id)));
        all.truncate(limit);
        all
    }

    /// Work packages whose project is not archived
    pub async fn on_active_project(&self, projects: &MemoryTable<Project>) -> Vec<WorkPackage> {
        let active: Vec<Id> = projects
            .filter(|p| p.active())
            .await
            .into_iter()
            .filter_map(|p| p.id)
            .collect();
        self.find_by_projects(&active).await
    }

    /// Update with optimistic locking.
    ///
    /// Fails with `Conflict` when the stored `lock_version` moved on since
    /// `work_package` was loaded; bumps it otherwise.
    pub async fn save(&self, work_package: WorkPackage) -> RepositoryResult<WorkPackage> {
        self.replace_checked(work_package, |stored, incoming| {
            if stored.lock_version != incoming.lock_version {
                return Err(RepositoryError::Conflict(format!(
                    "work package {} was updated concurrently",
                    stored.id.unwrap_or_default()
                )));
            }
            incoming.lock_version += 1;
            debug!(work_package_id = ?incoming.id, lock_version = incoming.lock_version, "saving work package");
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;
    use op_models::ProjectStatus;

    #[tokio::test]
    async fn test_recently_updated() {
        let repo = WorkPackageRepository::new();
        let a = repo.create(WorkPackage::new("a", 1, 1)).await.unwrap();
        let mut b = repo.create(WorkPackage::new("b", 1, 1)).await.unwrap();
        let c = repo.create(WorkPackage::new("c", 1, 1)).await.unwrap();

        b.subject = "b2".into();
        repo.update(b.clone()).await.unwrap();

        let ids: Vec<_> = repo.recently_updated(10).await.into_iter().filter_map(|wp| wp.id).collect();
        assert_eq!(ids[0], b.id.unwrap());
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&a.id.unwrap()) && ids.contains(&c.id.unwrap()));
    }

    #[tokio::test]
    async fn test_recently_updated_breaks_ties_by_id() {
        let repo = WorkPackageRepository::new();
        let a = repo.create(WorkPackage::new("a", 1, 1)).await.unwrap();
        repo.create(WorkPackage::new("b", 1, 1)).await.unwrap();
        repo.create(WorkPackage::new("c", 1, 1)).await.unwrap();
        repo.update(a).await.unwrap();

        let subjects: Vec<_> = repo.recently_updated(2).await.into_iter().map(|wp| wp.subject).collect();
        assert_eq!(subjects, vec!["a".to_string(), "c".to_string()]);
    }

    #[tokio::test]
    async fn test_on_active_project() {
        let projects = MemoryTable::<Project>::new();
        let active = projects.create(Project::new("active", "Active")).await.unwrap();
        let mut archived = Project::new("archived", "Archived");
        archived.status = ProjectStatus::Archived;
        let archived = projects.create(archived).await.unwrap();

        let repo = WorkPackageRepository::new();
        repo.create(WorkPackage::new("visible", active.id.unwrap(), 1)).await.unwrap();
        repo.create(WorkPackage::new("hidden", archived.id.unwrap(), 1)).await.unwrap();

        let result = repo.on_active_project(&projects).await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].subject, "visible");
    }

    #[tokio::test]
    async fn test_save_detects_stale_copy() {
        let repo = WorkPackageRepository::new();
        let wp = repo.create(WorkPackage::new("lock", 1, 1)).await.unwrap();

        let saved = repo.save(wp.clone()).await.unwrap();
        assert_eq!(saved.lock_version, 1);

        let err = repo.save(wp).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_stale_save_leaves_stored_row_alone() {
        let repo = WorkPackageRepository::new();
        let wp = repo.create(WorkPackage::new("lock", 1, 1)).await.unwrap();
        let id = wp.id.unwrap();

        let mut first = wp.clone();
        first.subject = "first".into();
        let mut second = wp;
        second.subject = "second".into();

        let (a, b) = tokio::join!(repo.save(first), repo.save(second));
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);

        let stored = repo.get(id).await.unwrap();
        assert_eq!(stored.lock_version, 1);
        let winner = if a.is_ok() { "first" } else { "second" };
        assert_eq!(stored.subject, winner);
    }
}
