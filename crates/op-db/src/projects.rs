//! Project repository

use op_core::traits::Id;
use op_models::{Project, ProjectHierarchy};

use crate::repository::{MemoryTable, Repository, RepositoryResult};

pub type ProjectRepository = MemoryTable<Project>;

impl MemoryTable<Project> {
    /// Projects that are not archived
    pub async fn active(&self) -> Vec<Project> {
        self.filter(|p| p.active()).await
    }

    pub async fn find_by_identifier(&self, identifier: &str) -> Option<Project> {
        self.find_first(|p| p.identifier == identifier).await
    }

    /// Snapshot of the whole project tree
    pub async fn hierarchy(&self) -> RepositoryResult<ProjectHierarchy> {
        let projects = self.find_all().await?;
        Ok(ProjectHierarchy::new(&projects))
    }

    pub async fn descendants_of(&self, project_id: Id) -> RepositoryResult<Vec<Project>> {
        let ids = self.hierarchy().await?.descendants(project_id);
        Ok(self.find_by_ids(&ids).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use op_models::ProjectStatus;

    #[tokio::test]
    async fn test_active_and_descendants() {
        let repo = ProjectRepository::new();
        let root = repo.create(Project::new("root", "Root")).await.unwrap();
        let root_id = root.id.unwrap();
        let mut child = Project::child_of(root_id, "child", "Child");
        child.status = ProjectStatus::Archived;
        repo.create(child).await.unwrap();

        assert_eq!(repo.active().await.len(), 1);
        assert_eq!(repo.descendants_of(root_id).await.unwrap().len(), 1);
        assert!(repo.find_by_identifier("child").await.is_some());
    }
}
