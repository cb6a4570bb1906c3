//! Version repository

use op_core::traits::Id;
use op_models::{ProjectHierarchy, Version};

use crate::repository::MemoryTable;

pub type VersionRepository = MemoryTable<Version>;

impl MemoryTable<Version> {
    pub async fn find_by_project(&self, project_id: Id) -> Vec<Version> {
        self.filter(|v| v.project_id == project_id).await
    }

    /// Versions usable by work packages of `project_id`, whatever their status
    pub async fn shared_with(&self, project_id: Id, hierarchy: &ProjectHierarchy) -> Vec<Version> {
        self.filter(|v| v.is_shared_with(project_id, hierarchy)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;
    use op_models::{Project, VersionSharing};

    #[tokio::test]
    async fn test_shared_with() {
        let mut parent = Project::new("parent", "Parent");
        parent.id = Some(1);
        let mut child = Project::child_of(1, "child", "Child");
        child.id = Some(2);
        let hierarchy = ProjectHierarchy::new(&[parent, child]);

        let repo = VersionRepository::new();
        repo.create(Version::new("private", 1)).await.unwrap();
        repo.create(Version::new("shared", 1).with_sharing(VersionSharing::Descendants))
            .await
            .unwrap();

        let names: Vec<_> = repo.shared_with(2, &hierarchy).await.into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["shared".to_string()]);
        assert_eq!(repo.shared_with(1, &hierarchy).await.len(), 2);
    }
}
