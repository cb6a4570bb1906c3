//! Categories repository

use op_core::traits::Id;
use op_models::Category;

use crate::repository::MemoryTable;

pub type CategoryRepository = MemoryTable<Category>;

impl MemoryTable<Category> {
    pub async fn find_by_project(&self, project_id: Id) -> Vec<Category> {
        self.filter(|c| c.project_id == project_id).await
    }

    /// Category of `project_id` called `name`
    pub async fn find_by_name(&self, project_id: Id, name: &str) -> Option<Category> {
        self.find_first(|c| c.project_id == project_id && c.name == name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;

    #[tokio::test]
    async fn test_find_by_name_is_scoped_to_project() {
        let repo = CategoryRepository::new();
        repo.create(Category::new("Backend", 1)).await.unwrap();
        repo.create(Category::new("Backend", 2)).await.unwrap();

        let found = repo.find_by_name(2, "Backend").await.unwrap();
        assert_eq!(found.project_id, 2);
        assert!(repo.find_by_name(3, "Backend").await.is_none());
        assert_eq!(repo.find_by_project(1).await.len(), 1);
    }
}
