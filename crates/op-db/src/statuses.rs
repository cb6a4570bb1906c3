//! Status repository

use op_models::Status;

use crate::repository::MemoryTable;

pub type StatusRepository = MemoryTable<Status>;

impl MemoryTable<Status> {
    /// Status given to new work packages
    pub async fn default_status(&self) -> Option<Status> {
        self.find_first(|s| s.is_default).await
    }

    pub async fn closed(&self) -> Vec<Status> {
        self.filter(|s| s.is_closed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;

    #[tokio::test]
    async fn test_default_status() {
        let repo = StatusRepository::new();
        assert!(repo.default_status().await.is_none());

        repo.create(Status::new("Closed")).await.unwrap();
        let mut new = Status::new("New");
        new.is_default = true;
        repo.create(new).await.unwrap();

        assert_eq!(repo.default_status().await.unwrap().name, "New");
    }
}
