//! User repository

use op_models::User;

use crate::repository::MemoryTable;

pub type UserRepository = MemoryTable<User>;

impl MemoryTable<User> {
    pub async fn find_by_login(&self, login: &str) -> Option<User> {
        self.find_first(|u| u.login == login).await
    }

    pub async fn active(&self) -> Vec<User> {
        self.filter(|u| u.active()).await
    }
}
