//! # op-db
//!
//! Persistence layer for OpenProject RS.
//!
//! Every table lives in memory behind the async `Repository` trait:
//!
//! - `MemoryTable<T>` provides CRUD for any `Entity`
//! - per-entity modules add the scopes the domain needs
//! - `Database` bundles the tables and loads seed data
//!
//! ## Example
//!
//! ```ignore
//! use op_db::{Database, Repository};
//!
//! let db = Database::new();
//! db.load(seed).await?;
//!
//! let work_package = db.work_packages.find_by_id(1).await?;
//! let recent = db.work_packages.recently_updated(10).await;
//! ```

pub mod repository;
pub mod database;
pub mod work_packages;
pub mod users;
pub mod projects;
pub mod time_entries;
pub mod statuses;
pub mod priorities;
pub mod types;
pub mod roles;
pub mod versions;
pub mod members;
pub mod workflows;
pub mod activities;
pub mod categories;

// Re-exports
pub use database::{Database, Seed};
pub use repository::{MemoryTable, Repository, RepositoryError, RepositoryResult};
pub use work_packages::WorkPackageRepository;
pub use users::UserRepository;
pub use projects::ProjectRepository;
pub use time_entries::TimeEntryRepository;
pub use statuses::StatusRepository;
pub use priorities::PriorityRepository;
pub use types::TypeRepository;
pub use roles::RoleRepository;
pub use versions::VersionRepository;
pub use members::MemberRepository;
pub use workflows::WorkflowRepository;
pub use activities::ActivityRepository;
pub use categories::CategoryRepository;
