//! The in-process database
//!
//! One `MemoryTable` per entity, plus loading of seed records.

use op_models::{
    Category, Member, Priority, Project, Role, Status, TimeEntry, TimeEntryActivity, Type, User, Version,
    WorkPackage, Workflow,
};
use serde::Deserialize;
use tracing::info;

use crate::activities::ActivityRepository;
use crate::categories::CategoryRepository;
use crate::members::MemberRepository;
use crate::priorities::PriorityRepository;
use crate::projects::ProjectRepository;
use crate::repository::{MemoryTable, Repository, RepositoryResult};
use crate::roles::RoleRepository;
use crate::statuses::StatusRepository;
use crate::time_entries::TimeEntryRepository;
use crate::types::TypeRepository;
use crate::users::UserRepository;
use crate::versions::VersionRepository;
use crate::work_packages::WorkPackageRepository;
use crate::workflows::WorkflowRepository;

/// Records to load into an empty database, typically read from YAML
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub types: Vec<Type>,
    pub statuses: Vec<Status>,
    pub priorities: Vec<Priority>,
    pub roles: Vec<Role>,
    pub members: Vec<Member>,
    pub workflows: Vec<Workflow>,
    pub versions: Vec<Version>,
    pub categories: Vec<Category>,
    pub activities: Vec<TimeEntryActivity>,
    pub work_packages: Vec<WorkPackage>,
    pub time_entries: Vec<TimeEntry>,
}

/// All tables of the work package domain
#[derive(Default)]
pub struct Database {
    pub users: UserRepository,
    pub projects: ProjectRepository,
    pub types: TypeRepository,
    pub statuses: StatusRepository,
    pub priorities: PriorityRepository,
    pub roles: RoleRepository,
    pub members: MemberRepository,
    pub workflows: WorkflowRepository,
    pub versions: VersionRepository,
    pub categories: CategoryRepository,
    pub activities: ActivityRepository,
    pub work_packages: WorkPackageRepository,
    pub time_entries: TimeEntryRepository,
}

async fn insert_all<T: op_core::traits::Entity>(table: &MemoryTable<T>, rows: Vec<T>) -> RepositoryResult<()> {
    for row in rows {
        table.create(row).await?;
    }
    Ok(())
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert seed records, keeping the IDs they carry
    pub async fn load(&self, seed: Seed) -> RepositoryResult<()> {
        let work_packages = seed.work_packages.len();

        insert_all(&self.users, seed.users).await?;
        insert_all(&self.projects, seed.projects).await?;
        insert_all(&self.types, seed.types).await?;
        insert_all(&self.statuses, seed.statuses).await?;
        insert_all(&self.priorities, seed.priorities).await?;
        insert_all(&self.roles, seed.roles).await?;
        insert_all(&self.members, seed.members).await?;
        insert_all(&self.workflows, seed.workflows).await?;
        insert_all(&self.versions, seed.versions).await?;
        insert_all(&self.categories, seed.categories).await?;
        insert_all(&self.activities, seed.activities).await?;
        insert_all(&self.work_packages, seed.work_packages).await?;
        insert_all(&self.time_entries, seed.time_entries).await?;

        info!(work_packages, "seed loaded");
        Ok(())
    }
}
