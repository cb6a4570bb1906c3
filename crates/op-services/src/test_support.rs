//! Records shared by the service tests

use std::sync::Arc;

use op_core::config::AppConfig;
use op_core::traits::Id;
use op_db::{Database, Repository};
use op_models::{
    permissions, Member, Priority, Project, Role, Status, TimeEntryActivity, Type, User, Version,
    VersionSharing, VersionStatus, WorkPackage,
};

use crate::base::ServiceContext;

pub(crate) struct Fixture {
    pub ctx: ServiceContext,
    pub project: Project,
    pub task: Type,
    pub bug: Type,
    pub new_status: Status,
    pub in_progress: Status,
    pub closed: Status,
    pub priority: Priority,
    pub activity: TimeEntryActivity,
    pub developer_role: Role,
    pub admin: User,
    pub developer: User,
}

pub(crate) async fn fixture() -> Fixture {
    fixture_with(AppConfig::default()).await
}

pub(crate) async fn fixture_with(config: AppConfig) -> Fixture {
    let db = Arc::new(Database::new());

    let task = db.types.create(Type::new("Task")).await.unwrap();
    let bug = db.types.create(Type::new("Bug")).await.unwrap();

    let mut new_status = Status::new("New");
    new_status.is_default = true;
    new_status.position = 1;
    let new_status = db.statuses.create(new_status).await.unwrap();

    let mut in_progress = Status::new("In progress");
    in_progress.position = 2;
    in_progress.default_done_ratio = Some(50);
    let in_progress = db.statuses.create(in_progress).await.unwrap();

    let mut closed = Status::new("Closed");
    closed.is_closed = true;
    closed.position = 3;
    closed.default_done_ratio = Some(100);
    let closed = db.statuses.create(closed).await.unwrap();

    let mut priority = Priority::new("Normal");
    priority.is_default = true;
    let priority = db.priorities.create(priority).await.unwrap();

    let mut activity = TimeEntryActivity::new("Development");
    activity.is_default = true;
    let activity = db.activities.create(activity).await.unwrap();

    let mut developer_role = Role::new("Developer").with_permissions(&[
        permissions::VIEW_WORK_PACKAGES,
        permissions::ADD_WORK_PACKAGES,
        permissions::EDIT_WORK_PACKAGES,
        permissions::MOVE_WORK_PACKAGES,
        permissions::LOG_TIME,
    ]);
    developer_role.assignable = true;
    let developer_role = db.roles.create(developer_role).await.unwrap();

    let mut admin = User::new("admin", "admin@example.com");
    admin.admin = true;
    let admin = db.users.create(admin).await.unwrap();
    let developer = db.users.create(User::new("dev", "dev@example.com")).await.unwrap();

    let mut project = Project::new("alpha", "Alpha");
    project.enable_type(task.id.unwrap());
    project.enable_type(bug.id.unwrap());
    let project = db.projects.create(project).await.unwrap();

    let f = Fixture {
        ctx: ServiceContext::new(db, config),
        project,
        task,
        bug,
        new_status,
        in_progress,
        closed,
        priority,
        activity,
        developer_role,
        admin,
        developer,
    };
    f.add_member(&f.developer, &f.project, &f.developer_role).await;
    f
}

impl Fixture {
    pub fn db(&self) -> &Database {
        &self.ctx.db
    }

    /// Active project with the task type enabled
    pub async fn add_project(&self, identifier: &str, parent_id: Option<Id>) -> Project {
        let mut project = match parent_id {
            Some(parent_id) => Project::child_of(parent_id, identifier, identifier),
            None => Project::new(identifier, identifier),
        };
        project.enable_type(self.task.id.unwrap());
        self.db().projects.create(project).await.unwrap()
    }

    pub async fn add_user(&self, login: &str) -> User {
        self.db()
            .users
            .create(User::new(login, format!("{}@example.com", login)))
            .await
            .unwrap()
    }

    pub async fn add_member(&self, user: &User, project: &Project, role: &Role) -> Member {
        let member = Member::new(user.id.unwrap(), project.id.unwrap()).with_role(role.id.unwrap());
        self.db().members.create(member).await.unwrap()
    }

    pub async fn add_version(
        &self,
        project: &Project,
        name: &str,
        status: VersionStatus,
        sharing: VersionSharing,
    ) -> Version {
        let mut version = Version::new(name, project.id.unwrap()).with_sharing(sharing);
        version.status = status;
        self.db().versions.create(version).await.unwrap()
    }

    /// A stored task in the fixture project, written by the developer
    pub async fn work_package(&self, subject: &str) -> WorkPackage {
        let mut wp = WorkPackage::new(subject, self.project.id.unwrap(), self.task.id.unwrap());
        wp.status_id = self.new_status.id.unwrap();
        wp.priority_id = self.priority.id;
        wp.author_id = self.developer.id.unwrap();
        self.db().work_packages.create(wp).await.unwrap()
    }

    pub async fn reload(&self, work_package: &WorkPackage) -> WorkPackage {
        self.db().work_packages.get(work_package.id.unwrap()).await.unwrap()
    }
}
