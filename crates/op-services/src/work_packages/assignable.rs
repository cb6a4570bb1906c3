//! Users, versions and projects a work package may be given
//!
//! WorkPackage.allowed_target_projects_on_move

use op_core::result::OpResult;
use op_core::traits::Id;
use op_db::{Database, Repository};
use op_models::{permissions, Project, User, Version, WorkPackage};
use tracing::debug;

/// Active members of the work package's project holding an assignable
/// role, each once, ordered by name
pub async fn assignable_users(db: &Database, work_package: &WorkPackage) -> OpResult<Vec<User>> {
    let assignable_roles: Vec<Id> = db.roles.assignable().await.into_iter().filter_map(|r| r.id).collect();

    let mut users: Vec<User> = Vec::new();
    for member in db.members.find_by_project(work_package.project_id).await {
        if !member.role_ids.iter().any(|id| assignable_roles.contains(id)) {
            continue;
        }
        if users.iter().any(|u| u.id == Some(member.user_id)) {
            continue;
        }
        if let Some(user) = db.users.find_by_id(member.user_id).await? {
            if user.active() {
                users.push(user);
            }
        }
    }

    users.sort_by(|a, b| a.name().cmp(&b.name()).then_with(|| a.login.cmp(&b.login)));
    Ok(users)
}

/// Open versions shared with the work package's project, plus the
/// version it is stored with
pub async fn assignable_versions(db: &Database, work_package: &WorkPackage) -> OpResult<Vec<Version>> {
    let version_was = match work_package.id {
        Some(id) => db.work_packages.find_by_id(id).await?.and_then(|s| s.fixed_version_id),
        None => None,
    };
    versions_for(db, work_package.project_id, version_was).await
}

pub(crate) async fn versions_for(db: &Database, project_id: Id, version_was: Option<Id>) -> OpResult<Vec<Version>> {
    let hierarchy = db.projects.hierarchy().await?;
    let mut versions: Vec<Version> = db
        .versions
        .shared_with(project_id, &hierarchy)
        .await
        .into_iter()
        .filter(Version::open)
        .collect();

    if let Some(id) = version_was {
        if !versions.iter().any(|v| v.id == Some(id)) {
            if let Some(version) = db.versions.find_by_id(id).await? {
                versions.push(version);
            }
        }
    }

    // Dated versions first, by date, then by name
    versions.sort_by(|a, b| {
        (a.effective_date.is_none(), a.effective_date, &a.name).cmp(&(
            b.effective_date.is_none(),
            b.effective_date,
            &b.name,
        ))
    });
    Ok(versions)
}

/// Active projects `user` may move work packages into
pub async fn allowed_target_projects_on_move(db: &Database, user: &User) -> OpResult<Vec<Project>> {
    let mut allowed = Vec::new();
    for project in db.projects.active().await {
        if db
            .members
            .allowed_to(user, permissions::MOVE_WORK_PACKAGES, &project, &db.roles)
            .await?
        {
            allowed.push(project);
        }
    }
    debug!(user = %user.login, count = allowed.len(), "move targets resolved");
    Ok(allowed)
}
