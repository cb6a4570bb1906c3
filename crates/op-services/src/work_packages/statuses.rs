//! Status transitions open to a user

use std::collections::HashSet;

use op_core::result::OpResult;
use op_core::traits::Id;
use op_db::{Database, Repository};
use op_models::status::sort_by_position;
use op_models::{Status, User, WorkPackage};
use tracing::debug;

/// Statuses `user` may set on `work_package`, the current one included.
///
/// Workflows are looked up for the user's roles in the project. The
/// assignee check uses the assignee stored on the record, so reassigning
/// in the same edit does not unlock assignee transitions.
pub async fn new_statuses_allowed_to(
    db: &Database,
    user: &User,
    work_package: &WorkPackage,
    include_default: bool,
) -> OpResult<Vec<Status>> {
    let current = db.statuses.get(work_package.status_id).await?;
    let role_ids: Vec<Id> = db
        .members
        .roles_for(user, work_package.project_id, &db.roles)
        .await?
        .into_iter()
        .filter_map(|r| r.id)
        .collect();

    let assignee_was = match work_package.id {
        Some(id) => db
            .work_packages
            .find_by_id(id)
            .await?
            .map_or(work_package.assigned_to_id, |stored| stored.assigned_to_id),
        None => work_package.assigned_to_id,
    };
    let author = user.is(Some(work_package.author_id));
    let assignee = user.is(assignee_was);

    let mut statuses = db
        .workflows
        .find_new_statuses_allowed_to(&current, &role_ids, work_package.type_id, author, assignee, &db.statuses)
        .await?;
    statuses.push(current);
    if include_default {
        statuses.extend(db.statuses.default_status().await);
    }

    let mut seen = HashSet::new();
    statuses.retain(|s| seen.insert(s.id));
    sort_by_position(&mut statuses);

    debug!(user = %user.login, author, assignee, count = statuses.len(), "allowed statuses");
    Ok(statuses)
}
