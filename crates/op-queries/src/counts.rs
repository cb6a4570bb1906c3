//! Grouped counts
//!
//! One row per status and group value, the way the project overview
//! renders its "issues by" tables.

use std::collections::{BTreeMap, HashSet};

use op_core::traits::Id;
use op_db::{Database, Repository, RepositoryResult};
use op_models::Project;
use serde::Serialize;
use tracing::debug;

use crate::group_by::GroupBy;

/// Number of work packages with a given status and group value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub status_id: Id,
    /// Whether `status_id` is a closed status
    pub closed: bool,
    /// Value of the grouped attribute; `None` for unset
    pub group_id: Option<Id>,
    pub total: usize,
}

/// Count the work packages of `project` by status and `group_by`.
///
/// For `GroupBy::Subproject` the work packages of the project's
/// descendants are counted instead, grouped by their project.
pub async fn count_and_group_by(
    db: &Database,
    project: &Project,
    group_by: GroupBy,
) -> RepositoryResult<Vec<GroupCount>> {
    let Some(project_id) = project.id else {
        return Ok(Vec::new());
    };

    let work_packages = match group_by {
        GroupBy::Subproject => {
            let descendants = db.projects.hierarchy().await?.descendants(project_id);
            db.work_packages.find_by_projects(&descendants).await
        }
        _ => db.work_packages.find_by_project(project_id).await,
    };

    let closed: HashSet<Id> = db
        .statuses
        .find_all()
        .await?
        .into_iter()
        .filter(|s| s.is_closed)
        .filter_map(|s| s.id)
        .collect();

    let mut totals: BTreeMap<(Id, Option<Id>), usize> = BTreeMap::new();
    for wp in &work_packages {
        *totals.entry((wp.status_id, group_by.group_id(wp))).or_default() += 1;
    }

    debug!(project_id, group_by = %group_by, groups = totals.len(), "grouped work packages");

    Ok(totals
        .into_iter()
        .map(|((status_id, group_id), total)| GroupCount {
            status_id,
            closed: closed.contains(&status_id),
            group_id,
            total,
        })
        .collect())
}
