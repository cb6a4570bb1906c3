//! Loading the records the work package contracts look at

use op_contracts::work_packages::WorkPackageAssociations;
use op_core::result::OpResult;
use op_db::{Database, Repository};
use op_models::WorkPackage;

use super::assignable::versions_for;

/// Associations of `work_package`; `stored` is the record as persisted
/// before the current edit
pub(crate) async fn load_associations(
    db: &Database,
    work_package: &WorkPackage,
    stored: Option<&WorkPackage>,
) -> OpResult<WorkPackageAssociations> {
    let project = db.projects.find_by_id(work_package.project_id).await?;
    let status = db.statuses.find_by_id(work_package.status_id).await?;
    let status_was = match stored {
        Some(stored) => db.statuses.find_by_id(stored.status_id).await?,
        None => None,
    };
    let fixed_version = match work_package.fixed_version_id {
        Some(id) => db.versions.find_by_id(id).await?,
        None => None,
    };
    let category = match work_package.category_id {
        Some(id) => db.categories.find_by_id(id).await?,
        None => None,
    };

    let version_was = stored.and_then(|s| s.fixed_version_id);
    let assignable_version_ids = versions_for(db, work_package.project_id, version_was)
        .await?
        .into_iter()
        .filter_map(|v| v.id)
        .collect();

    Ok(WorkPackageAssociations {
        project,
        status,
        status_was,
        fixed_version,
        assignable_version_ids,
        category,
    })
}
