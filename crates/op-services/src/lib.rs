//! # op-services
//!
//! Business logic services for OpenProject RS.
//!
//! Services apply params to a work package, validate it through the
//! contracts and persist it together with its journal, time entries,
//! attachments and notifications. Every call returns a `ServiceResult`
//! that keeps the work package and its errors when it fails.
//!
//! ## Example
//!
//! ```ignore
//! use op_services::{ServiceContext, UpdateWorkPackageService, WorkPackageParams};
//!
//! let ctx = ServiceContext::new(db, config);
//! let result = UpdateWorkPackageService::new(&ctx, &user)
//!     .call(work_package, WorkPackageParams::new().with_notes("Done"))
//!     .await?;
//! ```

pub mod base;
pub mod result;
pub mod work_packages;

#[cfg(test)]
pub(crate) mod test_support;

pub use base::ServiceContext;
pub use result::ServiceResult;
pub use work_packages::{
    allowed_target_projects_on_move, assignable_users, assignable_versions, new_statuses_allowed_to,
    CreateWorkPackageService, DeleteWorkPackageService, MoveWorkPackageService, SetAttributesService,
    TimeEntryParams, UpdateDoneRatioService, UpdateWorkPackageService, WorkPackageParams, WorkPackageUpdate,
};
