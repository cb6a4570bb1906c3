//! # op-models
//!
//! Domain models for OpenProject RS.
//!
//! Records of the work package domain and the rules that need nothing but
//! the record and its direct associations: workflow resolution, version
//! sharing, done ratio and duration.
//!
//! Every model is an `op_core::traits::Entity`; the impls come from the
//! `entity!` macro.

pub use op_core::traits::{Entity, Id, Identifiable, Timestamped, ProjectScoped};

#[macro_use]
mod macros;

pub mod user;
pub mod project;
pub mod work_package;
pub mod status;
pub mod type_def;
pub mod priority;
pub mod version;
pub mod category;
pub mod member;
pub mod role;
pub mod workflow;
pub mod time_entry;

pub use user::model::User;
pub use project::{Project, ProjectHierarchy, ProjectStatus};
pub use work_package::model::WorkPackage;
pub use status::Status;
pub use type_def::Type;
pub use priority::Priority;
pub use version::{Version, VersionStatus, VersionSharing};
pub use category::Category;
pub use member::Member;
pub use role::{Role, permissions};
pub use workflow::Workflow;
pub use time_entry::{TimeEntry, TimeEntryActivity};
