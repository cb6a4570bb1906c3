//! Projects and the tree they form through `parent_id`

pub mod model;
pub mod hierarchy;

pub use model::*;
pub use hierarchy::ProjectHierarchy;
