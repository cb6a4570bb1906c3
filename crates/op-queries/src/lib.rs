//! # op-queries
//!
//! Grouping queries for work packages.
//!
//! - `group_by` - The attributes work packages can be grouped by
//! - `counts` - Per status and group counts for a project
//!
//! ## Example
//!
//! ```ignore
//! use op_queries::{count_and_group_by, GroupBy};
//!
//! let rows = count_and_group_by(&db, &project, GroupBy::Priority).await?;
//! let total: usize = rows.iter().map(|r| r.total).sum();
//! ```

pub mod group_by;
pub mod counts;

pub use group_by::GroupBy;
pub use counts::{count_and_group_by, GroupCount};
