//! # op-core
//!
//! Shared ground for the work package crates: the error and validation
//! types services return, the traits every stored record implements,
//! runtime configuration and small value types (hours, date ranges,
//! notification options).

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use types::*;
