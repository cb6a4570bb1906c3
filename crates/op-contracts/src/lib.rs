//! # op-contracts
//!
//! Contracts validate work packages before they are saved, against the
//! associated records the service loaded for them.

pub mod base;
pub mod work_packages;

pub use base::*;
