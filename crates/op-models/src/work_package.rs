//! Work packages: the tracked unit of work, with its scheduling and
//! progress rules

pub mod model;

pub use model::*;
