//! Result aliases used across the crates

use crate::error::{OpError, ValidationErrors};

/// Outcome of an operation that can fail for reasons other than validation
pub type OpResult<T> = Result<T, OpError>;

/// Result of running a contract or model validation
pub type ValidationResult = Result<(), ValidationErrors>;
