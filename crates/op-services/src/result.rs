//! Outcome of a work package service call

use op_core::error::ValidationErrors;

/// Whether a call went through, what it produced and why it did not.
///
/// A failure may still hold the record it worked on: the unsaved work
/// package stays inspectable next to its errors.
#[derive(Debug, Clone)]
pub struct ServiceResult<T> {
    success: bool,
    result: Option<T>,
    errors: ValidationErrors,
}

impl<T> ServiceResult<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
        }
    }

    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }

    pub fn failure_with(result: T, errors: ValidationErrors) -> Self {
        Self {
            result: Some(result),
            ..Self::failure(errors)
        }
    }

    pub fn failure_with_base_error(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        Self::failure(errors)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<T> {
        self.result
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// `"subject can't be blank"`, base errors without attribute
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.full_messages()
    }
}

impl<T> From<Result<T, ValidationErrors>> for ServiceResult<T> {
    fn from(outcome: Result<T, ValidationErrors>) -> Self {
        outcome.map_or_else(Self::failure, Self::success)
    }
}
