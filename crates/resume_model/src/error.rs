//! Error types for resume validation

use thiserror::Error;

/// What is wrong with a single field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIssue {
    #[error("is required")]
    Required,

    #[error("must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("must be a valid email address")]
    InvalidEmail,
}

/// A field-level validation failure, addressed by a dotted path
/// such as `experience[1].company`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {issue}")]
pub struct FieldError {
    pub field: String,
    pub issue: FieldIssue,
}

impl FieldError {
    pub fn new(field: impl Into<String>, issue: FieldIssue) -> Self {
        Self {
            field: field.into(),
            issue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid resume data: {}", join_errors(.0))]
    Invalid(Vec<FieldError>),
}

impl ValidationError {
    /// All field errors carried by this validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidationError::Invalid(errors) => errors,
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ValidationError>;
