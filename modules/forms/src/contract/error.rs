use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormsError {
    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Submission failed: {message}")]
    Submission { message: String },

    #[error("Internal error")]
    Internal,
}

impl FormsError {
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for FormsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UnknownField { field, .. } => Self::unknown_field(field),
            Submission { message } => Self::Submission { message },
            Validation { field, message } => Self::validation(format!("{}: {}", field, message)),
            DuplicateField { .. } | UnknownFieldReference { .. } => Self::internal(),
        }
    }
}
