use thiserror::Error;

use crate::contract::model::FormKind;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown field '{field}' in {form} form")]
    UnknownField { form: FormKind, field: String },

    #[error("Field '{field}' is declared twice")]
    DuplicateField { field: String },

    #[error("Field '{field}' refers to unknown field '{target}'")]
    UnknownFieldReference { field: String, target: String },

    #[error("Submission failed: {message}")]
    Submission { message: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },
}

impl DomainError {
    pub fn unknown_field(form: FormKind, field: impl Into<String>) -> Self {
        Self::UnknownField {
            form,
            field: field.into(),
        }
    }

    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
