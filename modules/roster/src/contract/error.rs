use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Record not found: {id}")]
    NotFound { id: u64 },

    #[error("Roster unavailable: {message}")]
    Unavailable { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl RosterError {
    pub fn not_found(id: u64) -> Self {
        Self::NotFound { id }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
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

impl From<crate::domain::error::DomainError> for RosterError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            RecordNotFound { id } => Self::not_found(id),
            Fetch { message } | Decode { message } => Self::unavailable(message),
            InvalidPageSize => Self::validation("Page size must be positive"),
            UnsupportedPageSize { size, choices } => Self::validation(format!(
                "Page size {} is not one of {:?}",
                size, choices
            )),
            InvalidSort { message } => Self::validation(message),
            Validation { field, message } => Self::validation(format!("{}: {}", field, message)),
            Stopped => Self::internal(),
        }
    }
}
