use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Record not found: {id}")]
    RecordNotFound { id: u64 },

    #[error("Roster fetch failed: {message}")]
    Fetch { message: String },

    #[error("Roster payload could not be decoded: {message}")]
    Decode { message: String },

    #[error("Page size must be positive")]
    InvalidPageSize,

    #[error("Page size {size} is not one of {choices:?}")]
    UnsupportedPageSize { size: usize, choices: Vec<usize> },

    #[error("Invalid sort: {message}")]
    InvalidSort { message: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Roster view is stopped")]
    Stopped,
}

impl DomainError {
    pub fn record_not_found(id: u64) -> Self {
        Self::RecordNotFound { id }
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn unsupported_page_size(size: usize, choices: Vec<usize>) -> Self {
        Self::UnsupportedPageSize { size, choices }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<listing_core::Error> for DomainError {
    fn from(e: listing_core::Error) -> Self {
        match e {
            listing_core::Error::InvalidPageSize => Self::InvalidPageSize,
            other => Self::InvalidSort {
                message: other.to_string(),
            },
        }
    }
}

impl From<modkit::ClientError> for DomainError {
    fn from(e: modkit::ClientError) -> Self {
        match e {
            modkit::ClientError::Decode { .. } => Self::decode(e.to_string()),
            other => Self::fetch(other.to_string()),
        }
    }
}
