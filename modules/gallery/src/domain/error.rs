use std::time::Duration;

use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Store did not answer within {after:?}")]
    Timeout { after: Duration },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<paging_core::Error> for DomainError {
    fn from(e: paging_core::Error) -> Self {
        use paging_core::Error as E;
        match e {
            E::InvalidRequest(m) => Self::invalid_request(m),
            E::Validation(m) => Self::validation(m),
            E::Timeout { after } => Self::Timeout { after },
            E::Store(m) => Self::database(m),
        }
    }
}
