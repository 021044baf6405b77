use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Gallery temporarily unavailable")]
    Unavailable,

    #[error("Internal error")]
    Internal,
}

impl GalleryError {
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
}
