use std::time::Duration;

use thiserror::Error;

/// Unified error for the pagination engine.
///
/// `InvalidRequest` and `Validation` are caller faults and are raised before
/// any store access. `Timeout` and `Store` come from the store collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("store query timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("store error: {0}")]
    Store(String),
}

impl Error {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn store(err: anyhow::Error) -> Self {
        Self::Store(format!("{err:#}"))
    }

    /// Only an expired deadline is worth retrying; the engine itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
