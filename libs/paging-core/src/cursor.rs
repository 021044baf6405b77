//! Opaque cursor tokens.
//!
//! A token carries exactly one sort-key value: the value is serialized as JSON
//! and wrapped in base64url (no padding) so it is safe in query strings.
//! Decoding also accepts the standard alphabet, with or without padding.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::SortKey;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    #[error("cursor is empty")]
    Empty,
    #[error("cursor contains invalid base64")]
    InvalidBase64,
    #[error("cursor payload is not a sort key")]
    InvalidPayload,
}

/// What to do with a token that does not decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorPolicy {
    /// Reject the request.
    #[default]
    Strict,
    /// Treat the token as absent and serve a first page.
    Lenient,
}

pub fn encode(key: SortKey) -> String {
    // The JSON form of an integer is its decimal text.
    URL_SAFE_NO_PAD.encode(key.to_string())
}

/// Lenient decode: `None` for a missing, empty or malformed token.
pub fn decode(token: Option<&str>) -> Option<SortKey> {
    token.and_then(|t| try_decode(t).ok())
}

pub fn try_decode(token: &str) -> Result<SortKey, CursorError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CursorError::Empty);
    }

    let bytes = [URL_SAFE_NO_PAD, URL_SAFE, STANDARD, STANDARD_NO_PAD]
        .iter()
        .find_map(|engine| engine.decode(token).ok())
        .ok_or(CursorError::InvalidBase64)?;

    serde_json::from_slice::<SortKey>(&bytes).map_err(|_| CursorError::InvalidPayload)
}
