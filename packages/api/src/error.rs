//! Error taxonomy for every service call.
//!
//! All failures are surfaced as values; nothing here panics across the
//! controller boundary, and the rendering layer only ever sees the
//! `Display` text of an [`ApiError`].

use thiserror::Error;

/// Result alias used throughout the client.
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything that can go wrong with a service call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// Rejected locally before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// The transport failed before a usable response was received.
    #[error("Network error occurred")]
    Network,

    /// The server rejected the request; `detail` is the server's message
    /// when available, else a per-operation fallback.
    #[error("{detail}")]
    Remote { detail: String },

    /// Authorization denied. Handled globally by session invalidation; call
    /// sites never branch on this.
    #[error("Not authenticated")]
    Unauthorized,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn remote(detail: impl Into<String>) -> Self {
        ApiError::Remote {
            detail: detail.into(),
        }
    }
}
