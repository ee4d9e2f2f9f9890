// Error handling module
// Defines the caller-facing error type of the request executor

use thiserror::Error;

use crate::auth::RefreshError;

/// Errors surfaced to the caller of `execute`.
///
/// Session-ending variants (`NoToken`, `RefreshFailed`, `AuthExhausted`) mean
/// the token slot has already been cleared and the redirect already fired;
/// the error itself only tells the caller why the call produced no data.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Protected call attempted with an empty token slot
    #[error("No token found. Redirecting to login.")]
    NoToken,

    /// Token refresh failed; the session has been terminated
    #[error("Session expired. Redirecting to login.")]
    RefreshFailed(#[from] RefreshError),

    /// Still unauthorized after the single refresh-and-retry
    #[error("Unauthorized. Redirecting to login.")]
    AuthExhausted,

    /// Non-success response from the server
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Response body was not parseable as JSON
    #[error("Invalid server response")]
    Decode,

    /// Bounded wait expired before the server answered
    #[error("Request timed out")]
    Timeout,

    /// Transport-level failure issuing the request
    #[error("Network error: {0}")]
    Network(String),

    /// Client-side failure outside the protocol
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
