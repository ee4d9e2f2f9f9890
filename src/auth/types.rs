// Authentication types

use serde::Deserialize;
use thiserror::Error;

/// Refresh endpoint response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Failure of one refresh flight.
///
/// Clone: a single flight fans its result out to every concurrent waiter.
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    /// Refresh endpoint answered with a non-success status
    #[error("refresh rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Transport-level failure reaching the refresh endpoint
    #[error("refresh request failed: {0}")]
    Transport(String),

    /// Bounded wait expired before the refresh endpoint answered
    #[error("refresh request timed out")]
    Timeout,

    /// Refresh response body was not valid JSON
    #[error("refresh response was not valid JSON")]
    Malformed,

    /// Refresh response decoded but carried no access token
    #[error("refresh response does not contain an access token")]
    MissingToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_uses_camel_case() {
        let parsed: RefreshResponse =
            serde_json::from_str(r#"{"accessToken":"tok-123"}"#).unwrap();
        assert_eq!(parsed.access_token, "tok-123");
    }

    #[test]
    fn test_error_messages() {
        let err = RefreshError::Rejected {
            status: 401,
            message: "refresh token expired".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "refresh rejected with status 401: refresh token expired"
        );

        let err = RefreshError::MissingToken;
        assert_eq!(
            err.to_string(),
            "refresh response does not contain an access token"
        );
    }
}
