//! API Error Types
//!
//! Errors raised while talking to the population API. Every variant is
//! recoverable: callers log it and carry on with whatever state they had.

use thiserror::Error;

use crate::model::PrefCode;

/// Population API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused, DNS failure, aborted request, ...
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    /// Server answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// Body was not the JSON shape we expect
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Payload parsed but carried no population grouping
    #[error("No population series for prefecture {code}")]
    MissingSeries { code: PrefCode },
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            status: 502,
            url: "http://localhost:8080/api/prefectures".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request to http://localhost:8080/api/prefectures failed with status 502"
        );

        let err = ApiError::MissingSeries { code: 13 };
        assert_eq!(err.to_string(), "No population series for prefecture 13");
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
