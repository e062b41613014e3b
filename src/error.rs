//! Error types for the results service
//!
//! `FetchError` covers everything that can go wrong talking to the upstream
//! competition API. It never reaches an HTTP client: the fetcher logs it and
//! returns an absent result. `ApiError` is the last-resort HTTP error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Maximum length for upstream response bodies kept in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

// == Fetch Error Enum ==
/// Failure to obtain usable data from the upstream API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure, including timeouts
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// GraphQL error list in an otherwise successful response
    #[error("Upstream query failed: {0}")]
    Query(String),

    /// Response body could not be parsed
    #[error("Malformed upstream payload: {0}")]
    Malformed(String),

    /// The operating team is missing from the response
    #[error("Team {0} not found in upstream data")]
    TeamNotFound(u32),

    /// No event with rankings was found
    #[error("No rankings available")]
    NoRankings,
}

impl FetchError {
    /// Builds a status error, truncating long bodies.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        FetchError::Status {
            status: status.as_u16(),
            body: truncate_body(body),
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
        format!("{}... (truncated, {} total bytes)", head, body.len())
    }
}

// == Api Error Enum ==
/// Error returned from the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unexpected failure while serving a request
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(ErrorResponse::new(error, self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for upstream calls.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_kept() {
        let err = FetchError::from_status(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.to_string(), "Upstream returned status 502: upstream down");
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 100);
        let err = FetchError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);

        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("truncated"));
                assert!(body.len() < MAX_ERROR_BODY_LENGTH + 50);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_internal_error_response() {
        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["available"], false);
        assert_eq!(json["message"], "Internal error: boom");
    }
}
