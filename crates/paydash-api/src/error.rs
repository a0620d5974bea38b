//! Error types for paydash-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use paydash_core::{CoreError, ErrorCode, ErrorDetails};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {details}")]
    BadRequest { details: ErrorDetails },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error body sent to the client
    pub fn details(&self) -> ErrorDetails {
        match self {
            ApiError::BadRequest { details } => details.clone(),
            ApiError::NotFound { resource } => ErrorDetails::new(
                ErrorCode::NotFound,
                format!("Not found: {}", resource),
            ),
            // Internal messages stay in the log
            ApiError::InternalError { .. } => ErrorDetails::new(
                ErrorCode::InternalError,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidParameter { .. } => ApiError::BadRequest {
                details: error.to_details(),
            },
            other => ApiError::InternalError {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!(target: "paydash::api", "{}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.details(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_maps_to_bad_request() {
        let error: ApiError = CoreError::invalid_parameter("status", "done", ["success"]).into();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.details().code, ErrorCode::InvalidParameter);
    }

    #[test]
    fn test_other_core_errors_map_to_internal() {
        let error: ApiError = CoreError::InternalError { message: "secret".to_string() }.into();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.details().message.contains("secret"));
    }

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound { resource: "/nope".to_string() };
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert!(error.details().message.contains("/nope"));
    }
}
