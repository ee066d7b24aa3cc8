//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

/// Error returned by handlers, rendered as a JSON body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "InternalError",
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.code,
            "message": self.message,
        });
        (self.status, axum::Json(body)).into_response()
    }
}

impl From<matchgrab_common::Error> for ApiError {
    fn from(e: matchgrab_common::Error) -> Self {
        if e.is_not_found() {
            warn!("{}", e);
        } else {
            error!("Query failed: {}", e);
        }
        Self {
            status: StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code: e.error_code(),
            message: e.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        error!("Query task failed: {}", e);
        Self::internal(format!("query task failed: {e}"))
    }
}
