use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use engine::CoreError;
use serde::Serialize;

/// Maps `CoreError` (and inbound extraction failures) to an HTTP response,
/// the way the teacher's `CustomError`/`ApiErrorResponse` pair does.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ApiErrorBody {
    success: bool,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self {
            status: err.status_code(),
            message: err.message().to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: errors.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::warn!(status = %self.status, message = %self.message, "request failed");
        (
            self.status,
            Json(ApiErrorBody {
                success: false,
                message: self.message,
            }),
        )
            .into_response()
    }
}
