use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// An error body returned by the HTTP endpoints.
#[derive(Debug)]
pub struct ApiErrorType {
    pub status: StatusCode,
    pub error: String,
    pub context: Option<String>,
}

impl<T: Into<String>> From<(StatusCode, T, Option<String>)> for ApiErrorType {
    fn from((status, error, context): (StatusCode, T, Option<String>)) -> Self {
        Self {
            status,
            error: error.into(),
            context,
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.error,
                "context": self.context,
            })),
        )
            .into_response()
    }
}
