use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Maps engine and provider errors onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub nr_core::Error);

impl From<nr_core::Error> for ApiError {
    fn from(err: nr_core::Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_client_error() {
            self.0.to_string()
        } else {
            format!("Server Error: {}", self.0)
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
