//! HTTP error mapping.
//!
//! Bodies are JSON: `{ "error": "<code>", "message": "<text>" }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ordinal_core::ApiError;
use serde::Serialize;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Missing or unknown bearer token.
    #[error("authenticated session required")]
    Unauthenticated,

    /// The body is not a JSON array of item ids.
    #[error("malformed body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl HttpError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::FORBIDDEN,
            Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Api(ApiError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            Self::Api(ApiError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Api(ApiError::Store(_) | ApiError::Content(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::MalformedBody(_) => "malformed_body",
            Self::Api(ApiError::Forbidden { .. }) => "forbidden",
            Self::Api(ApiError::InvalidInput(_)) => "invalid_input",
            Self::Api(ApiError::Store(_)) => "store_failure",
            Self::Api(ApiError::Content(_)) => "content_unavailable",
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
